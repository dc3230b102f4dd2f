use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style names chosen in Rust. Templates also use `index`, `todo_id`,
/// `summary` and `muted` directly.
pub mod names {
    pub const TITLE: &str = "title";
    pub const UNTITLED: &str = "untitled";
    pub const CONTENT: &str = "content";
    pub const EDITING: &str = "editing";
    pub const TODO_OPEN: &str = "todo_open";
    pub const TODO_DONE: &str = "todo_done";
}

/// Shown in front of text whose style name is not in the theme.
const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named set of terminal styles.
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Apply a named style. With `use_color` off the text comes back plain.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static JOTTER_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("index", Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::UNTITLED, Style::new().dim().italic())
        .add(names::CONTENT, Style::new())
        .add(names::EDITING, Style::new().cyan())
        .add(names::TODO_OPEN, Style::new())
        .add(names::TODO_DONE, Style::new().dim().strikethrough())
        .add("todo_id", Style::new().color256(245))
        .add("summary", Style::new().color256(245).italic())
        .add("muted", Style::new().dim())
});
