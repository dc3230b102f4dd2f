//! # Rendering
//!
//! Turns the view tree into terminal text. Rust code computes layout (index
//! labels, truncated titles, checkbox glyphs) into small serializable structs;
//! the templates in `templates/` lay them out and pick styles through the
//! `style` filter.

use super::styles::{names, JOTTER_THEME};
use super::templates::{LIST_TEMPLATE, NOTE_TEMPLATE};
use jotter::view::{NoteCard, NoteListView};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const UNTITLED: &str = "(untitled)";
pub const EMPTY_LIST_MESSAGE: &str = "No notes yet.";
const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";
const EDIT_MARKER_WIDTH: usize = 2;

#[derive(Serialize)]
struct CardData {
    index: String,
    title: String,
    title_style: &'static str,
    editing_title: bool,
    content_lines: Vec<String>,
    content_style: &'static str,
    todos: Vec<TodoLine>,
    summary: String,
}

#[derive(Serialize)]
struct TodoLine {
    checkbox: &'static str,
    id: String,
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ListData {
    notes: Vec<CardData>,
    empty: bool,
    empty_message: &'static str,
}

#[derive(Serialize)]
struct SingleData {
    note: CardData,
}

/// Whether stdout should get ANSI styling.
pub fn use_color(no_color: bool) -> bool {
    !no_color && console::Term::stdout().features().colors_supported()
}

pub fn render_list(view: &NoteListView, use_color: bool) -> String {
    let data = ListData {
        notes: view.notes.iter().map(card_data).collect(),
        empty: view.is_empty(),
        empty_message: EMPTY_LIST_MESSAGE,
    };
    render_template("list", &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_card(card: &NoteCard, use_color: bool) -> String {
    let data = SingleData {
        note: card_data(card),
    };
    render_template("note", &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn environment(use_color: bool) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("style", move |value: Value, name: String| -> String {
        JOTTER_THEME.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("note", NOTE_TEMPLATE)?;
    env.add_template("list", LIST_TEMPLATE)?;
    Ok(env)
}

fn render_template<T: Serialize>(
    name: &str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let env = environment(use_color)?;
    let template = env.get_template(name)?;
    template.render(data)
}

fn card_data(card: &NoteCard) -> CardData {
    let index = format!("{}.", card.id);
    let marker_width = if card.title.editable {
        EDIT_MARKER_WIDTH
    } else {
        0
    };
    let available = LINE_WIDTH.saturating_sub(index.width() + 1 + marker_width);

    let (title, title_style) = if card.title.text.is_empty() && !card.title.editable {
        (UNTITLED.to_string(), names::UNTITLED)
    } else {
        (
            truncate_to_width(&card.title.text, available),
            names::TITLE,
        )
    };

    let content_lines = card.content.text.lines().map(str::to_string).collect();
    let content_style = if card.content.editable {
        names::EDITING
    } else {
        names::CONTENT
    };

    let todos = card
        .todos
        .iter()
        .map(|t| TodoLine {
            checkbox: if t.done { CHECKED } else { UNCHECKED },
            id: format!("{}", t.id),
            text: t.text.clone(),
            style: if t.done {
                names::TODO_DONE
            } else {
                names::TODO_OPEN
            },
        })
        .collect::<Vec<_>>();

    let summary = if todos.is_empty() {
        String::new()
    } else {
        format!("{}/{} done", card.done_count, todos.len())
    };

    CardData {
        index,
        title,
        title_style,
        editing_title: card.title.editable,
        content_lines,
        content_style,
        todos,
        summary,
    }
}

/// Cut `s` to at most `max_width` terminal columns, ending in `…` when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotter::binding::UiState;
    use jotter::model::{Note, Todo};
    use jotter::view;

    fn trip() -> Note {
        let mut note = Note::new(1, "Trip".into(), "Pack bags\nBook hotel".into());
        note.todos.push(Todo::new(2, "Passport".into()));
        note.todos.push(Todo {
            id: 3,
            text: "Tickets".into(),
            done: true,
        });
        note
    }

    #[test]
    fn test_render_empty_list() {
        let view = view::render(&[], &UiState::default());
        let output = render_list(&view, false);
        assert_eq!(output.trim(), EMPTY_LIST_MESSAGE);
    }

    #[test]
    fn test_render_card_layout() {
        let view = view::render(&[trip()], &UiState::default());
        let output = render_card(&view.notes[0], false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1. Trip",
                "    Pack bags",
                "    Book hotel",
                "    [ ] 2 Passport",
                "    [x] 3 Tickets",
                "    1/2 done",
            ]
        );
    }

    #[test]
    fn test_render_untitled_note() {
        let note = Note::new(5, "".into(), "body only".into());
        let view = view::render(&[note], &UiState::default());
        let output = render_card(&view.notes[0], false);
        assert!(output.starts_with("5. (untitled)"));
        assert!(!output.contains("done"));
    }

    #[test]
    fn test_render_list_separates_notes() {
        let second = Note::new(4, "Second".into(), "".into());
        let view = view::render(&[trip(), second], &UiState::default());
        let output = render_list(&view, false);
        assert!(output.contains("1/2 done\n\n4. Second\n"));
    }

    #[test]
    fn test_no_ansi_without_color() {
        let view = view::render(&[trip()], &UiState::default());
        assert!(!render_list(&view, false).contains('\x1b'));
    }

    #[test]
    fn test_long_title_is_truncated() {
        let long = "x".repeat(200);
        let note = Note::new(1, long, "".into());
        let view = view::render(&[note], &UiState::default());
        let first = render_card(&view.notes[0], false)
            .lines()
            .next()
            .unwrap()
            .to_string();
        assert_eq!(first.width(), LINE_WIDTH);
        assert!(first.ends_with('…'));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        // Wide characters count double.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }
}
