//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as separate files
//! under `templates/` and included here as string constants.
//!
//! Templates are registered with `trim_blocks` and `lstrip_blocks`, so a line
//! holding only a block tag produces no output. Line breaks come from lines
//! that print something, or from an explicit `{{ "\n" }}`.
//!
//! Layout math (widths, truncation, placeholders) stays in Rust; templates
//! only pick styles and decide which rows appear.

pub const NOTE_TEMPLATE: &str = include_str!("templates/note.tmp");
pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
