//! # View
//!
//! A deterministic projection from the note list (plus the binding's UI state)
//! to a visual tree. Hosts render the tree; the terminal host does so through
//! templates in `cli/render.rs`.
//!
//! The tree is rebuilt from scratch on [`Refresh::Full`]. A
//! [`Refresh::Field`] patches a single text block in place, and the result is
//! always identical to what a full rebuild would produce, because edit buffers
//! and to-do drafts come from [`UiState`] rather than from the previous tree.

use crate::binding::UiState;
use crate::commands::Refresh;
use crate::model::{Note, NoteField, NoteId, TodoId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListView {
    pub form: FormView,
    pub notes: Vec<NoteCard>,
}

/// The create-note form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: TextBlock,
    pub content: TextBlock,
    /// Current text of the to-do input row.
    pub todo_input: String,
    pub todos: Vec<TodoRow>,
    pub done_count: usize,
}

/// A title or content block. Read-only unless the field is being edited, in
/// which case `text` is the in-progress buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub field: NoteField,
    pub text: String,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoRow {
    pub id: TodoId,
    pub text: String,
    pub done: bool,
}

pub fn render(notes: &[Note], ui: &UiState) -> NoteListView {
    NoteListView {
        form: FormView {
            title: ui.form().title.clone(),
            content: ui.form().content.clone(),
        },
        notes: notes.iter().map(|note| render_note(note, ui)).collect(),
    }
}

pub fn render_note(note: &Note, ui: &UiState) -> NoteCard {
    NoteCard {
        id: note.id,
        title: text_block(note, NoteField::Title, ui),
        content: text_block(note, NoteField::Content, ui),
        todo_input: ui.todo_draft(note.id).to_string(),
        todos: note
            .todos
            .iter()
            .map(|t| TodoRow {
                id: t.id,
                text: t.text.clone(),
                done: t.done,
            })
            .collect(),
        done_count: note.todos.iter().filter(|t| t.done).count(),
    }
}

fn text_block(note: &Note, field: NoteField, ui: &UiState) -> TextBlock {
    match ui.edit_buffer(note.id, field) {
        Some(buffer) => TextBlock {
            field,
            text: buffer.to_string(),
            editable: true,
        },
        None => TextBlock {
            field,
            text: note.field(field).to_string(),
            editable: false,
        },
    }
}

impl NoteListView {
    /// Bring the tree up to date after an operation. `Field` patches one text
    /// block and falls back to a full rebuild when the card is missing.
    pub fn apply(&mut self, refresh: Refresh, notes: &[Note], ui: &UiState) {
        match refresh {
            Refresh::None => {}
            Refresh::Full => *self = render(notes, ui),
            Refresh::Field { note, field } => {
                let source = notes.iter().find(|n| n.id == note);
                let card = self.notes.iter_mut().find(|c| c.id == note);
                match (source, card) {
                    (Some(source), Some(card)) => {
                        let block = text_block(source, field, ui);
                        match field {
                            NoteField::Title => card.title = block,
                            NoteField::Content => card.content = block,
                        }
                    }
                    _ => *self = render(notes, ui),
                }
            }
        }
    }

    pub fn card(&self, id: NoteId) -> Option<&NoteCard> {
        self.notes.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
