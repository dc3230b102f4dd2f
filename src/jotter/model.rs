//! Core data types: [`Note`], [`Todo`] and the persisted [`NotesDocument`].

use crate::error::JotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type NoteId = u64;
pub type TodoId = u64;

/// Shape tag written into every persisted document.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl Note {
    pub fn new(id: NoteId, title: String, content: String) -> Self {
        Self {
            id,
            title,
            content,
            todos: Vec::new(),
        }
    }

    pub fn field(&self, field: NoteField) -> &str {
        match field {
            NoteField::Title => &self.title,
            NoteField::Content => &self.content,
        }
    }

    pub fn set_field(&mut self, field: NoteField, text: String) {
        match field {
            NoteField::Title => self.title = text,
            NoteField::Content => self.content = text,
        }
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    /// Highest id used by this note or any of its to-dos.
    pub fn max_id(&self) -> u64 {
        self.todos
            .iter()
            .map(|t| t.id)
            .fold(self.id, std::cmp::max)
    }
}

/// The two editable text fields of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteField {
    Title,
    Content,
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteField::Title => write!(f, "title"),
            NoteField::Content => write!(f, "content"),
        }
    }
}

impl FromStr for NoteField {
    type Err = JotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" | "t" => Ok(NoteField::Title),
            "content" | "body" | "c" => Ok(NoteField::Content),
            other => Err(JotError::Api(format!(
                "Unknown note field '{}': expected title or content",
                other
            ))),
        }
    }
}

/// The versioned envelope written to the storage slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesDocument {
    pub version: u32,
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl NotesDocument {
    pub fn new(notes: Vec<Note>, next_id: u64) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            next_id,
            notes,
        }
    }
}

/// Everything that may be found in the slot.
///
/// A bare array is the unversioned shape with the same note schema.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoredDocument {
    Versioned(NotesDocument),
    Legacy(Vec<Note>),
}

impl StoredDocument {
    pub fn version(&self) -> u32 {
        match self {
            StoredDocument::Versioned(doc) => doc.version,
            StoredDocument::Legacy(_) => 0,
        }
    }

    pub fn into_parts(self) -> (Vec<Note>, u64) {
        match self {
            StoredDocument::Versioned(doc) => (doc.notes, doc.next_id),
            StoredDocument::Legacy(notes) => (notes, 0),
        }
    }
}
