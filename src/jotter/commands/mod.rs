//! # Command Layer
//!
//! The mutation contract of jotter. Each submodule implements one or more
//! operations as plain functions over a [`NoteStore`](crate::store::NoteStore).
//!
//! ## Contract
//!
//! Every mutating command is one atomic step on the in-memory note list
//! followed immediately by [`persist`](crate::store::NoteStore::persist).
//! Commands that turn out to be no-ops (blank text, unknown ids) change
//! nothing and do not persist.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no stdout, no prompts, no terminal.
//! - **User interaction**: delete confirmation belongs to the binding layer.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], carrying the affected notes, messages with
//! a [`MessageLevel`], and a [`Refresh`] hint that tells the host how much of
//! the view has to be rebuilt.
//!
//! ## Command Modules
//!
//! - [`create`]: Create notes
//! - [`edit`]: Overwrite a note's title or content
//! - [`delete`]: Remove notes
//! - [`todos`]: Add, toggle and remove to-dos
//! - [`list`]: Read notes back

use crate::model::{Note, NoteField, NoteId};
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod todos;

/// How the host must update its view after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    /// Nothing changed.
    #[default]
    None,
    /// One text block changed (an edit began or was committed); only this
    /// field needs repainting.
    Field { note: NoteId, field: NoteField },
    /// Membership, ordering or to-do state changed; rebuild everything.
    Full,
}

impl Refresh {
    /// Combine two hints, keeping the stronger one.
    pub fn merge(self, other: Refresh) -> Refresh {
        match (self, other) {
            (Refresh::Full, _) | (_, Refresh::Full) => Refresh::Full,
            (Refresh::None, r) => r,
            (r, Refresh::None) => r,
            (a, b) if a == b => a,
            _ => Refresh::Full,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub messages: Vec<CmdMessage>,
    pub refresh: Refresh,
}

impl CmdResult {
    /// Result of an operation that left the store untouched.
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn is_noop(&self) -> bool {
        self.refresh == Refresh::None
    }
}

/// Trim user text the way every mutation stores it.
pub(crate) fn clean(text: &str) -> String {
    text.trim().to_string()
}
