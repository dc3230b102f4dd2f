//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every jotter operation, whatever the host UI.
//!
//! It owns the [`NoteStore`], dispatches to `commands/*.rs`, and returns
//! structured [`CmdResult`]s. It holds no business logic, does no terminal
//! I/O, and never asks the user anything.
//!
//! ## Generic Over SlotStorage
//!
//! - Production: `JotterApi<FsBackend>`
//! - Testing: `JotterApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{Note, NoteField, NoteId, TodoId};
use crate::store::{NoteStore, SlotStorage};

pub struct JotterApi<B: SlotStorage> {
    store: NoteStore<B>,
}

impl<B: SlotStorage> JotterApi<B> {
    pub fn new(store: NoteStore<B>) -> Self {
        Self { store }
    }

    /// Load the store from `key` in `backend` and wrap it.
    pub fn open(backend: B, key: &str) -> Result<Self> {
        Ok(Self::new(NoteStore::load(backend, key)?))
    }

    pub fn create_note(&mut self, title: &str, content: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, content)
    }

    pub fn edit_note_field(
        &mut self,
        note_id: NoteId,
        field: NoteField,
        text: &str,
    ) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, note_id, field, text)
    }

    pub fn delete_note(&mut self, note_id: NoteId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, note_id)
    }

    pub fn add_todo(&mut self, note_id: NoteId, text: &str) -> Result<CmdResult> {
        commands::todos::add(&mut self.store, note_id, text)
    }

    pub fn toggle_todo(
        &mut self,
        note_id: NoteId,
        todo_id: TodoId,
        done: bool,
    ) -> Result<CmdResult> {
        commands::todos::toggle(&mut self.store, note_id, todo_id, done)
    }

    pub fn delete_todo(&mut self, note_id: NoteId, todo_id: TodoId) -> Result<CmdResult> {
        commands::todos::delete(&mut self.store, note_id, todo_id)
    }

    pub fn list_notes(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_note(&self, note_id: NoteId) -> Result<CmdResult> {
        commands::list::view(&self.store, note_id)
    }

    /// Borrowed access for rendering without cloning.
    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }

    pub fn slot_location(&self) -> String {
        self.store.slot_location()
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, Refresh};
