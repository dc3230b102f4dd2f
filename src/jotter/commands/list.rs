use crate::commands::CmdResult;
use crate::error::{JotError, Result};
use crate::model::NoteId;
use crate::store::{NoteStore, SlotStorage};

/// All notes, in creation order.
pub fn run<B: SlotStorage>(store: &NoteStore<B>) -> Result<CmdResult> {
    let notes = store.notes().to_vec();
    Ok(CmdResult::default().with_listed_notes(notes))
}

/// A single note by id.
pub fn view<B: SlotStorage>(store: &NoteStore<B>, note_id: NoteId) -> Result<CmdResult> {
    let note = store
        .note(note_id)
        .cloned()
        .ok_or(JotError::NoteNotFound(note_id))?;
    Ok(CmdResult::default().with_listed_notes(vec![note]))
}
