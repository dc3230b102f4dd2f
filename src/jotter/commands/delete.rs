use crate::commands::{CmdMessage, CmdResult, Refresh};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::{NoteStore, SlotStorage};
use log::{debug, info};

/// Remove a note together with all of its to-dos. Unknown ids are a no-op.
pub fn run<B: SlotStorage>(store: &mut NoteStore<B>, note_id: NoteId) -> Result<CmdResult> {
    let Some(note) = store.remove_note(note_id) else {
        debug!(
            "event=note_delete note={} status=skipped reason=missing",
            note_id
        );
        return Ok(CmdResult::unchanged());
    };
    store.persist()?;
    info!(
        "event=note_delete note={} todos={}",
        note_id,
        note.todos.len()
    );

    let mut result = CmdResult::default().with_refresh(Refresh::Full);
    result.add_message(CmdMessage::success(format!("Note deleted ({})", note_id)));
    result.affected_notes.push(note);
    Ok(result)
}
