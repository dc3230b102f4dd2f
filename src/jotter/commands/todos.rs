//! To-do operations: checklist items hanging off a note.
//!
//! To-do text is fixed once created; only `done` and existence change.
//! References to notes or to-dos that no longer exist are no-ops, since a
//! host may still be showing a row that was removed a moment ago.

use crate::commands::{clean, CmdMessage, CmdResult, Refresh};
use crate::error::Result;
use crate::model::{NoteId, Todo, TodoId};
use crate::store::{NoteStore, SlotStorage};
use log::{debug, info};

/// Append a to-do to a note. Blank text is a silent no-op.
pub fn add<B: SlotStorage>(
    store: &mut NoteStore<B>,
    note_id: NoteId,
    text: &str,
) -> Result<CmdResult> {
    let text = clean(text);
    if text.is_empty() {
        debug!(
            "event=todo_add note={} status=skipped reason=blank",
            note_id
        );
        return Ok(CmdResult::unchanged());
    }
    if store.note(note_id).is_none() {
        debug!(
            "event=todo_add note={} status=skipped reason=missing",
            note_id
        );
        return Ok(CmdResult::unchanged());
    }

    let todo_id = store.allocate_id()?;
    let note = match store.note_mut(note_id) {
        Some(note) => {
            note.todos.push(Todo::new(todo_id, text));
            note.clone()
        }
        None => return Ok(CmdResult::unchanged()),
    };
    store.persist()?;
    info!("event=todo_add note={} todo={}", note_id, todo_id);

    let mut result = CmdResult::default().with_refresh(Refresh::Full);
    result.add_message(CmdMessage::success(format!(
        "To-do added ({}/{})",
        note_id, todo_id
    )));
    result.affected_notes.push(note);
    Ok(result)
}

/// Set a to-do's `done` flag.
pub fn toggle<B: SlotStorage>(
    store: &mut NoteStore<B>,
    note_id: NoteId,
    todo_id: TodoId,
    done: bool,
) -> Result<CmdResult> {
    let Some(note) = store.note_mut(note_id) else {
        debug!(
            "event=todo_toggle note={} status=skipped reason=missing_note",
            note_id
        );
        return Ok(CmdResult::unchanged());
    };
    let Some(todo) = note.todo_mut(todo_id) else {
        debug!(
            "event=todo_toggle todo={} status=skipped reason=missing",
            todo_id
        );
        return Ok(CmdResult::unchanged());
    };
    todo.done = done;
    let note = note.clone();
    store.persist()?;
    info!(
        "event=todo_toggle note={} todo={} done={}",
        note_id, todo_id, done
    );

    let mut result = CmdResult::default().with_refresh(Refresh::Full);
    let verb = if done { "done" } else { "not done" };
    result.add_message(CmdMessage::success(format!(
        "To-do marked {} ({}/{})",
        verb, note_id, todo_id
    )));
    result.affected_notes.push(note);
    Ok(result)
}

/// Remove a to-do from a note. Unknown ids are a no-op.
pub fn delete<B: SlotStorage>(
    store: &mut NoteStore<B>,
    note_id: NoteId,
    todo_id: TodoId,
) -> Result<CmdResult> {
    let Some(note) = store.note_mut(note_id) else {
        debug!(
            "event=todo_delete note={} status=skipped reason=missing_note",
            note_id
        );
        return Ok(CmdResult::unchanged());
    };
    let before = note.todos.len();
    note.todos.retain(|t| t.id != todo_id);
    if note.todos.len() == before {
        debug!(
            "event=todo_delete todo={} status=skipped reason=missing",
            todo_id
        );
        return Ok(CmdResult::unchanged());
    }
    let note = note.clone();
    store.persist()?;
    info!("event=todo_delete note={} todo={}", note_id, todo_id);

    let mut result = CmdResult::default().with_refresh(Refresh::Full);
    result.add_message(CmdMessage::success(format!(
        "To-do deleted ({}/{})",
        note_id, todo_id
    )));
    result.affected_notes.push(note);
    Ok(result)
}
