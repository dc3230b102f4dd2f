use crate::commands::{clean, CmdMessage, CmdResult, Refresh};
use crate::error::{JotError, Result};
use crate::model::{NoteField, NoteId};
use crate::store::{NoteStore, SlotStorage};
use log::info;

/// Overwrite one text field of a note with the trimmed text.
///
/// Unlike creation, an edit may leave a field (or both) empty.
pub fn run<B: SlotStorage>(
    store: &mut NoteStore<B>,
    note_id: NoteId,
    field: NoteField,
    text: &str,
) -> Result<CmdResult> {
    let note = store
        .note_mut(note_id)
        .ok_or(JotError::NoteNotFound(note_id))?;
    note.set_field(field, clean(text));
    let note = note.clone();
    store.persist()?;
    info!("event=note_edit note={} field={}", note_id, field);

    let mut result = CmdResult::default().with_refresh(Refresh::Field {
        note: note_id,
        field,
    });
    result.add_message(CmdMessage::success(format!(
        "Note {} {} updated",
        note_id, field
    )));
    result.affected_notes.push(note);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::store::mem_backend::MemBackend;
    use crate::store::note_store::DEFAULT_SLOT_KEY;

    fn store_with_note() -> (NoteStore<MemBackend>, NoteId) {
        let mut store = NoteStore::load(MemBackend::new(), DEFAULT_SLOT_KEY).unwrap();
        create::run(&mut store, "Shopping", "eggs").unwrap();
        let id = store.notes()[0].id;
        (store, id)
    }

    #[test]
    fn edit_trims_title() {
        let (mut store, id) = store_with_note();
        let result = run(&mut store, id, NoteField::Title, "  Groceries  ").unwrap();
        assert_eq!(store.note(id).unwrap().title, "Groceries");
        assert_eq!(
            result.refresh,
            Refresh::Field {
                note: id,
                field: NoteField::Title
            }
        );
    }

    #[test]
    fn edit_may_empty_both_fields() {
        let (mut store, id) = store_with_note();
        run(&mut store, id, NoteField::Title, "").unwrap();
        run(&mut store, id, NoteField::Content, "   ").unwrap();
        let note = store.note(id).unwrap();
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn edit_persists_immediately() {
        let (mut store, id) = store_with_note();
        let writes = store.backend().write_count();
        run(&mut store, id, NoteField::Content, "milk").unwrap();
        assert_eq!(store.backend().write_count(), writes + 1);
        let raw = store.backend().raw(DEFAULT_SLOT_KEY).unwrap();
        assert!(raw.contains("\"milk\""));
    }

    #[test]
    fn edit_unknown_note_is_an_error() {
        let (mut store, id) = store_with_note();
        let err = run(&mut store, id + 100, NoteField::Title, "x").unwrap_err();
        assert!(matches!(err, JotError::NoteNotFound(_)));
    }
}
