use crate::commands::{clean, CmdMessage, CmdResult, Refresh};
use crate::error::Result;
use crate::model::Note;
use crate::store::{NoteStore, SlotStorage};
use log::{debug, info};

/// Append a new note. Both fields blank (after trimming) is a silent no-op.
pub fn run<B: SlotStorage>(
    store: &mut NoteStore<B>,
    title: &str,
    content: &str,
) -> Result<CmdResult> {
    let title = clean(title);
    let content = clean(content);
    if title.is_empty() && content.is_empty() {
        debug!("event=note_create status=skipped reason=blank");
        return Ok(CmdResult::unchanged());
    }

    let id = store.allocate_id()?;
    let note = Note::new(id, title, content);
    store.push_note(note.clone());
    store.persist()?;
    info!("event=note_create note={}", id);

    let mut result = CmdResult::default().with_refresh(Refresh::Full);
    result.add_message(CmdMessage::success(format!("Note created ({})", id)));
    result.affected_notes.push(note);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::note_store::DEFAULT_SLOT_KEY;

    fn empty_store() -> NoteStore<MemBackend> {
        NoteStore::load(MemBackend::new(), DEFAULT_SLOT_KEY).unwrap()
    }

    #[test]
    fn blank_note_is_rejected() {
        let mut store = empty_store();
        let result = run(&mut store, "", "").unwrap();
        assert!(result.is_noop());
        assert!(result.messages.is_empty());

        run(&mut store, "   ", "\n\t ").unwrap();
        assert!(store.notes().is_empty());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn title_only_or_content_only_is_accepted() {
        let mut store = empty_store();
        run(&mut store, "a", "").unwrap();
        assert_eq!(store.notes().len(), 1);
        run(&mut store, "", "b").unwrap();
        assert_eq!(store.notes().len(), 2);
    }

    #[test]
    fn fields_are_trimmed_and_todos_empty() {
        let mut store = empty_store();
        let result = run(&mut store, "  Trip ", " Pack bags\n").unwrap();
        assert_eq!(result.refresh, Refresh::Full);
        let note = &store.notes()[0];
        assert_eq!(note.title, "Trip");
        assert_eq!(note.content, "Pack bags");
        assert!(note.todos.is_empty());
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn exhausted_ids_fail_without_writing() {
        let backend = MemBackend::new();
        backend.set_raw(
            DEFAULT_SLOT_KEY,
            r#"{"version":1,"next_id":18446744073709551615,"notes":[]}"#,
        );
        let mut store = NoteStore::load(backend, DEFAULT_SLOT_KEY).unwrap();

        assert!(run(&mut store, "one too many", "").is_err());
        assert!(store.notes().is_empty());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn rapid_creation_never_collides() {
        let mut store = empty_store();
        for i in 0..50 {
            run(&mut store, &format!("n{}", i), "").unwrap();
        }
        let mut ids: Vec<_> = store.notes().iter().map(|n| n.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
