//! The in-memory note list and its load/persist contract.
//!
//! [`NoteStore`] is the single owner of every [`Note`] and [`crate::model::Todo`].
//! It is loaded once from a [`SlotStorage`] slot and written back in full by
//! [`NoteStore::persist`], which the command layer calls after every mutation.
//!
//! Loading never fails on bad data: an absent slot, invalid JSON, a document
//! of the wrong shape or of an unknown version all yield an empty list (the
//! last three with a warning in the log). Only backend I/O errors propagate.

use super::SlotStorage;
use crate::error::{JotError, Result};
use crate::model::{Note, NoteId, StoredDocument, DOCUMENT_VERSION};
use log::{debug, info, warn};
use serde::Serialize;

pub const DEFAULT_SLOT_KEY: &str = "notes";

/// Never handed out. A counter at this value means every id is taken.
const EXHAUSTED: u64 = u64::MAX;

/// Borrowed view of [`crate::model::NotesDocument`] so persisting does not
/// clone the note list.
#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    next_id: u64,
    notes: &'a [Note],
}

pub struct NoteStore<B: SlotStorage> {
    backend: B,
    key: String,
    notes: Vec<Note>,
    next_id: u64,
}

impl<B: SlotStorage> NoteStore<B> {
    /// Read the slot and build the store. Runs once at startup.
    pub fn load(backend: B, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let (notes, stored_next_id) = match backend.read_slot(&key)? {
            Some(blob) => decode(&blob, &key),
            None => {
                debug!("event=store_load slot={} status=absent", key);
                (Vec::new(), 0)
            }
        };

        let next_id = next_free_id(&notes, stored_next_id);
        info!(
            "event=store_load slot={} notes={} next_id={}",
            key,
            notes.len(),
            next_id
        );

        Ok(Self {
            backend,
            key,
            notes,
            next_id,
        })
    }

    /// Serialize the whole document and overwrite the slot.
    pub fn persist(&self) -> Result<()> {
        let doc = DocumentRef {
            version: DOCUMENT_VERSION,
            next_id: self.next_id,
            notes: &self.notes,
        };
        let blob = serde_json::to_string_pretty(&doc).map_err(JotError::Serialization)?;
        self.backend.write_slot(&self.key, &blob)?;
        debug!(
            "event=store_persist slot={} notes={} bytes={}",
            self.key,
            self.notes.len(),
            blob.len()
        );
        Ok(())
    }

    /// Hand out a fresh id. Notes and to-dos share one sequence, so an id is
    /// never reused for either kind.
    pub fn allocate_id(&mut self) -> Result<u64> {
        if self.next_id == EXHAUSTED {
            warn!("event=id_allocate slot={} status=exhausted", self.key);
            return Err(JotError::Store("id space exhausted".to_string()));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    pub fn push_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Remove a note, keeping the order of the rest.
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let pos = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(pos))
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn slot_location(&self) -> String {
        self.backend.slot_location(&self.key)
    }
}

fn decode(blob: &str, key: &str) -> (Vec<Note>, u64) {
    match serde_json::from_str::<StoredDocument>(blob) {
        Ok(doc) if doc.version() <= DOCUMENT_VERSION => {
            if doc.version() < DOCUMENT_VERSION {
                info!(
                    "event=store_load slot={} legacy_version={}",
                    key,
                    doc.version()
                );
            }
            doc.into_parts()
        }
        Ok(doc) => {
            warn!(
                "event=store_load slot={} status=unsupported_version version={}",
                key,
                doc.version()
            );
            (Vec::new(), 0)
        }
        Err(err) => {
            warn!(
                "event=store_load slot={} status=malformed error={}",
                key, err
            );
            (Vec::new(), 0)
        }
    }
}

fn next_free_id(notes: &[Note], stored: u64) -> u64 {
    let past_max = notes
        .iter()
        .map(Note::max_id)
        .max()
        .map_or(1, |max| max.checked_add(1).unwrap_or(EXHAUSTED));
    stored.max(past_max).max(1)
}
