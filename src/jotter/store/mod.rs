//! # Storage Layer
//!
//! Jotter keeps its whole state in one named slot of a key-value store. The
//! slot holds a single JSON document (see [`crate::model::NotesDocument`])
//! that is read once at startup and overwritten wholesale after every
//! mutation.
//!
//! ## Split of Responsibilities
//!
//! - [`SlotStorage`] handles the "how": reading and writing a text blob by key.
//!   It knows nothing about notes.
//! - [`note_store::NoteStore`] handles the "what": decoding the document,
//!   owning the in-memory note list, allocating ids, and persisting.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key under a root directory,
//!   written atomically.
//! - [`mem_backend::MemBackend`]: in-memory map for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── notes.json      # The slot (key "notes" by default)
//! ├── config.json     # Configuration
//! └── logs/           # Rotating log files
//! ```

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod note_store;

pub use note_store::NoteStore;

/// Opaque get/set-by-key storage of a single text blob per key.
///
/// All methods take `&self`; the in-memory backend uses interior mutability.
pub trait SlotStorage {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// MUST be atomic so a crash never leaves a half-written document.
    fn write_slot(&self, key: &str, blob: &str) -> Result<()>;

    /// Human-readable location of the slot (a file path, or a virtual path).
    fn slot_location(&self, key: &str) -> String;
}

// Shared handle so a test can keep inspecting a backend after handing it to a store.
impl<T: SlotStorage + ?Sized> SlotStorage for std::rc::Rc<T> {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write_slot(key, blob)
    }

    fn slot_location(&self, key: &str) -> String {
        (**self).slot_location(key)
    }
}
