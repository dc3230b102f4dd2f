//! # Jotter Architecture
//!
//! Jotter keeps notes, each with a title, a free-text body and a checklist of
//! to-dos, in one local storage slot. It is a **UI-agnostic library** with a
//! terminal client (`jot`); the same core could back a GUI or a web widget.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (cli/, wired by main.rs)                              │
//! │  - Parses arguments, renders the view, prompts, exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ gestures
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Input Binding (binding.rs)                                 │
//! │  - Gesture → operation, edit state machine, drafts          │
//! │  - Delete confirmation through the `Confirm` trait          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │                    ▲
//!                              ▼                    │ render
//! ┌──────────────────────────────────┐   ┌──────────────────────┐
//! │  API facade (api.rs) +           │   │  View (view.rs)      │
//! │  Commands (commands/*.rs)        │──▶│  notes → visual tree │
//! │  - mutate, then persist          │   └──────────────────────┘
//! └──────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - NoteStore: in-memory list, ids, load/persist             │
//! │  - SlotStorage: FsBackend (production), MemBackend (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `binding.rs` inward, code never writes to stdout/stderr, never exits
//! the process and never reads the terminal. The one question the core asks
//! the user (delete confirmation) goes through a trait the host implements.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`binding`]: Gesture handling and UI state
//! - [`commands`]: The mutation contract
//! - [`view`]: Projection from notes to a visual tree
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Note`, `Todo`, `NotesDocument`)
//! - [`config`]: Configuration management
//! - [`logging`]: File logging bootstrap
//! - [`error`]: Error types

pub mod api;
pub mod binding;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;
