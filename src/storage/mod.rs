//! Storage layer for notes and settings.
//!
//! # Modules
//!
//! - `backend`: [`NoteStore`] and [`SettingsStore`] traits
//! - `disk`: public notes directory plus the hidden vault
//! - `memory`: in-memory stores used by tests
//! - `settings`: the [`Settings`] record and its TOML file backend
//! - `models`: storage record types

pub mod backend;
pub mod disk;
pub mod memory;
pub mod models;
pub mod settings;

pub use backend::{NoteStore, SettingsStore};
pub use disk::DiskNoteStore;
pub use memory::{MemoryNoteStore, MemorySettingsStore};
pub use models::NoteEntry;
pub use settings::{Settings, TomlSettingsStore};
