//! Storage backend abstractions.
//!
//! [`NoteStore`] holds note bodies, public or hidden in the vault;
//! [`SettingsStore`] holds the flat settings record. Both report failures as
//! [`NoteError`](crate::NoteError). The application context decides how to
//! degrade; backends never swallow errors themselves.

use crate::domain::error::Result;
use crate::storage::models::NoteEntry;
use crate::storage::settings::Settings;

/// Persistent note bodies.
///
/// # Implementations
///
/// - [`DiskNoteStore`](super::DiskNoteStore): files under a data directory
/// - [`MemoryNoteStore`](super::MemoryNoteStore): in-memory map
///
/// # Examples
///
/// ```
/// use pocket_notes::storage::{MemoryNoteStore, NoteStore};
///
/// let mut store = MemoryNoteStore::new();
/// store.write("todo.txt", b"* [ ] milk\n", false)?;
/// store.move_public_to_hidden("todo.txt")?;
///
/// assert!(store.list(false)?.is_empty());
/// assert_eq!(store.list(true)?.len(), 1);
/// # Ok::<(), pocket_notes::NoteError>(())
/// ```
pub trait NoteStore {
    /// Lists public notes, followed by vault notes when `include_hidden`.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    fn list(&self, include_hidden: bool) -> Result<Vec<NoteEntry>>;

    /// Reads a note body, undoing the vault transform for hidden notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the note does not exist or cannot be read.
    fn read(&self, name: &str, hidden: bool) -> Result<Vec<u8>>;

    /// Creates or replaces a note body.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be written.
    fn write(&mut self, name: &str, bytes: &[u8], hidden: bool) -> Result<()>;

    /// Moves a public note into the vault under an opaque name.
    ///
    /// Returns the vault name.
    ///
    /// # Errors
    ///
    /// Returns an error if the note is missing or the move fails.
    fn move_public_to_hidden(&mut self, name: &str) -> Result<String>;
}

/// Persistent settings record.
pub trait SettingsStore {
    /// Loads the stored settings, or defaults when nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if stored settings exist but cannot be read or parsed.
    fn load(&self) -> Result<Settings>;

    /// Stores `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    fn save(&mut self, settings: &Settings) -> Result<()>;
}
