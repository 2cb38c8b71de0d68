//! In-memory stores for tests and ephemeral sessions.

use crate::domain::error::{NoteError, Result};
use crate::storage::backend::{NoteStore, SettingsStore};
use crate::storage::models::NoteEntry;
use crate::storage::settings::Settings;
use std::collections::BTreeMap;

/// Note store kept in two ordered maps.
///
/// Vault names are handed out sequentially (`0x000.dat`, `0x001.dat`, ...)
/// so tests can predict them.
#[derive(Debug, Default, Clone)]
pub struct MemoryNoteStore {
    public: BTreeMap<String, Vec<u8>>,
    hidden: BTreeMap<String, Vec<u8>>,
    next_hidden: u16,
    fail: bool,
}

impl MemoryNoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that seeds a public note.
    #[must_use]
    pub fn with_note(mut self, name: &str, body: &str) -> Self {
        self.public.insert(name.to_string(), body.as_bytes().to_vec());
        self
    }

    /// Builder that makes every operation fail, for degradation tests.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(NoteError::Storage("memory store configured to fail".to_string()))
        } else {
            Ok(())
        }
    }

    fn map(&self, hidden: bool) -> &BTreeMap<String, Vec<u8>> {
        if hidden {
            &self.hidden
        } else {
            &self.public
        }
    }
}

impl NoteStore for MemoryNoteStore {
    fn list(&self, include_hidden: bool) -> Result<Vec<NoteEntry>> {
        self.check()?;
        let mut entries: Vec<NoteEntry> = self.public.keys().map(NoteEntry::public).collect();
        if include_hidden {
            entries.extend(self.hidden.keys().map(NoteEntry::hidden));
        }
        Ok(entries)
    }

    fn read(&self, name: &str, hidden: bool) -> Result<Vec<u8>> {
        self.check()?;
        self.map(hidden)
            .get(name)
            .cloned()
            .ok_or_else(|| NoteError::Storage(format!("note not found: {name}")))
    }

    fn write(&mut self, name: &str, bytes: &[u8], hidden: bool) -> Result<()> {
        self.check()?;
        let map = if hidden { &mut self.hidden } else { &mut self.public };
        map.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn move_public_to_hidden(&mut self, name: &str) -> Result<String> {
        self.check()?;
        let bytes = self
            .public
            .remove(name)
            .ok_or_else(|| NoteError::Storage(format!("note not found: {name}")))?;
        let hidden_name = format!("0x{:03x}.dat", self.next_hidden & 0xfff);
        self.next_hidden = self.next_hidden.wrapping_add(1);
        self.hidden.insert(hidden_name.clone(), bytes);
        Ok(hidden_name)
    }
}

/// Settings store that keeps the last saved record and counts saves.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    saved: Option<Settings>,
    saves: usize,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            saved: Some(settings),
            saves: 0,
        }
    }

    #[must_use]
    pub fn saved(&self) -> Option<&Settings> {
        self.saved.as_ref()
    }

    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        self.saved = Some(settings.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_names_are_sequential() {
        let mut store = MemoryNoteStore::new().with_note("a.txt", "1").with_note("b.txt", "2");
        assert_eq!(store.move_public_to_hidden("a.txt").unwrap(), "0x000.dat");
        assert_eq!(store.move_public_to_hidden("b.txt").unwrap(), "0x001.dat");
        assert!(store.move_public_to_hidden("a.txt").is_err());
    }

    #[test]
    fn failing_store_fails_everything() {
        let mut store = MemoryNoteStore::failing();
        assert!(store.list(true).is_err());
        assert!(store.write("x", b"", false).is_err());
    }
}
