//! Filesystem note store.
//!
//! Public notes are plain files in `<data>/Notes/Public/`. Vault notes live in
//! `<data>/.sys_cache/` under opaque `0x???.dat` names with every byte XORed
//! with [`VAULT_KEY`]. The transform only keeps casual readers out; it is not
//! encryption.
//!
//! All writes go to a temporary file first and are renamed into place.

use crate::domain::error::{NoteError, Result};
use crate::storage::backend::NoteStore;
use crate::storage::models::NoteEntry;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::path::{Path, PathBuf};

pub const PUBLIC_DIR: &str = "Notes/Public";
pub const HIDDEN_DIR: &str = ".sys_cache";

/// Byte key of the vault transform.
pub const VAULT_KEY: u8 = 0x5A;

/// Attempts at finding an unused vault name before giving up.
const NAME_ATTEMPTS: usize = 64;

/// Applies the vault transform in place. Applying it twice is the identity.
pub fn xor_in_place(bytes: &mut [u8]) {
    for byte in bytes {
        *byte ^= VAULT_KEY;
    }
}

/// Note store backed by two directories under a data root.
///
/// # Examples
///
/// ```no_run
/// use pocket_notes::storage::{DiskNoteStore, NoteStore};
///
/// let mut store = DiskNoteStore::new("/tmp/pocket-notes")?;
/// store.write("groceries.txt", b"* [ ] eggs\n", false)?;
/// # Ok::<(), pocket_notes::NoteError>(())
/// ```
pub struct DiskNoteStore {
    public_dir: PathBuf,
    hidden_dir: PathBuf,
}

impl DiskNoteStore {
    /// Opens the store, creating both directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let public_dir = data_dir.join(PUBLIC_DIR);
        let hidden_dir = data_dir.join(HIDDEN_DIR);

        tracing::debug!(public = ?public_dir, hidden = ?hidden_dir, "initializing disk note store");
        std::fs::create_dir_all(&public_dir)?;
        std::fs::create_dir_all(&hidden_dir)?;

        Ok(Self {
            public_dir,
            hidden_dir,
        })
    }

    fn dir(&self, hidden: bool) -> &Path {
        if hidden {
            &self.hidden_dir
        } else {
            &self.public_dir
        }
    }

    /// Resolves `name` inside its directory, refusing anything that is not a
    /// bare file name.
    fn note_path(&self, name: &str, hidden: bool) -> Result<PathBuf> {
        let is_bare = !name.is_empty()
            && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
            && name != "."
            && name != "..";
        if !is_bare {
            return Err(NoteError::Storage(format!("invalid note name: {name:?}")));
        }
        Ok(self.dir(hidden).join(name))
    }

    fn list_dir(dir: &Path, hidden: bool) -> Result<Vec<NoteEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.ends_with(".tmp") {
                continue;
            }
            entries.push(NoteEntry { name, hidden });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Picks an unused `0x???.dat` name in the vault.
    fn fresh_hidden_name(&self) -> Result<String> {
        let state = RandomState::new();
        for attempt in 0..NAME_ATTEMPTS {
            let mut hasher = state.build_hasher();
            hasher.write_usize(attempt);
            let name = format!("0x{:03x}.dat", hasher.finish() & 0xfff);
            if !self.hidden_dir.join(&name).exists() {
                return Ok(name);
            }
        }
        Err(NoteError::Storage("vault has no free names left".to_string()))
    }
}

impl NoteStore for DiskNoteStore {
    fn list(&self, include_hidden: bool) -> Result<Vec<NoteEntry>> {
        let _span = tracing::debug_span!("disk_list_notes", include_hidden).entered();

        let mut entries = Self::list_dir(&self.public_dir, false)?;
        if include_hidden {
            entries.extend(Self::list_dir(&self.hidden_dir, true)?);
        }

        tracing::debug!(count = entries.len(), "listed notes");
        Ok(entries)
    }

    fn read(&self, name: &str, hidden: bool) -> Result<Vec<u8>> {
        let _span = tracing::debug_span!("disk_read_note", name = %name, hidden).entered();

        let mut bytes = std::fs::read(self.note_path(name, hidden)?)?;
        if hidden {
            xor_in_place(&mut bytes);
        }

        tracing::debug!(len = bytes.len(), "note read");
        Ok(bytes)
    }

    fn write(&mut self, name: &str, bytes: &[u8], hidden: bool) -> Result<()> {
        let _span = tracing::debug_span!("disk_write_note", name = %name, hidden, len = bytes.len()).entered();

        let path = self.note_path(name, hidden)?;
        if hidden {
            let mut encoded = bytes.to_vec();
            xor_in_place(&mut encoded);
            Self::write_atomic(&path, &encoded)?;
        } else {
            Self::write_atomic(&path, bytes)?;
        }

        tracing::debug!("note written");
        Ok(())
    }

    fn move_public_to_hidden(&mut self, name: &str) -> Result<String> {
        let _span = tracing::debug_span!("disk_hide_note", name = %name).entered();

        let source = self.note_path(name, false)?;
        let mut bytes = std::fs::read(&source)?;
        xor_in_place(&mut bytes);

        let hidden_name = self.fresh_hidden_name()?;
        Self::write_atomic(&self.hidden_dir.join(&hidden_name), &bytes)?;
        std::fs::remove_file(&source)?;

        tracing::info!(hidden_name = %hidden_name, "note moved to vault");
        Ok(hidden_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_an_involution() {
        let mut bytes = b"secret plans".to_vec();
        xor_in_place(&mut bytes);
        assert_ne!(bytes, b"secret plans");
        xor_in_place(&mut bytes);
        assert_eq!(bytes, b"secret plans");
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskNoteStore::new(dir.path()).unwrap();
        assert!(store.write("../escape.txt", b"x", false).is_err());
        assert!(store.write("", b"x", false).is_err());
        assert!(store.read("a/b", false).is_err());
    }

    #[test]
    fn hidden_files_are_scrambled_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskNoteStore::new(dir.path()).unwrap();
        store.write("plain.txt", b"hello", false).unwrap();

        let hidden = store.move_public_to_hidden("plain.txt").unwrap();
        assert!(hidden.starts_with("0x") && hidden.ends_with(".dat"), "{hidden}");
        assert_eq!(hidden.len(), "0x000.dat".len());

        let raw = std::fs::read(dir.path().join(HIDDEN_DIR).join(&hidden)).unwrap();
        assert_ne!(raw, b"hello");
        assert_eq!(store.read(&hidden, true).unwrap(), b"hello");
        assert!(!dir.path().join(PUBLIC_DIR).join("plain.txt").exists());
    }

    #[test]
    fn listing_is_sorted_and_skips_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskNoteStore::new(dir.path()).unwrap();
        store.write("b.txt", b"", false).unwrap();
        store.write("a.txt", b"", false).unwrap();
        std::fs::write(dir.path().join(PUBLIC_DIR).join("c.tmp"), b"").unwrap();

        let names: Vec<String> = store.list(false).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }
}
