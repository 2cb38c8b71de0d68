//! Append-only trace file with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Rotate once the live file grows past this.
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;

/// Rotated files kept next to the live one.
const KEEP_ROTATED: usize = 2;

/// Line-oriented writer for the trace file.
///
/// The handle is opened on first write. When the file exceeds
/// [`ROTATE_AT_BYTES`] it is renamed to `<name>.<n>` and a fresh file is
/// started; only the newest [`KEEP_ROTATED`] rotations survive.
pub struct TraceFile {
    path: PathBuf,
    max_bytes: u64,
    handle: Mutex<Option<File>>,
}

impl TraceFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, ROTATE_AT_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes) {
            *handle = None;
            self.rotate()?;
        }

        let mut file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        writeln!(file, "{line}")?;
        file.flush()?;
        *handle = Some(file);
        Ok(())
    }

    /// Shifts `<name>.<n>` to `<name>.<n+1>`, dropping the oldest.
    fn rotate(&self) -> io::Result<()> {
        let _ = fs::remove_file(self.rotated(KEEP_ROTATED));
        for n in (1..KEEP_ROTATED).rev() {
            let from = self.rotated(n);
            if from.exists() {
                fs::rename(&from, self.rotated(n + 1))?;
            }
        }
        fs::rename(&self.path, self.rotated(1))
    }

    fn rotated(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }
}

impl std::fmt::Debug for TraceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = TraceFile::new(dir.path().join("t.json"));
        file.append("{}").unwrap();
        file.append("{\"a\":1}").unwrap();
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "{}\n{\"a\":1}\n");
    }

    #[test]
    fn rotates_and_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let file = TraceFile::with_limit(path.clone(), 4);

        for line in ["first", "second", "third", "fourth"] {
            file.append(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(dir.path().join("t.json.1")).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(dir.path().join("t.json.2")).unwrap(), "second\n");
        assert!(!dir.path().join("t.json.3").exists());
    }
}
