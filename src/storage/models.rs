//! Storage record models.

use serde::{Deserialize, Serialize};

/// Marker shown in front of vault entries in the browser.
pub const LOCKED_MARKER: &str = "[LOCKED] ";

/// One note as listed by a [`NoteStore`](super::NoteStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// File name inside its directory.
    pub name: String,

    /// True when the note lives in the hidden vault.
    pub hidden: bool,
}

impl NoteEntry {
    #[must_use]
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
        }
    }

    #[must_use]
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: true,
        }
    }

    /// Name as shown to the user, with [`LOCKED_MARKER`] for vault entries.
    ///
    /// ```
    /// use pocket_notes::storage::NoteEntry;
    ///
    /// assert_eq!(NoteEntry::hidden("0x1f3.dat").display_name(), "[LOCKED] 0x1f3.dat");
    /// assert_eq!(NoteEntry::public("todo.txt").display_name(), "todo.txt");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.hidden {
            format!("{LOCKED_MARKER}{}", self.name)
        } else {
            self.name.clone()
        }
    }
}
