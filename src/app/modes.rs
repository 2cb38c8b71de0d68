//! User-selectable modes stored in the settings record.
//!
//! Each enum serializes as a kebab-case string and knows how to step forward
//! and backward through its variants, which is how the settings menu edits
//! them.
//!
//! ```
//! use pocket_notes::app::modes::DecoyMode;
//!
//! assert_eq!(DecoyMode::BlackScreen.next(), DecoyMode::FakeUpdate);
//! assert_eq!(DecoyMode::FakeUpdate.prev(), DecoyMode::BlackScreen);
//! ```

use serde::{Deserialize, Serialize};

/// Character order of the editor ribbon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardLayout {
    #[default]
    Standard,
    Alphabetical,
}

impl KeyboardLayout {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::Alphabetical,
            Self::Alphabetical => Self::Standard,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "QWERTY",
            Self::Alphabetical => "ABC",
        }
    }
}

/// Disguise shown by the panic combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecoyMode {
    /// Scrolling firmware-update log.
    #[default]
    FakeUpdate,
    /// Crash dump.
    ErrorLog,
    BlackScreen,
}

impl DecoyMode {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::FakeUpdate => Self::ErrorLog,
            Self::ErrorLog => Self::BlackScreen,
            Self::BlackScreen => Self::FakeUpdate,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::FakeUpdate => Self::BlackScreen,
            Self::ErrorLog => Self::FakeUpdate,
            Self::BlackScreen => Self::ErrorLog,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FakeUpdate => "Fake Update",
            Self::ErrorLog => "Error Log",
            Self::BlackScreen => "Black Screen",
        }
    }
}

/// Page layout applied to new editor documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteTemplate {
    /// Single column bullet journal.
    #[default]
    RapidLog,
    /// Cue column on the left, summary band at the bottom.
    Cornell,
    /// Three columns.
    Charting,
}

impl NoteTemplate {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::RapidLog => Self::Cornell,
            Self::Cornell => Self::Charting,
            Self::Charting => Self::RapidLog,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::RapidLog => Self::Charting,
            Self::Cornell => Self::RapidLog,
            Self::Charting => Self::Cornell,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RapidLog => "Daily Log",
            Self::Cornell => "Cornell",
            Self::Charting => "Charting",
        }
    }
}
