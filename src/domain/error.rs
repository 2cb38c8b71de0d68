//! Error types for Pocket Notes.
//!
//! This module defines the centralized error type [`NoteError`] and a type alias
//! [`Result`] used by every fallible collaborator (note store, settings store,
//! theme loader, terminal host). The screen state machine itself never fails;
//! errors stop at the controller context, which logs them and substitutes an
//! empty or default value.

use thiserror::Error;

/// The main error type for Pocket Notes operations.
///
/// Most variants carry a human-readable description. I/O failures convert
/// automatically from `std::io::Error`.
///
/// # Examples
///
/// ```
/// use pocket_notes::NoteError;
///
/// fn open_note(name: &str) -> Result<(), NoteError> {
///     Err(NoteError::Storage(format!("note '{name}' is missing")))
/// }
///
/// assert!(open_note("todo.txt").is_err());
/// ```
#[derive(Debug, Error)]
pub enum NoteError {
    /// Note store operation failed.
    ///
    /// Occurs when a note cannot be listed, read, written or moved into the
    /// vault.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed or serialized.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Theme parsing failed.
    ///
    /// Occurs when a built-in or user-supplied TOML theme is malformed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Terminal setup or restore failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Pocket Notes operations.
pub type Result<T> = std::result::Result<T, NoteError>;
