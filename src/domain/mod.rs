//! Domain layer: error type, history engine and document models.
//!
//! Nothing in this layer performs I/O. Screens own instances of these types
//! and the storage layer serializes them.
//!
//! - [`error`]: [`NoteError`] and the crate [`Result`] alias
//! - [`history`]: generic [`HistoryManager`] used by the editor and canvas
//! - [`document`]: editor lines and their stored text format
//! - [`canvas`]: canvas shapes, arrows and snapshots

pub mod canvas;
pub mod document;
pub mod error;
pub mod history;

pub use canvas::{Arrow, CanvasSnapshot, Shape, ShapeKind};
pub use document::Line;
pub use error::{NoteError, Result};
pub use history::HistoryManager;
