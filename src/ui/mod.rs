//! User interface layer: surfaces, themes and the terminal session.
//!
//! Screens render into a [`Surface`]. The interactive host uses an
//! [`AnsiSurface`] presented to stdout inside a [`TerminalSession`]; tests use a
//! [`RecordingSurface`].
//!
//! ```text
//! Screen::render → Surface (cell grid) → AnsiSurface::present → terminal
//! ```
//!
//! # Modules
//!
//! - [`surface`]: the [`Surface`] trait, colors, rectangles, recording surface
//! - [`ansi`]: ANSI cell-grid surface
//! - [`theme`]: TOML themes and ANSI escape helpers
//! - [`motion`]: frame-rate independent smoothing
//! - [`terminal`]: raw mode / alternate screen session

pub mod ansi;
pub mod motion;
pub mod surface;
pub mod terminal;
pub mod theme;

pub use ansi::AnsiSurface;
pub use surface::{Color, DrawCall, Rect, RecordingSurface, Surface};
pub use terminal::TerminalSession;
pub use theme::{Palette, Theme};
