//! Input layer: buttons, event sources, key mapping and predictive entry.
//!
//! - [`keys`]: [`Button`], [`InputEvent`] and [`HeldKeys`]
//! - [`source`]: the [`InputSource`] trait and [`QueuedInput`]
//! - [`keymap`]: crossterm key events to buttons
//! - [`predictive`]: ribbon/crank text entry used by the editor

pub mod keymap;
pub mod keys;
pub mod predictive;
pub mod source;

pub use keys::{Button, HeldKeys, InputEvent};
pub use predictive::PredictiveInput;
pub use source::{InputSource, QueuedInput};
