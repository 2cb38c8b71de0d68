//! Infrastructure layer for filesystem and host environment interactions.
//!
//! - [`paths`]: data directory resolution and tilde expansion
//! - [`system`]: memory and battery readout

pub mod paths;
pub mod system;

pub use paths::{default_data_dir, expand_tilde};
pub use system::SystemReadout;
