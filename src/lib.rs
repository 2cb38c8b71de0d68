//! Pocket Notes: a note-taking app for handheld consoles.
//!
//! Everything is driven by a gamepad-style button set:
//! - a file browser over plain-text notes, with a hidden vault
//! - a line editor with a predictive character ribbon and word crank
//! - a diagram canvas of shapes and arrows
//! - bounded undo/redo in the editor and canvas
//! - a panic combo that swaps in a disguise screen

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← crossterm loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← frame pipeline
//! │  - Global gestures (vault, panic)                   │
//! │  - Screen transitions                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Screens       │   │ Input         │   │ Storage       │
//! │ (screens/)    │   │ (input/)      │   │ (storage/)    │
//! │ - Browser     │   │ - Buttons     │   │ - Disk notes  │
//! │ - Editor      │   │ - Key mapping │   │ - Vault       │
//! │ - Canvas      │   │ - Predictive  │   │ - Settings    │
//! │ - Settings    │   │   input       │   │               │
//! │ - Decoy       │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, UI and infrastructure                      │
//! │  - History, documents, canvas (domain/)             │
//! │  - Surface, themes, motion (ui/)                    │
//! │  - Data directory, system readout (infrastructure/) │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The binary takes `key=value` arguments:
//!
//! ```text
//! pocket-notes data_dir=~/notes theme=stealth trace_level=debug frame_ms=33
//! ```
//!
//! Recognised keys are `data_dir`, `theme`, `theme_file`, `trace_level`,
//! `frame_ms` and `hold_frames`. See [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use pocket_notes::{initialize, Config};
//!
//! let config = Config::default();
//! let controller = initialize(&config)?;
//! assert_eq!(controller.active(), pocket_notes::screens::ScreenId::Browser);
//! # Ok::<(), pocket_notes::NoteError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod screens;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{AppContext, ApplicationController};
pub use domain::{HistoryManager, NoteError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{DiskNoteStore, TomlSettingsStore};

const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_HOLD_FRAMES: u32 = 6;

/// Startup configuration for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of notes, vault, settings and trace file.
    pub data_dir: PathBuf,

    /// Built-in theme: `classic` or `stealth`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive, e.g. `debug` or `pocket_notes=trace`.
    pub trace_level: Option<String>,

    /// Target frame time in milliseconds.
    pub frame_ms: u64,

    /// Frames a key counts as held on terminals that never report releases.
    pub hold_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::default_data_dir(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            frame_ms: DEFAULT_FRAME_MS,
            hold_frames: DEFAULT_HOLD_FRAMES,
        }
    }
}

impl Config {
    /// Builds a config from `key=value` pairs. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// [`NoteError::Config`] if `frame_ms` or `hold_frames` is not a positive
    /// integer, or a key is unknown.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use pocket_notes::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/notes".to_string());
    /// map.insert("frame_ms".to_string(), "33".to_string());
    ///
    /// let config = Config::from_args(&map)?;
    /// assert_eq!(config.data_dir, std::path::PathBuf::from("/tmp/notes"));
    /// assert_eq!(config.frame_ms, 33);
    /// # Ok::<(), pocket_notes::NoteError>(())
    /// ```
    pub fn from_args(args: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in args {
            match key.as_str() {
                "data_dir" => config.data_dir = PathBuf::from(infrastructure::expand_tilde(value)),
                "theme" => config.theme_name = Some(value.clone()),
                "theme_file" => config.theme_file = Some(PathBuf::from(infrastructure::expand_tilde(value))),
                "trace_level" => config.trace_level = Some(value.clone()),
                "frame_ms" => config.frame_ms = positive(key, value)?,
                "hold_frames" => config.hold_frames = positive(key, value)?,
                _ => return Err(NoteError::Config(format!("unknown option '{key}'"))),
            }
        }
        Ok(config)
    }
}

fn positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .parse::<T>()
        .ok()
        .filter(|n| *n > T::default())
        .ok_or_else(|| NoteError::Config(format!("{key} must be a positive integer, got '{value}'")))
}

/// Opens the stores under `config.data_dir`, loads the theme and enters the
/// Browser.
///
/// A theme that fails to load falls back to the default with a warning.
///
/// # Errors
///
/// Returns an error if the note directories can't be created.
pub fn initialize(config: &Config) -> Result<ApplicationController> {
    let _span = tracing::debug_span!("initialize", data_dir = %config.data_dir.display()).entered();

    let notes = DiskNoteStore::new(&config.data_dir)?;
    let settings = TomlSettingsStore::new(&config.data_dir);
    let ctx = AppContext::new(Box::new(notes), Box::new(settings), &load_theme(config));

    tracing::info!("pocket notes initialized");
    Ok(ApplicationController::new(ctx))
}

fn load_theme(config: &Config) -> Theme {
    if let Some(path) = &config.theme_file {
        return Theme::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme file, using default");
            Theme::default()
        });
    }
    config.theme_name.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = %name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_when_empty() {
        let config = Config::from_args(&BTreeMap::new()).unwrap();
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
        assert_eq!(config.hold_frames, DEFAULT_HOLD_FRAMES);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn rejects_bad_numbers_and_unknown_keys() {
        assert!(matches!(Config::from_args(&args(&[("frame_ms", "0")])), Err(NoteError::Config(_))));
        assert!(matches!(Config::from_args(&args(&[("hold_frames", "x")])), Err(NoteError::Config(_))));
        assert!(matches!(Config::from_args(&args(&[("colour", "red")])), Err(NoteError::Config(_))));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).palette(), Theme::default().palette());
    }

    #[test]
    fn initialize_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let controller = initialize(&config).unwrap();
        assert_eq!(controller.active(), screens::ScreenId::Browser);
        assert!(dir.path().join(storage::disk::PUBLIC_DIR).is_dir());
    }
}
