//! Persisted user settings and the TOML file backend.

use crate::app::modes::{DecoyMode, KeyboardLayout, NoteTemplate};
use crate::domain::error::{NoteError, Result};
use crate::storage::backend::SettingsStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SMOOTHING_MIN: f32 = 0.1;
pub const SMOOTHING_MAX: f32 = 0.5;
pub const SMOOTHING_STEP: f32 = 0.05;
pub const SMOOTHING_DEFAULT: f32 = 0.22;

/// Flat settings record.
///
/// Keys are kebab-case in the TOML file; missing keys take their defaults.
///
/// ```
/// use pocket_notes::storage::Settings;
///
/// let settings: Settings = toml::from_str("stealth-visual-mode = true").unwrap();
/// assert!(settings.stealth_visual_mode);
/// assert!((settings.smoothing_strength - 0.22).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub keyboard_layout: KeyboardLayout,
    pub smoothing_strength: f32,
    pub stealth_visual_mode: bool,
    pub decoy_mode: DecoyMode,
    pub default_template: NoteTemplate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyboard_layout: KeyboardLayout::default(),
            smoothing_strength: SMOOTHING_DEFAULT,
            stealth_visual_mode: false,
            decoy_mode: DecoyMode::default(),
            default_template: NoteTemplate::default(),
        }
    }
}

impl Settings {
    /// Moves the smoothing strength by `steps` increments, clamped to range
    /// and rounded to two decimals.
    pub fn step_smoothing(&mut self, steps: i32) {
        #[allow(clippy::cast_precision_loss)]
        let raw = self.smoothing_strength + steps as f32 * SMOOTHING_STEP;
        self.smoothing_strength = round2(raw.clamp(SMOOTHING_MIN, SMOOTHING_MAX));
    }

    /// Brings out-of-range values read from disk back into range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        if self.smoothing_strength.is_finite() {
            self.smoothing_strength = round2(self.smoothing_strength.clamp(SMOOTHING_MIN, SMOOTHING_MAX));
        } else {
            self.smoothing_strength = SMOOTHING_DEFAULT;
        }
        self
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// `settings.toml` inside the data directory.
pub struct TomlSettingsStore {
    file_path: PathBuf,
}

impl TomlSettingsStore {
    pub const FILE_NAME: &'static str = "settings.toml";

    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_path: data_dir.into().join(Self::FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<Settings> {
        let _span = tracing::debug_span!("toml_load_settings", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let settings: Settings = toml::from_str(&contents)
            .map_err(|e| NoteError::Settings(format!("failed to parse settings: {e}")))?;

        tracing::debug!(?settings, "settings loaded");
        Ok(settings.clamped())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        let _span = tracing::debug_span!("toml_save_settings", path = ?self.file_path).entered();

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let text = toml::to_string_pretty(settings)
            .map_err(|e| NoteError::Settings(format!("failed to serialize settings: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, text)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("settings saved");
        Ok(())
    }
}
