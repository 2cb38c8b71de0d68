//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents with hex colors. Two are built in: `classic`
//! (the default) and `stealth`, a near-black palette used when stealth visual
//! mode is switched on in the settings menu. A custom file can replace the
//! normal palette through the `theme_file` option.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#14141e"
//! title = "#ffc864"
//! text = "#969696"
//! text_dim = "#646464"
//! selection_fg = "#ffffff"
//! selection_bg = "#2a2a40"
//! accent = "#ffc864"
//! track = "#323232"
//! progress = "#64c864"
//! border = "#646464"
//! ```
//!
//! # Example
//!
//! ```
//! use pocket_notes::ui::Theme;
//!
//! let theme = Theme::from_name("classic").unwrap();
//! let palette = theme.palette();
//! print!("{}title{}", Theme::fg(palette.title), Theme::reset());
//! ```

use crate::domain::error::{NoteError, Result};
use crate::ui::surface::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named color scheme as stored on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings for every UI role.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub background: String,
    /// Screen titles and section headers.
    pub title: String,
    pub text: String,
    /// Hints, footers and completed lines.
    pub text_dim: String,
    pub selection_fg: String,
    pub selection_bg: String,
    /// Cursor line, selected shape, focused input widget.
    pub accent: String,
    /// Progress bar background.
    pub track: String,
    pub progress: String,
    pub border: String,
}

/// Resolved colors for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub title: Color,
    pub text: Color,
    pub text_dim: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub accent: Color,
    pub track: Color,
    pub progress: Color,
    pub border: Color,
}

impl Theme {
    /// Loads a built-in theme by name (`classic` or `stealth`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "classic" => include_str!("../../themes/classic.toml"),
            "stealth" => include_str!("../../themes/stealth.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| NoteError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| NoteError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// The stealth palette, with a hard-coded fallback.
    #[must_use]
    pub fn stealth() -> Self {
        Self::from_name("stealth").unwrap_or_else(|| Self::fallback("stealth", "#0a0a0a"))
    }

    /// Resolves every hex string into a [`Color`].
    #[must_use]
    pub fn palette(&self) -> Palette {
        let c = &self.colors;
        Palette {
            background: Color::from_hex(&c.background),
            title: Color::from_hex(&c.title),
            text: Color::from_hex(&c.text),
            text_dim: Color::from_hex(&c.text_dim),
            selection_fg: Color::from_hex(&c.selection_fg),
            selection_bg: Color::from_hex(&c.selection_bg),
            accent: Color::from_hex(&c.accent),
            track: Color::from_hex(&c.track),
            progress: Color::from_hex(&c.progress),
            border: Color::from_hex(&c.border),
        }
    }

    fn fallback(name: &str, background: &str) -> Self {
        Self {
            name: name.to_string(),
            colors: ThemeColors {
                background: background.to_string(),
                title: "#ffc864".to_string(),
                text: "#969696".to_string(),
                text_dim: "#646464".to_string(),
                selection_fg: "#ffffff".to_string(),
                selection_bg: "#2a2a40".to_string(),
                accent: "#ffc864".to_string(),
                track: "#323232".to_string(),
                progress: "#64c864".to_string(),
                border: "#646464".to_string(),
            },
        }
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(color: Color) -> String {
        format!("\u{001b}[38;2;{};{};{}m", color.r, color.g, color.b)
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(color: Color) -> String {
        format!("\u{001b}[48;2;{};{};{}m", color.r, color.g, color.b)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `classic` theme.
    fn default() -> Self {
        Self::from_name("classic").unwrap_or_else(|| Self::fallback("classic", "#14141e"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::from_name("classic").map(|t| t.name), Some("classic".to_string()));
        assert_eq!(Theme::stealth().name, "stealth");
        assert!(Theme::from_name("neon").is_none());
    }

    #[test]
    fn stealth_is_darker_than_classic() {
        let classic = Theme::default().palette().background;
        let stealth = Theme::stealth().palette().background;
        let luma = |c: Color| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(luma(stealth) < luma(classic));
    }

    #[test]
    fn escapes_carry_rgb() {
        assert_eq!(Theme::fg(Color::rgb(1, 2, 3)), "\u{1b}[38;2;1;2;3m");
        assert_eq!(Theme::bg(Color::rgb(4, 5, 6)), "\u{1b}[48;2;4;5;6m");
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let result = Theme::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(NoteError::Theme(_))));
    }
}
