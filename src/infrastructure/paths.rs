//! Data directory resolution and tilde expansion.
//!
//! Everything the app persists (public notes, the vault, `settings.toml`
//! and the trace file) lives under one data directory.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const HOME_OVERRIDE: &str = "POCKET_NOTES_HOME";

/// Returns the data directory for notes, settings and traces.
///
/// Resolution order:
///
/// 1. `$POCKET_NOTES_HOME`
/// 2. `$XDG_DATA_HOME/pocket-notes`
/// 3. `$HOME/.local/share/pocket-notes`
/// 4. `./pocket-notes-data`
#[must_use]
pub fn default_data_dir() -> PathBuf {
    resolve_data_dir(|key| std::env::var(key).ok())
}

fn resolve_data_dir(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let non_empty = |key: &str| var(key).filter(|value| !value.is_empty());

    if let Some(dir) = non_empty(HOME_OVERRIDE) {
        return PathBuf::from(expand_tilde_with(&dir, non_empty("HOME").as_deref()));
    }
    if let Some(dir) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(dir).join("pocket-notes");
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("pocket-notes");
    }
    PathBuf::from("pocket-notes-data")
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths are returned unchanged when `$HOME` is unset.
///
/// # Examples
///
/// ```
/// use pocket_notes::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
