//! Shared state handed to every screen.
//!
//! [`AppContext`] owns the collaborators (note store, settings store,
//! palettes), the settings record, the global gesture state and the per-frame
//! input snapshot. Screens request transitions through it; the controller
//! applies them after the screen returns.
//!
//! Store failures stop here. Every note helper logs the error and returns an
//! empty or default value, so screens never deal with `Result`.

use crate::app::interceptor::GlobalInputState;
use crate::input::{Button, HeldKeys};
use crate::screens::{NoteRef, ScreenId};
use crate::storage::{NoteEntry, NoteStore, Settings, SettingsStore};
use crate::ui::{Palette, Theme};
use std::time::Duration;

pub struct AppContext {
    pub settings: Settings,
    pub globals: GlobalInputState,
    held: HeldKeys,
    elapsed: Duration,
    notes: Box<dyn NoteStore>,
    settings_store: Box<dyn SettingsStore>,
    palette: Palette,
    stealth_palette: Palette,
    pending: Option<ScreenId>,
}

impl AppContext {
    /// Builds a context, loading settings from `settings_store`.
    ///
    /// Unreadable settings fall back to defaults.
    #[must_use]
    pub fn new(notes: Box<dyn NoteStore>, settings_store: Box<dyn SettingsStore>, theme: &Theme) -> Self {
        let settings = settings_store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            Settings::default()
        });

        Self {
            settings,
            globals: GlobalInputState::default(),
            held: HeldKeys::empty(),
            elapsed: Duration::ZERO,
            notes,
            settings_store,
            palette: theme.palette(),
            stealth_palette: Theme::stealth().palette(),
            pending: None,
        }
    }

    /// Asks the controller to switch screens once the current call returns.
    ///
    /// A later request in the same call replaces an earlier one.
    pub fn request(&mut self, target: ScreenId) {
        tracing::debug!(?target, "transition requested");
        self.pending = Some(target);
    }

    pub fn take_request(&mut self) -> Option<ScreenId> {
        self.pending.take()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&ScreenId> {
        self.pending.as_ref()
    }

    pub(crate) fn set_input(&mut self, held: HeldKeys) {
        self.held = held;
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Time covered by the current frame.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub const fn held(&self) -> HeldKeys {
        self.held
    }

    #[must_use]
    pub const fn is_held(&self, button: Button) -> bool {
        self.held.contains(button)
    }

    #[must_use]
    pub const fn vault_unlocked(&self) -> bool {
        self.globals.vault_unlocked
    }

    /// Colors for this frame; stealth visual mode swaps in the stealth palette.
    #[must_use]
    pub const fn palette(&self) -> Palette {
        if self.settings.stealth_visual_mode {
            self.stealth_palette
        } else {
            self.palette
        }
    }

    /// Read access to the note store.
    #[must_use]
    pub fn notes(&self) -> &dyn NoteStore {
        self.notes.as_ref()
    }

    /// Notes visible right now: vault notes are included only while unlocked.
    #[must_use]
    pub fn list_notes(&self) -> Vec<NoteEntry> {
        self.notes.list(self.vault_unlocked()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to list notes");
            Vec::new()
        })
    }

    /// Body of `note` as text, or `None` if it cannot be read.
    #[must_use]
    pub fn read_note(&self, note: &NoteRef) -> Option<String> {
        match self.notes.read(&note.name, note.hidden) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::warn!(name = %note.name, error = %e, "failed to read note");
                None
            }
        }
    }

    /// Stores `text` under `note`. Returns whether the write succeeded.
    pub fn write_note(&mut self, note: &NoteRef, text: &str) -> bool {
        match self.notes.write(&note.name, text.as_bytes(), note.hidden) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(name = %note.name, error = %e, "failed to write note");
                false
            }
        }
    }

    /// Moves a public note into the vault, returning its new name.
    pub fn hide_note(&mut self, name: &str) -> Option<String> {
        match self.notes.move_public_to_hidden(name) {
            Ok(hidden) => Some(hidden),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "failed to move note to vault");
                None
            }
        }
    }

    pub fn save_settings(&mut self) {
        if let Err(e) = self.settings_store.save(&self.settings) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryNoteStore, MemorySettingsStore};

    fn context(notes: MemoryNoteStore) -> AppContext {
        AppContext::new(Box::new(notes), Box::new(MemorySettingsStore::new()), &Theme::default())
    }

    #[test]
    fn failing_store_degrades_to_defaults() {
        let mut ctx = context(MemoryNoteStore::failing());
        let note = NoteRef::public("a.txt");
        assert!(ctx.list_notes().is_empty());
        assert_eq!(ctx.read_note(&note), None);
        assert!(!ctx.write_note(&note, "x"));
        assert_eq!(ctx.hide_note("a.txt"), None);
    }

    #[test]
    fn listing_follows_vault_state() {
        let mut notes = MemoryNoteStore::new().with_note("a.txt", "");
        notes.write("0x001.dat", b"", true).unwrap();
        let mut ctx = context(notes);

        assert_eq!(ctx.list_notes().len(), 1);
        ctx.globals.vault_unlocked = true;
        assert_eq!(ctx.list_notes().len(), 2);
    }

    #[test]
    fn later_request_wins() {
        let mut ctx = context(MemoryNoteStore::new());
        ctx.request(ScreenId::Canvas);
        ctx.request(ScreenId::Settings);
        assert_eq!(ctx.take_request(), Some(ScreenId::Settings));
        assert_eq!(ctx.take_request(), None);
    }

    #[test]
    fn stealth_mode_swaps_palette() {
        let mut ctx = context(MemoryNoteStore::new());
        let normal = ctx.palette();
        ctx.settings.stealth_visual_mode = true;
        assert_eq!(ctx.palette(), Theme::stealth().palette());
        assert_ne!(ctx.palette(), normal);
    }
}
