//! Shared helpers for the integration tests.
//!
//! Include with `mod common;` at the top of a test file. Not every file uses
//! every helper, hence the `dead_code` allowance.

#![allow(dead_code)]

use pocket_notes::input::{Button, QueuedInput};
use pocket_notes::storage::{DiskNoteStore, MemoryNoteStore, MemorySettingsStore, TomlSettingsStore};
use pocket_notes::ui::{RecordingSurface, Theme};
use pocket_notes::{AppContext, ApplicationController};
use std::time::Duration;
use tempfile::TempDir;

pub const FRAME: Duration = Duration::from_millis(16);

/// Controller over in-memory stores.
pub fn memory_controller(notes: MemoryNoteStore) -> ApplicationController {
    let ctx = AppContext::new(Box::new(notes), Box::new(MemorySettingsStore::new()), &Theme::default());
    ApplicationController::new(ctx)
}

/// Controller over disk stores rooted in a fresh temp dir.
///
/// Keep the `TempDir` alive until every store access is done.
pub fn disk_controller() -> (ApplicationController, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    (disk_controller_at(&dir), dir)
}

pub fn disk_controller_at(dir: &TempDir) -> ApplicationController {
    let notes = DiskNoteStore::new(dir.path()).expect("failed to open note store");
    let settings = TomlSettingsStore::new(dir.path());
    ApplicationController::new(AppContext::new(Box::new(notes), Box::new(settings), &Theme::default()))
}

/// Scripted input plus an 80x24 recording surface.
pub struct Harness {
    pub input: QueuedInput,
    pub surface: RecordingSurface,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            input: QueuedInput::new(),
            surface: RecordingSurface::new(80, 24),
        }
    }

    /// Taps each button in order and runs one frame.
    pub fn tap(&mut self, controller: &mut ApplicationController, buttons: &[Button]) {
        for &button in buttons {
            self.input.tap(button);
        }
        self.frame(controller);
    }

    /// Holds every button in order and runs one frame.
    pub fn hold(&mut self, controller: &mut ApplicationController, buttons: &[Button]) {
        self.input.press_all(buttons);
        self.frame(controller);
    }

    pub fn frame(&mut self, controller: &mut ApplicationController) {
        controller.run_frame(&mut self.input, &mut self.surface, FRAME);
    }
}

/// Ribbon presses that type `text` on the standard layout, starting from the
/// ribbon's first character and returning to it after each letter.
pub fn ribbon_keys(text: &str) -> Vec<Button> {
    const RIBBON: &str = "qwertyuiopasdfghjklzxcvbnm ";
    let mut keys = Vec::new();
    for ch in text.chars() {
        let steps = RIBBON
            .chars()
            .position(|c| c == ch.to_ascii_lowercase())
            .expect("character not on the ribbon");
        keys.extend(std::iter::repeat(Button::Right).take(steps));
        keys.push(Button::Start);
        keys.extend(std::iter::repeat(Button::Left).take(steps));
    }
    keys
}
