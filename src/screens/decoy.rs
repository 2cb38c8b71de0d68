//! Disguise screens shown by the panic combo.
//!
//! A decoy swallows every event. There is no way back short of restarting.

use super::Lifecycle;
use crate::app::context::AppContext;
use crate::app::modes::DecoyMode;
use crate::input::InputEvent;
use crate::ui::{Color, Surface};

/// Log rows scrolled per second.
const SCROLL_SPEED: f32 = 1.2;

const LOG_TOP: i32 = 6;

const RED: Color = Color::rgb(255, 50, 50);
const GREEN: Color = Color::rgb(50, 255, 50);
const GREY: Color = Color::rgb(200, 200, 200);

const UPDATE_HEADER: &[&str] = &["CRITICAL UPDATE: SAVING SYSTEM STATE", "DO NOT POWER OFF"];
const CRASH_HEADER: &[&str] = &["FATAL ERROR"];

const UPDATE_LOG: &[&str] = &[
    "[SYSTEM] Kernel Panic: VFS unable to mount root fs on unknown-block(0,0)",
    "[CRITICAL] Memory integrity check failed at 0x004F3A",
    "Loading recovery modules...",
    "module: ext4... OK",
    "module: fat32... OK",
    "Checking block descriptors...",
    "Update found: firmware_v4.2.0.bin",
    "Verifying signature... OK",
    "Writing to flash... 0%",
    "Writing to flash... 4%",
    "Writing to flash... 9%",
    "DO NOT POWER OFF",
    "Saving system state...",
    "Backing up registry...",
    "Critical Error: 0x8004005",
    "Retrying operation...",
    "Sector 4522 corrupted, attempting repair...",
];

const CRASH_DUMP: &[&str] = &[
    "Error: SEGFAULT at 0x00000000",
    "Core dumped.",
    "Stack trace:",
    "  <0x00401234> main + 0x23",
    "  <0x00405678> unknown_function + 0x12",
    "  <0x7f345678> libc.so.6 + 0x45",
    "System halted.",
    "Contact administrator.",
];

#[derive(Debug)]
pub struct DecoyScreen {
    mode: DecoyMode,
    scroll: f32,
}

impl DecoyScreen {
    #[must_use]
    pub const fn new(mode: DecoyMode) -> Self {
        Self { mode, scroll: 0.0 }
    }

    #[must_use]
    pub const fn mode(&self) -> DecoyMode {
        self.mode
    }

    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    const fn log(&self) -> &'static [&'static str] {
        match self.mode {
            DecoyMode::FakeUpdate => UPDATE_LOG,
            DecoyMode::ErrorLog => CRASH_DUMP,
            DecoyMode::BlackScreen => &[],
        }
    }
}

impl Lifecycle for DecoyScreen {
    fn enter(&mut self, _ctx: &mut AppContext) {
        tracing::info!(mode = ?self.mode, "decoy engaged");
    }

    fn handle_input(&mut self, _ctx: &mut AppContext, _event: InputEvent) {}

    fn update(&mut self, ctx: &mut AppContext) {
        let log = self.log();
        if log.is_empty() {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let len = log.len() as f32;
        self.scroll = (self.scroll + SCROLL_SPEED * ctx.elapsed().as_secs_f32()) % len;
    }

    fn render(&self, _ctx: &AppContext, surface: &mut dyn Surface) {
        surface.clear(Color::BLACK);

        let (header, color) = match self.mode {
            DecoyMode::FakeUpdate => (UPDATE_HEADER, GREEN),
            DecoyMode::ErrorLog => (CRASH_HEADER, GREY),
            DecoyMode::BlackScreen => return,
        };

        for (row, line) in (2..).zip(header) {
            surface.draw_text(2, row, line, RED);
        }

        let log = self.log();
        let rows = usize::try_from(surface.bounds().h - LOG_TOP).unwrap_or(0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = self.scroll.floor() as usize;
        for (row, index) in (0..rows).map(|row| (row, (row + offset) % log.len())) {
            let y = LOG_TOP + i32::try_from(row).unwrap_or(0);
            surface.draw_text(2, y, log[index], color);
        }
    }
}
