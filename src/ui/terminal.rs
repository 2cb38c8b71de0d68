//! RAII terminal session for the interactive host.
//!
//! Entering a session switches the terminal to raw mode, the alternate screen
//! and a hidden cursor, and asks for keyboard enhancement so key releases are
//! reported. Everything is undone on drop and, through a panic hook, when the
//! process panics.

use crate::domain::error::{NoteError, Result};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use std::io::{self, Write};
use std::sync::OnceLock;

/// Live terminal configuration; restored when dropped.
#[derive(Debug)]
pub struct TerminalSession {
    keyboard_enhanced: bool,
    active: bool,
}

impl TerminalSession {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Terminal`] if raw mode or the alternate screen
    /// cannot be entered.
    pub fn start() -> Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode().map_err(terminal_error)?;
        tracing::debug!("raw mode enabled");

        let mut session = Self {
            keyboard_enhanced: false,
            active: true,
        };

        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        )
        .map_err(terminal_error)?;

        if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
            crossterm::execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .map_err(terminal_error)?;
            session.keyboard_enhanced = true;
            tracing::debug!("keyboard enhancement enabled");
        } else {
            tracing::info!("terminal does not report key releases, holds will be synthesized");
        }

        Ok(session)
    }

    /// Whether the terminal reports key releases.
    #[must_use]
    pub const fn reports_releases(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Current terminal size as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Terminal`] if the size cannot be queried.
    pub fn size(&self) -> Result<(u16, u16)> {
        crossterm::terminal::size().map_err(terminal_error)
    }

    fn cleanup(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = crossterm::execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = crossterm::execute!(
            stdout,
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::debug!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn terminal_error(e: io::Error) -> NoteError {
    NoteError::Terminal(e.to_string())
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            let _ = crossterm::execute!(stdout, PopKeyboardEnhancementFlags);
            let _ = crossterm::execute!(
                stdout,
                crossterm::cursor::Show,
                crossterm::terminal::LeaveAlternateScreen
            );
            let _ = crossterm::terminal::disable_raw_mode();
            previous(info);
        }));
    });
}
