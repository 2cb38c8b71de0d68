//! Terminal host for Pocket Notes.
//!
//! Maps the keyboard to handheld buttons (see [`pocket_notes::input::keymap`]),
//! runs the controller at a fixed frame rate and blits each frame to the
//! terminal.
//!
//! ```text
//! crossterm events ──map_key──► QueuedInput ──► ApplicationController::run_frame
//!                                                          │
//!                         stdout ◄──present── AnsiSurface ◄┘
//! ```
//!
//! `Ctrl+C` quits. Open notes and settings are saved on the way out.

#![allow(clippy::multiple_crate_versions)]

use crossterm::event::{self, Event};
use pocket_notes::input::keymap::{is_quit, map_key};
use pocket_notes::input::QueuedInput;
use pocket_notes::ui::{AnsiSurface, TerminalSession};
use pocket_notes::{Config, NoteError, Result};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let config = Config::from_args(&parse_args(std::env::args().skip(1))?)?;
    pocket_notes::observability::init_tracing(&config);

    let _span = tracing::info_span!("session").entered();
    let mut controller = pocket_notes::initialize(&config)?;

    let session = TerminalSession::start()?;
    let (cols, rows) = session.size()?;
    let mut surface = AnsiSurface::new(cols, rows);
    let mut input = if session.reports_releases() {
        QueuedInput::new()
    } else {
        QueuedInput::new().with_hold_frames(config.hold_frames)
    };

    let frame = Duration::from_millis(config.frame_ms);
    let mut stdout = io::stdout();
    let mut last = Instant::now();

    'frames: loop {
        let started = Instant::now();

        while event::poll(Duration::ZERO).map_err(io_error)? {
            match event::read().map_err(io_error)? {
                Event::Key(key) if is_quit(&key) => break 'frames,
                Event::Key(key) => {
                    if let Some(event) = map_key(&key) {
                        input.push(event);
                    }
                }
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        let elapsed = started.duration_since(last);
        last = started;
        controller.run_frame(&mut input, &mut surface, elapsed);
        surface.present(&mut stdout)?;
        stdout.flush()?;

        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    controller.shutdown();
    drop(session);
    tracing::info!("bye");
    Ok(())
}

/// Collects `key=value` arguments.
fn parse_args(args: impl Iterator<Item = String>) -> Result<BTreeMap<String, String>> {
    args.map(|arg| {
        arg.split_once('=')
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .ok_or_else(|| NoteError::Config(format!("expected key=value, got '{arg}'")))
    })
    .collect()
}

fn io_error(e: io::Error) -> NoteError {
    NoteError::Terminal(e.to_string())
}
