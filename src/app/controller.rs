//! Frame pipeline and screen transitions.
//!
//! Per frame the controller:
//!
//! 1. drains the input source, passing each event through the
//!    [`GlobalInputInterceptor`] and then to the active screen;
//! 2. updates the active screen once;
//! 3. renders it once.
//!
//! Any transition requested along the way is applied immediately: the old
//! screen's `exit` runs, it is dropped, and the new screen is constructed and
//! entered.

use crate::app::context::AppContext;
use crate::app::interceptor::GlobalInputInterceptor;
use crate::input::{HeldKeys, InputEvent, InputSource};
use crate::screens::{Screen, ScreenId};
use crate::ui::Surface;
use std::time::Duration;

pub struct ApplicationController {
    screen: Screen,
    ctx: AppContext,
    interceptor: GlobalInputInterceptor,
    frames: u64,
    enters: u64,
    exits: u64,
    shut_down: bool,
}

impl ApplicationController {
    /// Takes ownership of the context and enters the Browser.
    #[must_use]
    pub fn new(mut ctx: AppContext) -> Self {
        let mut screen = Screen::open(&ScreenId::Browser);
        screen.enter(&mut ctx);
        let mut controller = Self {
            screen,
            ctx,
            interceptor: GlobalInputInterceptor::new(),
            frames: 0,
            enters: 1,
            exits: 0,
            shut_down: false,
        };
        controller.apply_pending();
        controller
    }

    /// Identity of the active screen.
    #[must_use]
    pub fn active(&self) -> ScreenId {
        self.screen.id()
    }

    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub const fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    /// Frames completed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// `(enter calls, exit calls)` across all screens so far.
    #[must_use]
    pub const fn lifecycle_counts(&self) -> (u64, u64) {
        (self.enters, self.exits)
    }

    /// Routes one event: interceptor first, then the active screen.
    ///
    /// `held` must already reflect `event`.
    pub fn dispatch(&mut self, event: InputEvent, held: HeldKeys) {
        let _span = tracing::trace_span!("dispatch", ?event).entered();
        self.ctx.set_input(held);

        let active = self.screen.id();
        let decoy_mode = self.ctx.settings.decoy_mode;
        if let Some(target) = self
            .interceptor
            .intercept(&mut self.ctx.globals, event, held, &active, decoy_mode)
        {
            self.transition(target);
            return;
        }

        self.screen.handle_input(&mut self.ctx, event);
        self.apply_pending();
    }

    /// Runs one frame: drain input, update, render.
    pub fn run_frame(&mut self, input: &mut dyn InputSource, surface: &mut dyn Surface, elapsed: Duration) {
        let _span = tracing::debug_span!("frame", frame = self.frames).entered();

        while let Some(event) = input.poll() {
            self.dispatch(event, input.held());
        }

        self.ctx.set_input(input.held());
        self.ctx.set_elapsed(elapsed);
        self.screen.update(&mut self.ctx);
        self.apply_pending();

        self.screen.render(&self.ctx, surface);
        input.end_frame();
        self.frames += 1;
    }

    /// Exits the active screen and stores settings. Runs at most once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.screen.exit(&mut self.ctx);
        self.exits += 1;
        self.ctx.save_settings();
        tracing::info!(frames = self.frames, "shut down");
    }

    fn apply_pending(&mut self) {
        if let Some(target) = self.ctx.take_request() {
            self.transition(target);
        }
    }

    fn transition(&mut self, target: ScreenId) {
        let _span = tracing::debug_span!("transition", from = ?self.screen.id(), to = ?target).entered();

        self.screen.exit(&mut self.ctx);
        self.exits += 1;
        self.screen = Screen::open(&target);
        self.screen.enter(&mut self.ctx);
        self.enters += 1;

        // A request made during `enter` is dropped rather than chained.
        if let Some(ignored) = self.ctx.take_request() {
            tracing::warn!(?ignored, "transition requested during enter");
        }
    }
}

impl Drop for ApplicationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::interceptor::{PANIC_COMBO, VAULT_SEQUENCE};
    use crate::app::modes::DecoyMode;
    use crate::input::{Button, QueuedInput};
    use crate::screens::NoteRef;
    use crate::storage::{MemoryNoteStore, MemorySettingsStore};
    use crate::ui::{RecordingSurface, Theme};

    const FRAME: Duration = Duration::from_millis(16);

    fn controller(notes: MemoryNoteStore) -> ApplicationController {
        let ctx = AppContext::new(Box::new(notes), Box::new(MemorySettingsStore::new()), &Theme::default());
        ApplicationController::new(ctx)
    }

    fn frame(controller: &mut ApplicationController, input: &mut QueuedInput) -> RecordingSurface {
        let mut surface = RecordingSurface::new(80, 24);
        controller.run_frame(input, &mut surface, FRAME);
        surface
    }

    fn tap_all(input: &mut QueuedInput, buttons: &[Button]) {
        for &button in buttons {
            input.tap(button);
        }
    }

    #[test]
    fn starts_on_browser() {
        let controller = controller(MemoryNoteStore::new());
        assert_eq!(controller.active(), ScreenId::Browser);
        assert_eq!(controller.lifecycle_counts(), (1, 0));
    }

    #[test]
    fn each_transition_exits_once_and_enters_once() {
        let mut controller = controller(MemoryNoteStore::new());
        let mut input = QueuedInput::new();

        tap_all(&mut input, &[Button::R1, Button::B, Button::Menu, Button::B]);
        frame(&mut controller, &mut input);

        assert_eq!(controller.active(), ScreenId::Browser);
        assert_eq!(controller.lifecycle_counts(), (5, 4));
        assert_eq!(controller.frames(), 1);
    }

    #[test]
    fn vault_sequence_toggles_and_is_consumed() {
        let mut controller = controller(MemoryNoteStore::new().with_note("a.txt", "x"));
        let mut input = QueuedInput::new();

        tap_all(&mut input, &VAULT_SEQUENCE);
        frame(&mut controller, &mut input);
        assert!(controller.context().vault_unlocked());
        // The final A would have opened the note had it reached the Browser.
        assert_eq!(controller.active(), ScreenId::Browser);

        tap_all(&mut input, &VAULT_SEQUENCE);
        frame(&mut controller, &mut input);
        assert!(!controller.context().vault_unlocked());
    }

    #[test]
    fn panic_combo_switches_to_configured_decoy() {
        let mut controller = controller(MemoryNoteStore::new());
        controller.context_mut().settings.decoy_mode = DecoyMode::ErrorLog;
        let mut input = QueuedInput::new();

        input.tap(Button::R1);
        input.press_all(&PANIC_COMBO);
        frame(&mut controller, &mut input);
        assert_eq!(controller.active(), ScreenId::Decoy(DecoyMode::ErrorLog));

        let counts = controller.lifecycle_counts();
        tap_all(&mut input, &[Button::B, Button::Menu, Button::A]);
        frame(&mut controller, &mut input);
        assert_eq!(controller.active(), ScreenId::Decoy(DecoyMode::ErrorLog));
        assert_eq!(controller.lifecycle_counts(), counts);
    }

    #[test]
    fn opening_a_note_passes_its_reference() {
        let mut controller = controller(MemoryNoteStore::new().with_note("todo.txt", "- [ ] milk"));
        let mut input = QueuedInput::new();

        input.tap(Button::A);
        let surface = frame(&mut controller, &mut input);
        assert_eq!(controller.active(), ScreenId::Editor(NoteRef::public("todo.txt")));
        assert!(surface.contains_text("milk"));
    }

    #[test]
    fn shutdown_runs_once() {
        let mut controller = controller(MemoryNoteStore::new());
        controller.shutdown();
        controller.shutdown();
        assert_eq!(controller.lifecycle_counts(), (1, 1));
    }
}
