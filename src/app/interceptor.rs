//! Global key handling that runs before the active screen sees an event.
//!
//! Two gestures are recognised on every key-down, whatever screen is active:
//!
//! - the vault sequence ([`VAULT_SEQUENCE`]) toggles whether hidden notes are
//!   listed, and rebuilds an active Browser so the change shows at once;
//! - the panic combo ([`PANIC_COMBO`] all held) switches to the configured
//!   decoy screen.
//!
//! When a gesture requests a transition the triggering event is consumed.

use crate::app::modes::DecoyMode;
use crate::input::{Button, HeldKeys, InputEvent};
use crate::screens::ScreenId;

pub const VAULT_SEQUENCE: [Button; 10] = [
    Button::Up,
    Button::Up,
    Button::Down,
    Button::Down,
    Button::Left,
    Button::Right,
    Button::Left,
    Button::Right,
    Button::B,
    Button::A,
];

pub const PANIC_COMBO: [Button; 4] = [Button::L2, Button::R2, Button::Select, Button::Start];

/// Process-lifetime state of the global gestures. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalInputState {
    /// Position reached in [`VAULT_SEQUENCE`].
    pub cheat_index: usize,
    pub vault_unlocked: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalInputInterceptor;

impl GlobalInputInterceptor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Inspects one event.
    ///
    /// `held` must already include `event`. Returns the screen to switch to
    /// when a gesture fires; the caller must then drop the event.
    ///
    /// ```
    /// use pocket_notes::app::{GlobalInputInterceptor, GlobalInputState};
    /// use pocket_notes::app::modes::DecoyMode;
    /// use pocket_notes::input::{Button, HeldKeys, InputEvent};
    /// use pocket_notes::screens::ScreenId;
    ///
    /// let interceptor = GlobalInputInterceptor::new();
    /// let mut state = GlobalInputState::default();
    /// let held: HeldKeys = [Button::L2, Button::R2, Button::Select, Button::Start].into_iter().collect();
    ///
    /// let target = interceptor.intercept(
    ///     &mut state,
    ///     InputEvent::KeyDown(Button::Start),
    ///     held,
    ///     &ScreenId::Browser,
    ///     DecoyMode::ErrorLog,
    /// );
    /// assert_eq!(target, Some(ScreenId::Decoy(DecoyMode::ErrorLog)));
    /// ```
    pub fn intercept(
        &self,
        state: &mut GlobalInputState,
        event: InputEvent,
        held: HeldKeys,
        active: &ScreenId,
        decoy_mode: DecoyMode,
    ) -> Option<ScreenId> {
        let InputEvent::KeyDown(button) = event else {
            return None;
        };

        let mut target = None;

        if VAULT_SEQUENCE.get(state.cheat_index) == Some(&button) {
            state.cheat_index += 1;
            if state.cheat_index == VAULT_SEQUENCE.len() {
                state.cheat_index = 0;
                state.vault_unlocked = !state.vault_unlocked;
                tracing::info!(unlocked = state.vault_unlocked, "vault toggled");
                if *active == ScreenId::Browser {
                    target = Some(ScreenId::Browser);
                }
            }
        } else {
            state.cheat_index = 0;
        }

        if held.all(&PANIC_COMBO) && !matches!(active, ScreenId::Decoy(_)) {
            tracing::info!(mode = ?decoy_mode, "panic combo");
            target = Some(ScreenId::Decoy(decoy_mode));
        }

        target
    }
}
