//! Input sources consumed by the frame loop.
//!
//! An [`InputSource`] yields discrete key events and answers "what is held
//! right now". [`QueuedInput`] is the source used everywhere: the terminal host
//! pushes translated key events into it, and tests script it directly.
//!
//! Terminals without key-release reporting only ever send presses. For those,
//! [`QueuedInput::with_hold_frames`] treats each press as a hold that ends
//! after a number of frames unless the key repeats, and synthesizes the
//! matching release.

use super::keys::{Button, HeldKeys, InputEvent};
use std::collections::VecDeque;

/// Producer of key events plus an instantaneous held-key query.
pub trait InputSource {
    /// Next pending event, or `None` when drained for this frame.
    ///
    /// The held-key state returned by [`held`](Self::held) reflects every
    /// event polled so far.
    fn poll(&mut self) -> Option<InputEvent>;

    /// Buttons held at this instant.
    fn held(&self) -> HeldKeys;

    /// Called once at the end of every frame.
    fn end_frame(&mut self) {}
}

/// FIFO input source with optional synthetic releases.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    pending: VecDeque<InputEvent>,
    held: HeldKeys,
    hold_frames: Option<u32>,
    /// Frames since the last press, per synthesized hold.
    ages: Vec<(Button, u32)>,
}

impl QueuedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesizes a release `frames` frames after the last press of a key.
    #[must_use]
    pub fn with_hold_frames(mut self, frames: u32) -> Self {
        self.hold_frames = Some(frames.max(1));
        self
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.hold_frames.is_some() {
            let button = event.button();
            self.ages.retain(|(held, _)| *held != button);
            if event.is_down() {
                self.ages.push((button, 0));
            }
        }
        self.pending.push_back(event);
    }

    /// Queues a press followed by a release.
    pub fn tap(&mut self, button: Button) {
        self.push(InputEvent::KeyDown(button));
        self.push(InputEvent::KeyUp(button));
    }

    /// Queues presses of every button in order, leaving them held.
    pub fn press_all(&mut self, buttons: &[Button]) {
        for &button in buttons {
            self.push(InputEvent::KeyDown(button));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for QueuedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        let event = self.pending.pop_front()?;
        self.held.apply(event);
        Some(event)
    }

    fn held(&self) -> HeldKeys {
        self.held
    }

    fn end_frame(&mut self) {
        let Some(limit) = self.hold_frames else {
            return;
        };

        let mut expired = Vec::new();
        self.ages.retain_mut(|(button, age)| {
            *age += 1;
            if *age >= limit {
                expired.push(*button);
                false
            } else {
                true
            }
        });

        for button in expired {
            tracing::trace!(?button, "synthesized release");
            self.pending.push_back(InputEvent::KeyUp(button));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_state_follows_polled_events() {
        let mut input = QueuedInput::new();
        input.push(InputEvent::KeyDown(Button::A));
        input.push(InputEvent::KeyUp(Button::A));

        assert!(input.held().is_empty());
        assert_eq!(input.poll(), Some(InputEvent::KeyDown(Button::A)));
        assert!(input.held().contains(Button::A));
        assert_eq!(input.poll(), Some(InputEvent::KeyUp(Button::A)));
        assert!(input.held().is_empty());
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn synthetic_release_after_hold_frames() {
        let mut input = QueuedInput::new().with_hold_frames(2);
        input.push(InputEvent::KeyDown(Button::L2));
        while input.poll().is_some() {}

        input.end_frame();
        assert!(input.is_empty());
        input.end_frame();
        assert_eq!(input.poll(), Some(InputEvent::KeyUp(Button::L2)));
        assert!(input.held().is_empty());
    }

    #[test]
    fn repeat_press_extends_the_hold() {
        let mut input = QueuedInput::new().with_hold_frames(2);
        input.push(InputEvent::KeyDown(Button::Right));
        input.end_frame();
        input.push(InputEvent::KeyDown(Button::Right));
        input.end_frame();
        while let Some(event) = input.poll() {
            assert!(event.is_down());
        }
        input.end_frame();
        assert_eq!(input.poll(), Some(InputEvent::KeyUp(Button::Right)));
    }
}
