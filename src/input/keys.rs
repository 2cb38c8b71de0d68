//! Symbolic handheld buttons and key events.

/// Physical buttons of the handheld, independent of any host keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    Select,
    Start,
    Menu,
}

impl Button {
    pub const ALL: [Self; 15] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::L1,
        Self::R1,
        Self::L2,
        Self::R2,
        Self::Select,
        Self::Start,
        Self::Menu,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    #[must_use]
    pub const fn is_dpad(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// A discrete key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Button),
    KeyUp(Button),
}

impl InputEvent {
    #[must_use]
    pub const fn button(self) -> Button {
        match self {
            Self::KeyDown(button) | Self::KeyUp(button) => button,
        }
    }

    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::KeyDown(_))
    }
}

/// Snapshot of which buttons are held at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys(u16);

impl HeldKeys {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn press(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn release(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    /// Applies a key transition.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(button) => self.press(button),
            InputEvent::KeyUp(button) => self.release(button),
        }
    }

    #[must_use]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    /// True when every button in `buttons` is held.
    #[must_use]
    pub fn all(self, buttons: &[Button]) -> bool {
        buttons.iter().all(|&button| self.contains(button))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Held buttons in [`Button::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |&button| self.contains(button))
    }
}

impl FromIterator<Button> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut held = Self::empty();
        for button in iter {
            held.press(button);
        }
        held
    }
}
