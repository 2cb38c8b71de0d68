//! Host keyboard to handheld button mapping.
//!
//! | Keyboard | Button |
//! |---|---|
//! | arrows | D-pad |
//! | `a` `b` `x` `y` | face buttons |
//! | `q` / `e` | L1 / R1 |
//! | `k` / `l` | L2 / R2 |
//! | Shift, Tab | Select |
//! | Enter | Start |
//! | Esc, Backspace | Menu |
//!
//! `Ctrl+C` quits the host and never reaches the application.

use super::keys::{Button, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Translates a terminal key event into a button event.
///
/// Presses and repeats become [`InputEvent::KeyDown`], releases become
/// [`InputEvent::KeyUp`]. Unmapped keys yield `None`.
#[must_use]
pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    let button = button_for(key.code)?;
    Some(match key.kind {
        KeyEventKind::Release => InputEvent::KeyUp(button),
        KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyDown(button),
    })
}

fn button_for(code: KeyCode) -> Option<Button> {
    let button = match code {
        KeyCode::Up => Button::Up,
        KeyCode::Down => Button::Down,
        KeyCode::Left => Button::Left,
        KeyCode::Right => Button::Right,
        KeyCode::Enter => Button::Start,
        KeyCode::Tab | KeyCode::BackTab => Button::Select,
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Button::Select
        }
        KeyCode::Esc | KeyCode::Backspace => Button::Menu,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Button::A,
            'b' => Button::B,
            'x' => Button::X,
            'y' => Button::Y,
            'q' => Button::L1,
            'e' => Button::R1,
            'k' => Button::L2,
            'l' => Button::R2,
            _ => return None,
        },
        _ => return None,
    };
    Some(button)
}

/// True for the host quit chord (`Ctrl+C`).
#[must_use]
pub fn is_quit(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn release_maps_to_key_up() {
        let event = map_key(&key(KeyCode::Char('k'), KeyEventKind::Release));
        assert_eq!(event, Some(InputEvent::KeyUp(Button::L2)));
    }

    #[test]
    fn repeat_counts_as_press() {
        let event = map_key(&key(KeyCode::Left, KeyEventKind::Repeat));
        assert_eq!(event, Some(InputEvent::KeyDown(Button::Left)));
    }

    #[test]
    fn shifted_letters_map_like_plain_ones() {
        let event = map_key(&key(KeyCode::Char('L'), KeyEventKind::Press));
        assert_eq!(event, Some(InputEvent::KeyDown(Button::R2)));
        let shift = key(KeyCode::Modifier(ModifierKeyCode::LeftShift), KeyEventKind::Press);
        assert_eq!(map_key(&shift), Some(InputEvent::KeyDown(Button::Select)));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(&key(KeyCode::Char('z'), KeyEventKind::Press)), None);
        assert_eq!(map_key(&key(KeyCode::F(5), KeyEventKind::Press)), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut event = key(KeyCode::Char('c'), KeyEventKind::Press);
        assert!(!is_quit(&event));
        event.modifiers = KeyModifiers::CONTROL;
        assert!(is_quit(&event));
    }
}
