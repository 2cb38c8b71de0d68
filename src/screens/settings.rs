//! Settings menu.
//!
//! The menu is a fixed list of section headers and fields. The cursor only
//! ever rests on fields. Changes apply to `ctx.settings` immediately and are
//! written to the settings store when the screen exits.

use super::{Lifecycle, ScreenId};
use crate::app::context::AppContext;
use crate::infrastructure::SystemReadout;
use crate::input::{Button, InputEvent};
use crate::storage::Settings;
use crate::ui::motion::approach;
use crate::ui::{Rect, Surface};
use std::time::Duration;

/// How often the memory/battery footer is re-sampled.
const READOUT_INTERVAL: Duration = Duration::from_secs(2);

const MENU_TOP: i32 = 3;
const ROW_SPACING: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    KeyboardLayout,
    Smoothing,
    StealthMode,
    DefaultTemplate,
    DecoyMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Header(&'static str),
    Field(Field),
}

pub const MENU: [Item; 9] = [
    Item::Header("[ INPUT ]"),
    Item::Field(Field::KeyboardLayout),
    Item::Header("[ VISUALS ]"),
    Item::Field(Field::Smoothing),
    Item::Field(Field::StealthMode),
    Item::Header("[ NOTES ]"),
    Item::Field(Field::DefaultTemplate),
    Item::Header("[ SECURITY ]"),
    Item::Field(Field::DecoyMode),
];

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::KeyboardLayout => "Keyboard Layout",
            Self::Smoothing => "Smoothing",
            Self::StealthMode => "Stealth Mode",
            Self::DefaultTemplate => "Default Template",
            Self::DecoyMode => "Decoy Screen",
        }
    }

    #[must_use]
    pub fn value(self, settings: &Settings) -> String {
        match self {
            Self::KeyboardLayout => settings.keyboard_layout.label().to_string(),
            Self::Smoothing => format!("{:.2}", settings.smoothing_strength),
            Self::StealthMode => (if settings.stealth_visual_mode { "ON" } else { "OFF" }).to_string(),
            Self::DefaultTemplate => settings.default_template.label().to_string(),
            Self::DecoyMode => settings.decoy_mode.label().to_string(),
        }
    }

    /// Left/Right. Toggles flip either way; selectors wrap.
    fn adjust(self, settings: &mut Settings, forward: bool) {
        match self {
            Self::Smoothing => settings.step_smoothing(if forward { 1 } else { -1 }),
            Self::DefaultTemplate => {
                settings.default_template = if forward {
                    settings.default_template.next()
                } else {
                    settings.default_template.prev()
                };
            }
            Self::DecoyMode => {
                settings.decoy_mode = if forward { settings.decoy_mode.next() } else { settings.decoy_mode.prev() };
            }
            Self::KeyboardLayout | Self::StealthMode => {}
        }
    }

    /// A/Start. Only toggles react.
    fn toggle(self, settings: &mut Settings) {
        match self {
            Self::KeyboardLayout => settings.keyboard_layout = settings.keyboard_layout.toggled(),
            Self::StealthMode => settings.stealth_visual_mode = !settings.stealth_visual_mode,
            Self::Smoothing | Self::DefaultTemplate | Self::DecoyMode => {}
        }
    }
}

pub struct SettingsScreen {
    selected: usize,
    selector_row: f32,
    readout: SystemReadout,
    since_readout: Duration,
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreen {
    #[must_use]
    pub fn new() -> Self {
        let selected = first_field().unwrap_or(0);
        Self {
            selected,
            selector_row: row_of(selected),
            readout: SystemReadout::default(),
            since_readout: Duration::ZERO,
        }
    }

    /// Index into [`MENU`] of the item under the cursor.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_field(&self) -> Option<Field> {
        match MENU.get(self.selected) {
            Some(Item::Field(field)) => Some(*field),
            _ => None,
        }
    }

    /// Moves to the nearest field above or below; stays put if there is none.
    fn step(&mut self, down: bool) {
        let next = if down {
            (self.selected + 1..MENU.len()).find(|&i| matches!(MENU[i], Item::Field(_)))
        } else {
            (0..self.selected).rev().find(|&i| matches!(MENU[i], Item::Field(_)))
        };
        if let Some(index) = next {
            self.selected = index;
        }
    }
}

fn first_field() -> Option<usize> {
    MENU.iter().position(|item| matches!(item, Item::Field(_)))
}

#[allow(clippy::cast_precision_loss)]
fn row_of(index: usize) -> f32 {
    (MENU_TOP + i32::try_from(index).unwrap_or(0) * ROW_SPACING) as f32
}

impl Lifecycle for SettingsScreen {
    fn enter(&mut self, _ctx: &mut AppContext) {
        self.readout = SystemReadout::sample();
        self.since_readout = Duration::ZERO;
    }

    fn exit(&mut self, ctx: &mut AppContext) {
        ctx.save_settings();
        tracing::debug!(settings = ?ctx.settings, "settings saved on exit");
    }

    fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent) {
        let InputEvent::KeyDown(button) = event else {
            return;
        };

        match button {
            Button::B | Button::Menu => ctx.request(ScreenId::Browser),
            Button::Up => self.step(false),
            Button::Down => self.step(true),
            Button::Left | Button::Right => {
                if let Some(field) = self.selected_field() {
                    field.adjust(&mut ctx.settings, button == Button::Right);
                }
            }
            Button::A | Button::Start => {
                if let Some(field) = self.selected_field() {
                    field.toggle(&mut ctx.settings);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut AppContext) {
        let elapsed = ctx.elapsed();
        self.selector_row = approach(self.selector_row, row_of(self.selected), ctx.settings.smoothing_strength, elapsed);

        self.since_readout += elapsed;
        if self.since_readout >= READOUT_INTERVAL {
            self.since_readout = Duration::ZERO;
            self.readout = SystemReadout::sample();
        }
    }

    fn render(&self, ctx: &AppContext, surface: &mut dyn Surface) {
        let palette = ctx.palette();
        let bounds = surface.bounds();
        surface.clear(palette.background);
        surface.draw_text_centered(0, "SETTINGS", palette.title);

        #[allow(clippy::cast_possible_truncation)]
        let bar_row = self.selector_row.round() as i32;
        surface.fill_rect(Rect::new(4, bar_row, bounds.w - 8, 1), palette.selection_bg);

        let value_x = bounds.w - 20;
        for (index, item) in MENU.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = row_of(index) as i32;
            match item {
                Item::Header(title) => surface.draw_text_centered(y, title, palette.title),
                Item::Field(field) => {
                    let color = if index == self.selected { palette.selection_fg } else { palette.text };
                    surface.draw_text(8, y, field.label(), color);
                    surface.draw_text(value_x, y, &field.value(&ctx.settings), color);
                }
            }
        }

        surface.fill_rect(Rect::new(0, bounds.bottom() - 1, bounds.w, 1), palette.track);
        surface.draw_text_centered(bounds.bottom() - 1, &self.readout.footer(), palette.text_dim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::{DecoyMode, KeyboardLayout, NoteTemplate};
    use crate::storage::{MemoryNoteStore, MemorySettingsStore};
    use crate::ui::{RecordingSurface, Theme};

    fn setup() -> (SettingsScreen, AppContext) {
        let ctx = AppContext::new(
            Box::new(MemoryNoteStore::new()),
            Box::new(MemorySettingsStore::new()),
            &Theme::default(),
        );
        (SettingsScreen::new(), ctx)
    }

    fn press(screen: &mut SettingsScreen, ctx: &mut AppContext, buttons: &[Button]) {
        for &button in buttons {
            screen.handle_input(ctx, InputEvent::KeyDown(button));
        }
    }

    #[test]
    fn cursor_never_rests_on_headers() {
        let (mut screen, mut ctx) = setup();
        assert_eq!(screen.selected_field(), Some(Field::KeyboardLayout));

        press(&mut screen, &mut ctx, &[Button::Up]);
        assert_eq!(screen.selected_field(), Some(Field::KeyboardLayout));

        let mut seen = Vec::new();
        for _ in 0..10 {
            press(&mut screen, &mut ctx, &[Button::Down]);
            seen.push(screen.selected_field());
        }
        assert!(seen.iter().all(Option::is_some));
        assert_eq!(screen.selected_field(), Some(Field::DecoyMode));

        press(&mut screen, &mut ctx, &[Button::Up, Button::Up]);
        assert_eq!(screen.selected_field(), Some(Field::StealthMode));
    }

    #[test]
    fn toggles_and_selectors() {
        let (mut screen, mut ctx) = setup();
        press(&mut screen, &mut ctx, &[Button::A]);
        assert_eq!(ctx.settings.keyboard_layout, KeyboardLayout::Alphabetical);

        press(&mut screen, &mut ctx, &[Button::Down, Button::Down, Button::Start]);
        assert!(ctx.settings.stealth_visual_mode);

        press(&mut screen, &mut ctx, &[Button::Down, Button::Left]);
        assert_eq!(ctx.settings.default_template, NoteTemplate::Charting);

        press(&mut screen, &mut ctx, &[Button::Down, Button::Right, Button::Right, Button::Right]);
        assert_eq!(ctx.settings.decoy_mode, DecoyMode::FakeUpdate);
    }

    #[test]
    fn slider_clamps() {
        let (mut screen, mut ctx) = setup();
        press(&mut screen, &mut ctx, &[Button::Down]);
        for _ in 0..20 {
            press(&mut screen, &mut ctx, &[Button::Right]);
        }
        assert!((ctx.settings.smoothing_strength - 0.5).abs() < 1e-6);
        for _ in 0..20 {
            press(&mut screen, &mut ctx, &[Button::Left]);
        }
        assert!((ctx.settings.smoothing_strength - 0.1).abs() < 1e-6);
    }

    #[test]
    fn back_requests_browser() {
        let (mut screen, mut ctx) = setup();
        press(&mut screen, &mut ctx, &[Button::B]);
        assert_eq!(ctx.take_request(), Some(ScreenId::Browser));
        press(&mut screen, &mut ctx, &[Button::Menu]);
        assert_eq!(ctx.take_request(), Some(ScreenId::Browser));
    }

    #[test]
    fn renders_headers_values_and_footer() {
        let (screen, ctx) = setup();
        let mut surface = RecordingSurface::new(80, 24);
        screen.render(&ctx, &mut surface);
        for header in ["[ INPUT ]", "[ VISUALS ]", "[ NOTES ]", "[ SECURITY ]"] {
            assert!(surface.contains_text(header), "{header}");
        }
        assert!(surface.contains_text("0.22"));
        assert!(surface.contains_text("MEM: "));
    }
}
