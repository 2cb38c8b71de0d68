//! Note list.

use super::{draw_footer, draw_title, Lifecycle, NoteRef, ScreenId};
use crate::app::context::AppContext;
use crate::input::{Button, InputEvent};
use crate::storage::NoteEntry;
use crate::ui::{Rect, Surface};

pub const EMPTY_MESSAGE: &str = "No files found. Press X to create new.";

const HINT: &str = "A open  X new  R1 canvas  Y hide  MENU settings";

/// First list row.
const LIST_TOP: i32 = 3;

#[derive(Debug, Default)]
pub struct BrowserScreen {
    entries: Vec<NoteEntry>,
    selected: usize,
}

impl BrowserScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    fn refresh(&mut self, ctx: &AppContext) {
        self.entries = ctx.list_notes();
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    fn hide_selected(&mut self, ctx: &mut AppContext) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.hidden {
            return;
        }
        if ctx.hide_note(&entry.name).is_some() {
            self.refresh(ctx);
        }
    }
}

impl Lifecycle for BrowserScreen {
    fn enter(&mut self, ctx: &mut AppContext) {
        self.selected = 0;
        self.refresh(ctx);
        tracing::debug!(count = self.entries.len(), "browser listing");
    }

    fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent) {
        let InputEvent::KeyDown(button) = event else {
            return;
        };
        let len = self.entries.len();

        match button {
            Button::Up if len > 0 => self.selected = (self.selected + len - 1) % len,
            Button::Down if len > 0 => self.selected = (self.selected + 1) % len,
            Button::A | Button::Start => {
                if let Some(entry) = self.entries.get(self.selected) {
                    ctx.request(ScreenId::Editor(NoteRef {
                        name: entry.name.clone(),
                        hidden: entry.hidden,
                    }));
                }
            }
            Button::X => ctx.request(ScreenId::Editor(NoteRef::new_document())),
            Button::R1 => ctx.request(ScreenId::Canvas),
            Button::Y => self.hide_selected(ctx),
            Button::Menu => ctx.request(ScreenId::Settings),
            _ => {}
        }
    }

    fn render(&self, ctx: &AppContext, surface: &mut dyn Surface) {
        let palette = ctx.palette();
        surface.clear(palette.background);
        draw_title(surface, &palette, 0, "FILE BROWSER", &format!("{} notes", self.entries.len()));

        if self.entries.is_empty() {
            surface.draw_text(4, LIST_TOP + 2, EMPTY_MESSAGE, palette.text_dim);
        }

        let bounds = surface.bounds();
        let visible = usize::try_from(bounds.h - LIST_TOP - 2).unwrap_or(0).max(1);
        let first = self.selected.saturating_sub(visible - 1);

        for (row, (index, entry)) in self.entries.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = LIST_TOP + i32::try_from(row).unwrap_or(0);
            if index == self.selected {
                surface.fill_rect(Rect::new(2, y, bounds.w - 4, 1), palette.selection_bg);
                surface.draw_text(2, y, ">", palette.accent);
                surface.draw_text(4, y, &entry.display_name(), palette.selection_fg);
            } else {
                surface.draw_text(4, y, &entry.display_name(), palette.text);
            }
        }

        draw_footer(surface, &palette, HINT);
    }
}
