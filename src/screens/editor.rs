//! Bullet-journal text editor with predictive D-pad entry.
//!
//! Text is entered through [`PredictiveInput`]. Buttons the input engine has
//! no use for fall through to line navigation. Every edit records a snapshot
//! of the whole document in a [`HistoryManager`]; L2 and R2 walk it.

use super::{draw_title, fade, Lifecycle, NoteRef, ScreenId};
use crate::app::context::AppContext;
use crate::app::modes::NoteTemplate;
use crate::domain::document::{completion_ratio, format_document, is_blank, parse_document};
use crate::domain::{HistoryManager, Line};
use crate::input::predictive::{Entry, Response, CRANK_WIDTH};
use crate::input::{Button, InputEvent, PredictiveInput};
use crate::ui::motion::approach;
use crate::ui::{Palette, Rect, Surface};

/// Pop-scale decay per second.
const POP_DECAY: f32 = 3.0;

/// First document row on screen.
const BODY_TOP: i32 = 3;

pub struct EditorScreen {
    note: NoteRef,
    lines: Vec<Line>,
    current: usize,
    history: HistoryManager<Vec<Line>>,
    input: PredictiveInput,
    layout: NoteTemplate,
    progress: f32,
    dirty: bool,
}

impl EditorScreen {
    #[must_use]
    pub fn new(note: NoteRef) -> Self {
        let lines = vec![Line::default()];
        let mut history = HistoryManager::new();
        history.push(lines.clone());
        Self {
            note,
            lines,
            current: 0,
            history,
            input: PredictiveInput::default(),
            layout: NoteTemplate::default(),
            progress: 0.0,
            dirty: false,
        }
    }

    #[must_use]
    pub const fn note(&self) -> &NoteRef {
        &self.note
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryManager<Vec<Line>> {
        &self.history
    }

    #[must_use]
    pub const fn layout(&self) -> NoteTemplate {
        self.layout
    }

    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// The word being typed at the end of the current line.
    fn partial_word(&self) -> &str {
        let content = &self.lines[self.current].content;
        content.rsplit(char::is_whitespace).next().unwrap_or("")
    }

    fn sync_partial(&mut self) {
        let partial = self.partial_word().to_string();
        self.input.set_partial(&partial);
    }

    /// Records the document after an edit.
    fn commit(&mut self) {
        self.history.push(self.lines.clone());
        self.dirty = true;
        self.sync_partial();
    }

    fn restore(&mut self, snapshot: Vec<Line>) {
        if snapshot != self.lines {
            self.dirty = true;
        }
        self.lines = if snapshot.is_empty() { vec![Line::default()] } else { snapshot };
        self.current = self.current.min(self.lines.len() - 1);
        self.sync_partial();
    }

    fn type_entry(&mut self, entry: Entry) {
        let partial_len = self.partial_word().len();
        let line = &mut self.lines[self.current];
        match entry {
            Entry::Char(c) => {
                if line.content.is_empty() {
                    line.content.extend(c.to_uppercase());
                } else {
                    line.content.push(c);
                }
            }
            Entry::Word(word) => {
                let keep = line.content.len() - partial_len;
                line.content.truncate(keep);
                if line.content.is_empty() {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        line.content.extend(first.to_uppercase());
                        line.content.push_str(chars.as_str());
                    }
                } else {
                    line.content.push_str(&word);
                }
                line.content.push(' ');
            }
        }
    }

    fn save(&mut self, ctx: &mut AppContext) {
        if !self.dirty || (self.note.is_new() && is_blank(&self.lines)) {
            return;
        }
        if self.note.is_new() {
            self.note.name = chrono::Local::now().format("note-%Y%m%d-%H%M%S.txt").to_string();
        }
        if ctx.write_note(&self.note, &format_document(&self.lines)) {
            tracing::info!(name = %self.note.name, lines = self.lines.len(), "note saved");
            self.dirty = false;
        }
    }
}

impl Lifecycle for EditorScreen {
    fn enter(&mut self, ctx: &mut AppContext) {
        if self.note.is_new() {
            self.layout = ctx.settings.default_template;
        } else {
            self.layout = NoteTemplate::RapidLog;
            if let Some(text) = ctx.read_note(&self.note) {
                self.lines = parse_document(&text);
                self.current = 0;
                self.history.clear();
            }
        }

        self.input.set_layout(ctx.settings.keyboard_layout);
        let text: Vec<&str> = self.lines.iter().map(|line| line.content.as_str()).collect();
        self.input.learn(&text.join(" "));
        self.sync_partial();
        self.history.push(self.lines.clone());
        self.progress = completion_ratio(&self.lines);

        tracing::debug!(name = %self.note.name, lines = self.lines.len(), "editor opened");
    }

    fn exit(&mut self, ctx: &mut AppContext) {
        self.save(ctx);
    }

    fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent) {
        let InputEvent::KeyDown(button) = event else {
            return;
        };

        match button {
            Button::L2 => {
                let snapshot = self.history.undo(self.lines.clone());
                self.restore(snapshot);
            }
            Button::R2 => {
                let snapshot = self.history.redo(self.lines.clone());
                self.restore(snapshot);
            }
            Button::B | Button::Menu => ctx.request(ScreenId::Browser),
            Button::Y => {
                self.lines[self.current].cycle_bullet();
                self.commit();
            }
            Button::X => {
                self.lines[self.current].toggle_completed();
                self.commit();
            }
            Button::A => {
                self.lines.insert(self.current + 1, Line::default());
                self.current += 1;
                self.commit();
            }
            _ => match self.input.handle(button) {
                Response::Typed(entry) => {
                    self.type_entry(entry);
                    self.commit();
                }
                Response::Ignored => match button {
                    Button::Up if self.current > 0 => {
                        self.current -= 1;
                        self.sync_partial();
                    }
                    Button::Down if self.current + 1 < self.lines.len() => {
                        self.current += 1;
                        self.sync_partial();
                    }
                    _ => {}
                },
                Response::Moved => {}
            },
        }
    }

    fn update(&mut self, ctx: &mut AppContext) {
        let elapsed = ctx.elapsed();
        let strength = ctx.settings.smoothing_strength;

        self.input.update(elapsed, strength);
        self.progress = approach(self.progress, completion_ratio(&self.lines), strength, elapsed);

        let decay = POP_DECAY * elapsed.as_secs_f32();
        for line in &mut self.lines {
            if line.pop_scale > 1.0 {
                line.pop_scale = (line.pop_scale - decay).max(1.0);
            }
        }
    }

    fn render(&self, ctx: &AppContext, surface: &mut dyn Surface) {
        let palette = ctx.palette();
        let bounds = surface.bounds();
        surface.clear(palette.background);

        let track = Rect::new(1, 0, bounds.w - 2, 1);
        surface.fill_rect(track, palette.track);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let filled = (track.w as f32 * self.progress.clamp(0.0, 1.0)).round() as i32;
        if filled > 0 {
            surface.fill_rect(Rect::new(track.x, track.y, filled, 1), palette.progress);
        }

        let title = if self.note.is_new() { "(new note)" } else { self.note.name.as_str() };
        let affordance = format!(
            "{}  {}  {}",
            self.layout.label(),
            if self.history.can_undo() { "L2 undo" } else { "       " },
            if self.history.can_redo() { "R2 redo" } else { "       " },
        );
        draw_title(surface, &palette, 1, title, &affordance);

        let body = Rect::new(0, BODY_TOP, bounds.w - CRANK_WIDTH - 1, bounds.h - BODY_TOP - 2);
        match self.layout {
            NoteTemplate::RapidLog => self.render_lines(surface, &palette, body.x + 1, body),
            NoteTemplate::Cornell => {
                let split_x = body.w * 3 / 10;
                let split_y = body.y + body.h * 8 / 10;
                surface.draw_line((split_x, body.y), (split_x, split_y), palette.border);
                surface.draw_line((0, split_y), (body.right() - 1, split_y), palette.border);
                let area = Rect::new(split_x + 2, body.y, body.w - split_x - 2, split_y - body.y);
                self.render_lines(surface, &palette, area.x, area);
            }
            NoteTemplate::Charting => {
                let column = body.w / 3;
                surface.draw_line((column, body.y), (column, body.bottom() - 1), palette.border);
                surface.draw_line((column * 2, body.y), (column * 2, body.bottom() - 1), palette.border);
                self.render_lines(surface, &palette, body.x + 1, Rect::new(body.x, body.y, column - 1, body.h));
            }
        }

        self.input.render(surface, &palette, Rect::new(0, BODY_TOP, bounds.w, bounds.h - BODY_TOP));
    }
}

impl EditorScreen {
    fn render_lines(&self, surface: &mut dyn Surface, palette: &Palette, x: i32, area: Rect) {
        let visible = usize::try_from(area.h).unwrap_or(0).max(1);
        let first = self.current.saturating_sub(visible - 1);

        for (row, (index, line)) in self.lines.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = area.y + i32::try_from(row).unwrap_or(0);
            let is_current = index == self.current;
            let color = if is_current { palette.accent } else { fade(palette.text, line.opacity) };
            let bullet_color = if line.pop_scale > 1.0 { palette.progress } else { color };

            surface.draw_text(x, y, &line.bullet.to_string(), bullet_color);
            let mark = if line.completed { "[x]" } else { "[ ]" };
            surface.draw_text(x + 2, y, mark, palette.text_dim);

            let mut content = line.content.clone();
            if is_current {
                content.push('_');
            }
            let max = usize::try_from(area.right() - x - 6).unwrap_or(0);
            let content: String = content.chars().take(max).collect();
            surface.draw_text(x + 6, y, &content, color);
        }
    }
}
