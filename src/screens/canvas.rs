//! Freeform diagram canvas.
//!
//! Shapes are placed at a fixed origin and then nudged with the D-pad one
//! cell per key-down (resized while L1 is held). A drag is recorded in
//! history once, when the D-pad key is released, so holding a direction does
//! not flood the undo stack.

use super::{draw_footer, draw_title, Lifecycle, ScreenId};
use crate::app::context::AppContext;
use crate::domain::{Arrow, CanvasSnapshot, HistoryManager, Shape, ShapeKind};
use crate::input::{Button, InputEvent};
use crate::ui::{Color, Rect, Surface};

/// Where new shapes appear.
pub const ORIGIN: (f32, f32) = (35.0, 9.0);

/// Offset of a pasted copy from its source, in cells.
pub const PASTE_OFFSET: f32 = 2.0;

const NUDGE: f32 = 1.0;
const MIN_SIZE: f32 = 1.0;

/// Points used to trace a circle outline.
const ELLIPSE_STEPS: u16 = 32;

const HINT: &str = "A add  R1 tool  SEL select  X copy/paste  Y link  L1+pad resize";

pub struct CanvasScreen {
    canvas: CanvasSnapshot,
    selected: Option<usize>,
    tool: ShapeKind,
    clipboard: Option<Shape>,
    history: HistoryManager<CanvasSnapshot>,
}

impl Default for CanvasScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            canvas: CanvasSnapshot::default(),
            selected: None,
            tool: ShapeKind::Square,
            clipboard: None,
            history: HistoryManager::new(),
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> &CanvasSnapshot {
        &self.canvas
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub const fn tool(&self) -> ShapeKind {
        self.tool
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryManager<CanvasSnapshot> {
        &self.history
    }

    fn record(&mut self) {
        self.history.push(self.canvas.clone());
    }

    /// Restores a snapshot, keeping the selection in range.
    fn load(&mut self, snapshot: CanvasSnapshot) {
        self.canvas = snapshot;
        if let Some(index) = self.selected {
            if index >= self.canvas.shapes.len() {
                self.selected = if self.canvas.shapes.is_empty() { None } else { Some(0) };
            }
        }
    }

    fn add(&mut self) {
        let index = self.canvas.add_shape(self.tool, ORIGIN.0, ORIGIN.1);
        if self.selected.is_none() {
            self.selected = Some(index);
        }
        self.record();
    }

    fn cycle_selection(&mut self) {
        let len = self.canvas.shapes.len();
        if len > 0 {
            self.selected = Some(self.selected.map_or(0, |index| (index + 1) % len));
        }
    }

    /// First press copies the selected shape; later presses paste.
    fn copy_or_paste(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        match self.clipboard.take() {
            Some(source) => {
                let pasted = self.canvas.paste(&source, PASTE_OFFSET);
                self.clipboard = Some(self.canvas.shapes[pasted].clone());
                self.selected = Some(pasted);
                self.record();
            }
            None => self.clipboard = self.canvas.shapes.get(index).cloned(),
        }
    }

    /// Links the first shape to the selection.
    fn link(&mut self) {
        let Some(index) = self.selected.filter(|&index| index > 0) else {
            return;
        };
        let (Some(first), Some(target)) = (self.canvas.shapes.first(), self.canvas.shapes.get(index)) else {
            return;
        };
        let arrow = Arrow {
            from: first.id,
            to: target.id,
        };
        if !self.canvas.arrows.contains(&arrow) {
            self.canvas.arrows.push(arrow);
            self.record();
        }
    }

    fn nudge(&mut self, button: Button, resize: bool) {
        let Some(shape) = self.selected.and_then(|index| self.canvas.shapes.get_mut(index)) else {
            return;
        };
        let (dx, dy) = match button {
            Button::Left => (-NUDGE, 0.0),
            Button::Right => (NUDGE, 0.0),
            Button::Up => (0.0, -NUDGE),
            Button::Down => (0.0, NUDGE),
            _ => return,
        };

        match (resize, shape.kind) {
            (true, ShapeKind::Line) => {
                shape.w += dx;
                shape.h += dy;
            }
            (true, _) => {
                shape.w = (shape.w + dx).max(MIN_SIZE);
                shape.h = (shape.h + dy).max(MIN_SIZE);
            }
            (false, kind) => {
                shape.x += dx;
                shape.y += dy;
                if kind == ShapeKind::Line {
                    shape.w += dx;
                    shape.h += dy;
                }
            }
        }
    }
}

impl Lifecycle for CanvasScreen {
    fn enter(&mut self, _ctx: &mut AppContext) {
        if self.canvas.shapes.is_empty() {
            self.canvas.add_shape(ShapeKind::Square, ORIGIN.0, ORIGIN.1);
            self.selected = Some(0);
        }
        self.record();
    }

    fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent) {
        match event {
            InputEvent::KeyDown(button) => match button {
                Button::B | Button::Menu => ctx.request(ScreenId::Browser),
                Button::L2 => {
                    let snapshot = self.history.undo(self.canvas.clone());
                    self.load(snapshot);
                }
                Button::R2 => {
                    let snapshot = self.history.redo(self.canvas.clone());
                    self.load(snapshot);
                }
                Button::A => self.add(),
                Button::R1 => self.tool = self.tool.next(),
                Button::Select => self.cycle_selection(),
                Button::X => self.copy_or_paste(),
                Button::Y => self.link(),
                dpad if dpad.is_dpad() => self.nudge(dpad, ctx.is_held(Button::L1)),
                _ => {}
            },
            InputEvent::KeyUp(button) if button.is_dpad() => self.record(),
            InputEvent::KeyUp(_) => {}
        }
    }

    fn render(&self, ctx: &AppContext, surface: &mut dyn Surface) {
        let palette = ctx.palette();
        surface.clear(palette.background);

        for arrow in &self.canvas.arrows {
            let (Some(from), Some(to)) = (self.canvas.shape_by_id(arrow.from), self.canvas.shape_by_id(arrow.to)) else {
                continue;
            };
            surface.draw_line(cell(from.center()), cell(to.center()), palette.text_dim);
        }

        for (index, shape) in self.canvas.shapes.iter().enumerate() {
            let color = if Some(index) == self.selected { palette.accent } else { shape.color };
            draw_shape(surface, shape, color);
        }

        let status = format!(
            "tool: {}  shapes: {}  arrows: {}{}",
            self.tool.label(),
            self.canvas.shapes.len(),
            self.canvas.arrows.len(),
            if self.clipboard.is_some() { "  [clip]" } else { "" },
        );
        draw_title(surface, &palette, 0, "CANVAS", &status);
        draw_footer(surface, &palette, HINT);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell((x, y): (f32, f32)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_shape(surface: &mut dyn Surface, shape: &Shape, color: Color) {
    let (x, y) = cell((shape.x, shape.y));
    let (w, h) = cell((shape.w, shape.h));

    match shape.kind {
        ShapeKind::Square => surface.draw_rect(Rect::new(x, y, w, h), color),
        ShapeKind::Circle => {
            let (cx, cy) = shape.center();
            let (rx, ry) = (shape.w / 2.0, shape.h / 2.0);
            for step in 0..ELLIPSE_STEPS {
                let angle = f32::from(step) / f32::from(ELLIPSE_STEPS) * std::f32::consts::TAU;
                let (px, py) = cell((cx + rx * angle.cos(), cy + ry * angle.sin()));
                surface.draw_text(px, py, "o", color);
            }
        }
        ShapeKind::Triangle => {
            let apex = (x + w / 2, y);
            let left = (x, y + h - 1);
            let right = (x + w - 1, y + h - 1);
            surface.draw_line(apex, left, color);
            surface.draw_line(left, right, color);
            surface.draw_line(right, apex, color);
        }
        ShapeKind::Line => surface.draw_line((x, y), (w, h), color),
        ShapeKind::TextNode => {
            surface.draw_rect(Rect::new(x, y, w, h), color);
            surface.draw_text(x + 1, y + h / 2, &shape.text, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryNoteStore, MemorySettingsStore};
    use crate::ui::{RecordingSurface, Theme};

    fn setup() -> (CanvasScreen, AppContext) {
        let mut ctx = AppContext::new(
            Box::new(MemoryNoteStore::new()),
            Box::new(MemorySettingsStore::new()),
            &Theme::default(),
        );
        let mut canvas = CanvasScreen::new();
        canvas.enter(&mut ctx);
        (canvas, ctx)
    }

    fn down(canvas: &mut CanvasScreen, ctx: &mut AppContext, button: Button) {
        canvas.handle_input(ctx, InputEvent::KeyDown(button));
    }

    #[test]
    fn starts_with_selected_square() {
        let (canvas, _) = setup();
        assert_eq!(canvas.snapshot().shapes.len(), 1);
        assert_eq!(canvas.snapshot().shapes[0].kind, ShapeKind::Square);
        assert_eq!(canvas.snapshot().shapes[0].id, 0);
        assert_eq!(canvas.selected(), Some(0));
        assert_eq!(canvas.history().undo_len(), 1);
    }

    #[test]
    fn drag_records_once_on_release() {
        let (mut canvas, mut ctx) = setup();
        for _ in 0..3 {
            down(&mut canvas, &mut ctx, Button::Right);
        }
        assert_eq!(canvas.history().undo_len(), 1);
        canvas.handle_input(&mut ctx, InputEvent::KeyUp(Button::Right));
        assert_eq!(canvas.history().undo_len(), 2);
        assert!((canvas.snapshot().shapes[0].x - (ORIGIN.0 + 3.0)).abs() < 1e-6);
    }

    #[test]
    fn l1_held_resizes() {
        let (mut canvas, mut ctx) = setup();
        let mut held = crate::input::HeldKeys::empty();
        held.press(Button::L1);
        ctx.set_input(held);

        down(&mut canvas, &mut ctx, Button::Down);
        let shape = &canvas.snapshot().shapes[0];
        assert!((shape.h - 6.0).abs() < 1e-6);
        assert!((shape.y - ORIGIN.1).abs() < 1e-6);
    }

    #[test]
    fn copy_then_paste_offsets_and_selects_copy() {
        let (mut canvas, mut ctx) = setup();
        down(&mut canvas, &mut ctx, Button::X);
        assert_eq!(canvas.snapshot().shapes.len(), 1);

        down(&mut canvas, &mut ctx, Button::X);
        let shapes = &canvas.snapshot().shapes;
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1].id, 1);
        assert!((shapes[1].x - (ORIGIN.0 + PASTE_OFFSET)).abs() < 1e-6);
        assert_eq!(canvas.selected(), Some(1));
    }

    #[test]
    fn link_requires_non_first_selection_and_deduplicates() {
        let (mut canvas, mut ctx) = setup();
        down(&mut canvas, &mut ctx, Button::Y);
        assert!(canvas.snapshot().arrows.is_empty());

        down(&mut canvas, &mut ctx, Button::A);
        down(&mut canvas, &mut ctx, Button::Select);
        down(&mut canvas, &mut ctx, Button::Y);
        down(&mut canvas, &mut ctx, Button::Y);
        assert_eq!(canvas.snapshot().arrows, [Arrow { from: 0, to: 1 }]);
    }

    #[test]
    fn undo_clamps_selection() {
        let (mut canvas, mut ctx) = setup();
        down(&mut canvas, &mut ctx, Button::A);
        down(&mut canvas, &mut ctx, Button::Select);
        assert_eq!(canvas.selected(), Some(1));

        down(&mut canvas, &mut ctx, Button::L2);
        assert_eq!(canvas.snapshot().shapes.len(), 1);
        assert_eq!(canvas.selected(), Some(0));
    }

    #[test]
    fn tool_cycles_and_renders_status() {
        let (mut canvas, mut ctx) = setup();
        down(&mut canvas, &mut ctx, Button::R1);
        assert_eq!(canvas.tool(), ShapeKind::Circle);

        let mut surface = RecordingSurface::new(80, 24);
        canvas.render(&ctx, &mut surface);
        assert!(surface.contains_text("tool: Circle"));
    }
}
