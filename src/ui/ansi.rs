//! Cell-grid surface presented to a terminal with ANSI escapes.
//!
//! Draw requests land in an in-memory grid; [`AnsiSurface::present`] writes the
//! whole grid in one pass, emitting color escapes only when a run changes
//! color. Nothing is printed while a frame is being drawn.

use crate::ui::surface::{Color, Rect, Surface};
use crate::ui::theme::Theme;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg,
        }
    }
}

/// Terminal-backed [`Surface`].
#[derive(Debug, Clone)]
pub struct AnsiSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl AnsiSurface {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::blank(Color::BLACK); usize::from(cols) * usize::from(rows)],
        }
    }

    /// Resizes the grid; contents are discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        tracing::debug!(cols, rows, "surface resized");
        *self = Self::new(cols, rows);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < usize::from(self.cols) && y < usize::from(self.rows))
            .then(|| y * usize::from(self.cols) + x)
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    /// Character at `(x, y)`, if inside the grid.
    #[must_use]
    pub fn char_at(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i].ch)
    }

    /// Writes the frame to `out` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        let mut frame = String::with_capacity(self.cells.len() * 4);
        let mut current: Option<(Color, Color)> = None;

        for (row, line) in self.cells.chunks(usize::from(self.cols).max(1)).enumerate() {
            frame.push_str(&cursor_to(row + 1, 1));
            for cell in line {
                if current != Some((cell.fg, cell.bg)) {
                    frame.push_str(&Theme::fg(cell.fg));
                    frame.push_str(&Theme::bg(cell.bg));
                    current = Some((cell.fg, cell.bg));
                }
                frame.push(cell.ch);
            }
        }
        frame.push_str(Theme::reset());

        out.write_all(frame.as_bytes())?;
        out.flush()
    }
}

/// Escape moving the cursor to a 1-indexed `row`/`col`.
fn cursor_to(row: usize, col: usize) -> String {
    format!("\u{1b}[{row};{col}H")
}

/// Glyph for a line segment with the given direction.
const fn line_glyph(dx: i32, dy: i32) -> char {
    if dy == 0 {
        '─'
    } else if dx == 0 {
        '│'
    } else if (dx > 0) == (dy > 0) {
        '╲'
    } else {
        '╱'
    }
}

impl Surface for AnsiSurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self, background: Color) {
        self.cells.fill(Cell::blank(background));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (offset, ch) in (0..).zip(text.chars()) {
            self.put(x + offset, y, ch, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = Cell::blank(color);
                }
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        for x in left..=right {
            self.put(x, top, '─', color);
            self.put(x, bottom, '─', color);
        }
        for y in top..=bottom {
            self.put(left, y, '│', color);
            self.put(right, y, '│', color);
        }
        self.put(left, top, '┌', color);
        self.put(right, top, '┐', color);
        self.put(left, bottom, '└', color);
        self.put(right, bottom, '┘', color);
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let glyph = line_glyph(to.0 - from.0, to.1 - from.1);
        let mut err = dx + dy;

        loop {
            self.put(x, y, glyph, color);
            if (x, y) == to {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
