//! Drawing surface abstraction.
//!
//! Screens never touch the terminal. They issue draw requests against a
//! [`Surface`]; the terminal host backs it with [`AnsiSurface`](super::ansi::AnsiSurface)
//! and tests back it with [`RecordingSurface`]. Coordinates are character
//! cells, origin top-left. Requests falling outside the surface are clipped.

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the `#` is optional).
    ///
    /// Malformed input yields white, matching how themes degrade.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Self::WHITE;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        Self::rgb(channel(0..2), channel(2..4), channel(4..6))
    }
}

/// Axis-aligned cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Output target for a frame.
pub trait Surface {
    /// Surface size as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Fills the whole surface with `background`.
    fn clear(&mut self, background: Color);

    /// Draws `text` starting at cell `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws the outline of `rect`.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);

    /// Bounds of the whole surface.
    fn bounds(&self) -> Rect {
        let (cols, rows) = self.size();
        Rect::new(0, 0, i32::from(cols), i32::from(rows))
    }

    /// Draws `text` horizontally centred on row `y`.
    fn draw_text_centered(&mut self, y: i32, text: &str, color: Color) {
        let width = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let x = (self.bounds().w - width) / 2;
        self.draw_text(x.max(0), y, text, color);
    }
}

/// One recorded draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Color),
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
    },
}

/// Surface that records draw requests instead of rendering them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    cols: u16,
    rows: u16,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Every piece of text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// True if any drawn text contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    /// Drops everything recorded so far.
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self, background: Color) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear(background));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::DrawRect(rect, color));
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_optional_hash() {
        assert_eq!(Color::from_hex("#ff8000"), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_hex("0a0b0c"), Color::rgb(10, 11, 12));
        assert_eq!(Color::from_hex("#abc"), Color::WHITE);
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new(20, 5);
        surface.draw_text(0, 0, "old", Color::WHITE);
        surface.clear(Color::BLACK);
        surface.draw_text_centered(1, "hello", Color::WHITE);

        assert!(!surface.contains_text("old"));
        assert_eq!(
            surface.calls()[1],
            DrawCall::Text {
                x: 7,
                y: 1,
                text: "hello".to_string(),
                color: Color::WHITE
            }
        );
    }
}
