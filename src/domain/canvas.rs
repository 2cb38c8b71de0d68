//! Shapes, arrows and snapshots for the diagram canvas.
//!
//! Positions are floating point so held-key drags can move in small steps.
//! Shape equality tolerates [`POSITION_EPSILON`] on every float field; that
//! keeps history de-duplication working after a drag that returns a shape to
//! where it started.

use crate::ui::Color;

/// Float tolerance used by [`Shape`] equality.
pub const POSITION_EPSILON: f32 = 0.001;

/// Default width and height of a new shape, in cells.
pub const DEFAULT_SIZE: (f32, f32) = (10.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    /// `w`/`h` hold the end point rather than a size.
    Line,
    TextNode,
}

impl ShapeKind {
    /// Next kind in the tool cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Square => Self::Circle,
            Self::Circle => Self::Triangle,
            Self::Triangle => Self::Line,
            Self::Line => Self::TextNode,
            Self::TextNode => Self::Square,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Line => "Line",
            Self::TextNode => "Text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Color,
    pub text: String,
    pub id: u32,
}

impl Shape {
    /// Builds a shape of `kind` anchored at `(x, y)` with the default size.
    #[must_use]
    pub fn new(kind: ShapeKind, x: f32, y: f32, id: u32) -> Self {
        let (w, h) = match kind {
            ShapeKind::Line => (x + DEFAULT_SIZE.0, y),
            _ => DEFAULT_SIZE,
        };
        let text = if kind == ShapeKind::TextNode {
            format!("Node {id}")
        } else {
            String::new()
        };
        Self {
            kind,
            x,
            y,
            w,
            h,
            color: Color::WHITE,
            text,
            id,
        }
    }

    /// Centre point, used as the arrow anchor.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        match self.kind {
            ShapeKind::Line => ((self.x + self.w) / 2.0, (self.y + self.h) / 2.0),
            _ => (self.x + self.w / 2.0, self.y + self.h / 2.0),
        }
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < POSITION_EPSILON
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.w, other.w)
            && close(self.h, other.h)
            && self.color == other.color
            && self.text == other.text
            && self.id == other.id
    }
}

/// Directed link between two shapes, by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub from: u32,
    pub to: u32,
}

/// Complete canvas state as recorded in history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasSnapshot {
    pub shapes: Vec<Shape>,
    pub arrows: Vec<Arrow>,
    pub next_id: u32,
}

impl CanvasSnapshot {
    /// Appends a new shape with a fresh id and returns its index.
    pub fn add_shape(&mut self, kind: ShapeKind, x: f32, y: f32) -> usize {
        let shape = Shape::new(kind, x, y, self.next_id);
        self.next_id += 1;
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Appends a copy of `shape` moved by `offset`, with a fresh id.
    pub fn paste(&mut self, shape: &Shape, offset: f32) -> usize {
        let mut copy = shape.clone();
        copy.x += offset;
        copy.y += offset;
        if copy.kind == ShapeKind::Line {
            copy.w += offset;
            copy.h += offset;
        }
        copy.id = self.next_id;
        self.next_id += 1;
        self.shapes.push(copy);
        self.shapes.len() - 1
    }

    #[must_use]
    pub fn shape_by_id(&self, id: u32) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_tolerates_tiny_drift() {
        let a = Shape::new(ShapeKind::Square, 10.0, 10.0, 0);
        let mut b = a.clone();
        b.x += 0.0004;
        assert_eq!(a, b);
        b.x += 0.01;
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut canvas = CanvasSnapshot::default();
        canvas.add_shape(ShapeKind::Square, 0.0, 0.0);
        let first = canvas.shapes[0].clone();
        let pasted = canvas.paste(&first, 2.0);
        assert_eq!(canvas.shapes[pasted].id, 1);
        assert!((canvas.shapes[pasted].x - 2.0).abs() < POSITION_EPSILON);
        assert_eq!(canvas.next_id, 2);
    }

    #[test]
    fn line_stores_its_end_point() {
        let line = Shape::new(ShapeKind::Line, 4.0, 3.0, 0);
        assert!((line.w - 14.0).abs() < POSITION_EPSILON);
        assert!((line.h - 3.0).abs() < POSITION_EPSILON);
    }

    #[test]
    fn tool_cycle_wraps() {
        let mut kind = ShapeKind::Square;
        for _ in 0..5 {
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Square);
    }
}
