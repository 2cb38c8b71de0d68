//! Bullet-journal document model used by the editor.
//!
//! A document is a `Vec<Line>`. Lines carry two animation fields
//! (`pop_scale`, `opacity`) that are deliberately left out of equality so
//! history snapshots compare only what the user wrote.
//!
//! Documents are stored as plain text, one line per row:
//!
//! ```text
//! * [ ] buy milk
//! ! [x] call the bank
//! ```

/// Bullet glyphs in cycle order.
pub const BULLETS: [char; 5] = ['*', 'O', '-', '!', '?'];

/// Pop scale applied when a line is marked completed.
pub const COMPLETED_POP: f32 = 1.3;

/// Opacity of a completed line.
pub const COMPLETED_OPACITY: f32 = 0.5;

/// One editable row of a document.
#[derive(Debug, Clone)]
pub struct Line {
    pub content: String,
    pub bullet: char,
    pub completed: bool,
    /// Transient scale used for the completion "pop"; decays back to 1.0.
    pub pop_scale: f32,
    pub opacity: f32,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.bullet == other.bullet
            && self.completed == other.completed
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Line {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bullet: BULLETS[0],
            completed: false,
            pop_scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Advances the bullet to the next glyph in [`BULLETS`].
    ///
    /// Unknown glyphs restart the cycle at the second bullet, as if the line
    /// had carried the first one.
    pub fn cycle_bullet(&mut self) {
        let index = BULLETS.iter().position(|&b| b == self.bullet).unwrap_or(0);
        self.bullet = BULLETS[(index + 1) % BULLETS.len()];
    }

    /// Flips the completed flag and starts (or cancels) the pop animation.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        if self.completed {
            self.pop_scale = COMPLETED_POP;
            self.opacity = COMPLETED_OPACITY;
        } else {
            self.pop_scale = 1.0;
            self.opacity = 1.0;
        }
    }
}

/// Fraction of completed lines, in `[0, 1]`.
#[must_use]
pub fn completion_ratio(lines: &[Line]) -> f32 {
    if lines.is_empty() {
        return 0.0;
    }
    let done = lines.iter().filter(|line| line.completed).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = done as f32 / lines.len() as f32;
    ratio
}

/// Parses stored text into lines.
///
/// Rows that do not follow the `<bullet> [x] <content>` shape are kept
/// verbatim as plain `*` lines. Empty input yields a single empty line.
#[must_use]
pub fn parse_document(text: &str) -> Vec<Line> {
    let lines: Vec<Line> = text.lines().map(parse_line).collect();
    if lines.is_empty() {
        vec![Line::default()]
    } else {
        lines
    }
}

fn parse_line(row: &str) -> Line {
    let mut chars = row.chars();
    let (Some(bullet), Some(' '), Some('['), Some(mark), Some(']')) = (
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
    ) else {
        return Line::new(row);
    };

    if !BULLETS.contains(&bullet) || !matches!(mark, 'x' | ' ') {
        return Line::new(row);
    }

    let rest = chars.as_str();
    let mut line = Line::new(rest.strip_prefix(' ').unwrap_or(rest));
    line.bullet = bullet;
    if mark == 'x' {
        line.completed = true;
        line.opacity = COMPLETED_OPACITY;
    }
    line
}

/// Serializes lines to the stored text format.
#[must_use]
pub fn format_document(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        let mark = if line.completed { 'x' } else { ' ' };
        out.push_str(&format!("{} [{mark}] {}\n", line.bullet, line.content));
    }
    out
}

/// True when the document holds nothing worth saving.
#[must_use]
pub fn is_blank(lines: &[Line]) -> bool {
    lines
        .iter()
        .all(|line| line.content.trim().is_empty() && !line.completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_animation_fields() {
        let mut a = Line::new("x");
        let b = Line::new("x");
        a.pop_scale = 1.2;
        a.opacity = 0.1;
        assert_eq!(a, b);
    }

    #[test]
    fn bullets_cycle_and_wrap() {
        let mut line = Line::default();
        let seen: String = (0..5)
            .map(|_| {
                line.cycle_bullet();
                line.bullet
            })
            .collect();
        assert_eq!(seen, "O-!?*");
    }

    #[test]
    fn toggle_completed_sets_pop() {
        let mut line = Line::default();
        line.toggle_completed();
        assert!(line.completed);
        assert!((line.pop_scale - COMPLETED_POP).abs() < f32::EPSILON);
        line.toggle_completed();
        assert!((line.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn stored_text_survives_a_save() {
        let mut first = Line::new("call the bank");
        first.bullet = '!';
        first.toggle_completed();
        let doc = vec![first, Line::new("buy milk")];

        let text = format_document(&doc);
        assert_eq!(text, "! [x] call the bank\n* [ ] buy milk\n");
        assert_eq!(parse_document(&text), doc);
    }

    #[test]
    fn foreign_rows_become_plain_lines() {
        let doc = parse_document("just some text\n? [y] odd");
        assert_eq!(doc[0].content, "just some text");
        assert_eq!(doc[1].content, "? [y] odd");
        assert_eq!(doc[1].bullet, '*');
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(parse_document(""), vec![Line::default()]);
        assert!(is_blank(&parse_document("")));
    }

    #[test]
    fn ratio_counts_completed_lines() {
        let mut doc = vec![Line::new("a"), Line::new("b")];
        doc[0].toggle_completed();
        assert!((completion_ratio(&doc) - 0.5).abs() < f32::EPSILON);
        assert!(completion_ratio(&[]).abs() < f32::EPSILON);
    }
}
