//! D-pad text entry: a character ribbon and a word-prediction crank.
//!
//! The ribbon is a horizontal strip of characters scrolled with Left/Right
//! (L1/R1 jump five). The crank is a vertical list of predicted words scrolled
//! with Up/Down. Select swaps focus between the two and Start commits whatever
//! the focused widget points at.
//!
//! Predictions are ranked with a skim fuzzy matcher against the partial word
//! being typed; words starting with the partial word always rank first.

use super::keys::Button;
use crate::app::modes::KeyboardLayout;
use crate::ui::motion::approach;
use crate::ui::{Palette, Rect, Surface};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Duration;

pub const STANDARD_RIBBON: &str = "qwertyuiopasdfghjklzxcvbnm ";
pub const ALPHABETICAL_RIBBON: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Ribbon positions skipped by L1/R1.
const RIBBON_JUMP: usize = 5;

/// Score bonus that keeps prefix matches ahead of scattered fuzzy matches.
const PREFIX_BONUS: i64 = 1_000;

/// Shortest document word added to the dictionary.
const MIN_LEARNED_LEN: usize = 3;

const BASE_DICTIONARY: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "hello", "world",
    "notepad", "editor", "canvas", "system", "update", "project", "manager", "task",
    "event", "note", "priority", "research", "meeting", "today", "tomorrow", "idea",
    "follow", "review", "draft", "call", "email", "buy", "read", "write", "plan",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ribbon,
    Crank,
}

/// Text produced by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Char(char),
    /// A whole predicted word that completes the partial word.
    Word(String),
}

/// Outcome of feeding one button to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The engine has no use for the button in its current focus.
    Ignored,
    /// Internal state changed (cursor moved, focus swapped).
    Moved,
    Typed(Entry),
}

#[derive(Debug, Clone)]
pub struct PredictiveInput {
    ribbon: Vec<char>,
    ribbon_index: usize,
    crank_index: usize,
    dictionary: Vec<String>,
    predictions: Vec<String>,
    partial: String,
    focus: Focus,
    ribbon_visual: f32,
    crank_visual: f32,
}

impl Default for PredictiveInput {
    fn default() -> Self {
        Self::new(KeyboardLayout::Standard)
    }
}

impl PredictiveInput {
    #[must_use]
    pub fn new(layout: KeyboardLayout) -> Self {
        let dictionary: Vec<String> = BASE_DICTIONARY.iter().map(|w| (*w).to_string()).collect();
        Self {
            ribbon: ribbon_for(layout),
            ribbon_index: 0,
            crank_index: 0,
            predictions: dictionary.clone(),
            dictionary,
            partial: String::new(),
            focus: Focus::Ribbon,
            ribbon_visual: 0.0,
            crank_visual: 0.0,
        }
    }

    /// Switches the ribbon character set, keeping the cursor in range.
    pub fn set_layout(&mut self, layout: KeyboardLayout) {
        self.ribbon = ribbon_for(layout);
        self.ribbon_index = self.ribbon_index.min(self.ribbon.len() - 1);
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn ribbon_char(&self) -> char {
        self.ribbon[self.ribbon_index]
    }

    #[must_use]
    pub fn predictions(&self) -> &[String] {
        &self.predictions
    }

    /// Word under the crank cursor.
    #[must_use]
    pub fn current_prediction(&self) -> Option<&str> {
        self.predictions.get(self.crank_index).map(String::as_str)
    }

    /// Adds the words of `text` to the dictionary.
    pub fn learn(&mut self, text: &str) {
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_LEARNED_LEN)
        {
            let word = word.to_lowercase();
            if !self.dictionary.contains(&word) {
                self.dictionary.push(word);
            }
        }
        self.rank();
    }

    /// Re-ranks predictions for the word currently being typed.
    pub fn set_partial(&mut self, partial: &str) {
        let partial = partial.to_lowercase();
        if partial != self.partial {
            self.partial = partial;
            self.rank();
        }
    }

    fn rank(&mut self) {
        self.crank_index = 0;
        if self.partial.is_empty() {
            self.predictions = self.dictionary.clone();
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &String)> = self
            .dictionary
            .iter()
            .filter_map(|word| {
                let score = matcher.fuzzy_match(word, &self.partial)?;
                let bonus = if word.starts_with(&self.partial) { PREFIX_BONUS } else { 0 };
                Some((score + bonus, word))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        self.predictions = scored.into_iter().map(|(_, word)| word.clone()).collect();
    }

    /// Feeds one pressed button to the engine.
    pub fn handle(&mut self, button: Button) -> Response {
        if button == Button::Select {
            self.focus = match self.focus {
                Focus::Ribbon => Focus::Crank,
                Focus::Crank => Focus::Ribbon,
            };
            return Response::Moved;
        }

        match self.focus {
            Focus::Ribbon => self.handle_ribbon(button),
            Focus::Crank => self.handle_crank(button),
        }
    }

    fn handle_ribbon(&mut self, button: Button) -> Response {
        let len = self.ribbon.len();
        self.ribbon_index = match button {
            Button::Left => (self.ribbon_index + len - 1) % len,
            Button::Right => (self.ribbon_index + 1) % len,
            Button::L1 => (self.ribbon_index + len - RIBBON_JUMP % len) % len,
            Button::R1 => (self.ribbon_index + RIBBON_JUMP) % len,
            Button::Start => return Response::Typed(Entry::Char(self.ribbon_char())),
            _ => return Response::Ignored,
        };
        Response::Moved
    }

    fn handle_crank(&mut self, button: Button) -> Response {
        let len = self.predictions.len();
        match button {
            Button::Up if len > 0 => self.crank_index = (self.crank_index + len - 1) % len,
            Button::Down if len > 0 => self.crank_index = (self.crank_index + 1) % len,
            Button::Up | Button::Down => {}
            Button::Start => {
                return self
                    .current_prediction()
                    .map_or(Response::Moved, |word| Response::Typed(Entry::Word(word.to_string())));
            }
            _ => return Response::Ignored,
        }
        Response::Moved
    }

    /// Advances the smoothed ribbon and crank positions.
    pub fn update(&mut self, elapsed: Duration, strength: f32) {
        #[allow(clippy::cast_precision_loss)]
        let (ribbon_target, crank_target) = (self.ribbon_index as f32, self.crank_index as f32);
        self.ribbon_visual = approach(self.ribbon_visual, ribbon_target, strength, elapsed);
        self.crank_visual = approach(self.crank_visual, crank_target, strength, elapsed);
    }

    /// Draws the ribbon along the bottom row of `area` and the crank down its
    /// right edge.
    pub fn render(&self, surface: &mut dyn Surface, palette: &Palette, area: Rect) {
        let ribbon_row = area.bottom() - 1;
        let center_x = area.x + area.w / 2;

        let marker = Rect::new(center_x - 1, ribbon_row, 3, 1);
        if self.focus == Focus::Ribbon {
            surface.fill_rect(marker, palette.selection_bg);
        }
        for (i, &ch) in self.ribbon.iter().enumerate() {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let x = center_x + ((i as f32 - self.ribbon_visual) * 3.0).round() as i32;
            if x < area.x || x >= area.right() {
                continue;
            }
            let color = if i == self.ribbon_index { palette.selection_fg } else { palette.text_dim };
            let glyph = if ch == ' ' { '␣' } else { ch.to_ascii_uppercase() };
            surface.draw_text(x, ribbon_row, &glyph.to_string(), color);
        }

        let crank_x = area.right() - CRANK_WIDTH;
        let center_y = area.y + (area.h - 1) / 2;
        if self.focus == Focus::Crank {
            surface.fill_rect(Rect::new(crank_x - 1, center_y, CRANK_WIDTH, 1), palette.selection_bg);
        }
        if self.predictions.is_empty() {
            surface.draw_text(crank_x, center_y, "(no match)", palette.text_dim);
        }
        for (i, word) in self.predictions.iter().enumerate() {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let y = center_y + (i as f32 - self.crank_visual).round() as i32;
            if y < area.y || y >= ribbon_row {
                continue;
            }
            let color = if i == self.crank_index { palette.selection_fg } else { palette.text_dim };
            surface.draw_text(crank_x, y, word, color);
        }
    }
}

/// Columns reserved for the crank at the right edge of the editor.
pub const CRANK_WIDTH: i32 = 14;

fn ribbon_for(layout: KeyboardLayout) -> Vec<char> {
    match layout {
        KeyboardLayout::Standard => STANDARD_RIBBON.chars().collect(),
        KeyboardLayout::Alphabetical => ALPHABETICAL_RIBBON.chars().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ribbon_wraps_in_both_directions() {
        let mut input = PredictiveInput::new(KeyboardLayout::Alphabetical);
        assert_eq!(input.handle(Button::Left), Response::Moved);
        assert_eq!(input.ribbon_char(), ' ');
        input.handle(Button::Right);
        assert_eq!(input.ribbon_char(), 'a');
        input.handle(Button::L1);
        assert_eq!(input.ribbon_char(), 'w');
        input.handle(Button::R1);
        assert_eq!(input.ribbon_char(), 'a');
    }

    #[test]
    fn start_commits_ribbon_char() {
        let mut input = PredictiveInput::new(KeyboardLayout::Standard);
        input.handle(Button::Right);
        assert_eq!(input.handle(Button::Start), Response::Typed(Entry::Char('w')));
    }

    #[test]
    fn up_down_are_ignored_in_ribbon_focus() {
        let mut input = PredictiveInput::default();
        assert_eq!(input.handle(Button::Up), Response::Ignored);
        input.handle(Button::Select);
        assert_eq!(input.focus(), Focus::Crank);
        assert_eq!(input.handle(Button::Up), Response::Moved);
    }

    #[test]
    fn prefix_matches_rank_first() {
        let mut input = PredictiveInput::default();
        input.set_partial("re");
        let top: Vec<&str> = input.predictions().iter().take(2).map(String::as_str).collect();
        assert!(top.iter().all(|w| w.starts_with("re")), "{top:?}");
        assert!(input.predictions().iter().all(|w| w.contains('r')));
    }

    #[test]
    fn crank_commits_whole_word() {
        let mut input = PredictiveInput::default();
        input.learn("Zebra crossing");
        input.set_partial("zeb");
        input.handle(Button::Select);
        assert_eq!(input.handle(Button::Start), Response::Typed(Entry::Word("zebra".into())));
    }

    #[test]
    fn no_match_commits_nothing() {
        let mut input = PredictiveInput::default();
        input.set_partial("qqqqq");
        input.handle(Button::Select);
        assert!(input.predictions().is_empty());
        assert_eq!(input.handle(Button::Start), Response::Moved);
    }
}
