//! The five screens and their shared lifecycle.
//!
//! Exactly one [`Screen`] is active at a time. The controller drives it
//! through [`Lifecycle`]: `enter` once, then any number of
//! `handle_input`/`update`/`render` calls, then `exit` once. A transition
//! drops the old screen entirely; the next one starts from scratch.
//!
//! | From | Trigger | To |
//! |---|---|---|
//! | Browser | A or Start on a note | Editor(note) |
//! | Browser | X | Editor(new) |
//! | Browser | R1 | Canvas |
//! | Browser | Menu | Settings |
//! | Editor, Canvas, Settings | B or Menu | Browser |
//! | any but Decoy | panic combo | Decoy(mode) |

pub mod browser;
pub mod canvas;
pub mod decoy;
pub mod editor;
pub mod settings;

pub use browser::BrowserScreen;
pub use canvas::CanvasScreen;
pub use decoy::DecoyScreen;
pub use editor::EditorScreen;
pub use settings::SettingsScreen;

use crate::app::context::AppContext;
use crate::app::modes::DecoyMode;
use crate::input::InputEvent;
use crate::ui::{Color, Palette, Rect, Surface};

/// A note as addressed by the editor. An empty name is a new document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteRef {
    pub name: String,
    pub hidden: bool,
}

impl NoteRef {
    #[must_use]
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
        }
    }

    /// Reference to a document that has not been saved yet.
    #[must_use]
    pub fn new_document() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.name.is_empty()
    }
}

/// Which screen is (or should become) active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenId {
    Browser,
    Editor(NoteRef),
    Canvas,
    Settings,
    Decoy(DecoyMode),
}

/// Operations every screen supports.
pub trait Lifecycle {
    fn enter(&mut self, _ctx: &mut AppContext) {}

    fn exit(&mut self, _ctx: &mut AppContext) {}

    fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent);

    /// Advances animations by `ctx.elapsed()`. A zero elapsed time changes
    /// nothing.
    fn update(&mut self, _ctx: &mut AppContext) {}

    fn render(&self, ctx: &AppContext, surface: &mut dyn Surface);
}

#[allow(clippy::large_enum_variant)]
pub enum Screen {
    Browser(BrowserScreen),
    Editor(EditorScreen),
    Canvas(CanvasScreen),
    Settings(SettingsScreen),
    Decoy(DecoyScreen),
}

macro_rules! dispatch {
    ($screen:expr, $inner:ident => $call:expr) => {
        match $screen {
            Screen::Browser($inner) => $call,
            Screen::Editor($inner) => $call,
            Screen::Canvas($inner) => $call,
            Screen::Settings($inner) => $call,
            Screen::Decoy($inner) => $call,
        }
    };
}

impl Screen {
    /// Constructs the screen for `id`. Nothing is loaded until `enter`.
    #[must_use]
    pub fn open(id: &ScreenId) -> Self {
        match id {
            ScreenId::Browser => Self::Browser(BrowserScreen::new()),
            ScreenId::Editor(note) => Self::Editor(EditorScreen::new(note.clone())),
            ScreenId::Canvas => Self::Canvas(CanvasScreen::new()),
            ScreenId::Settings => Self::Settings(SettingsScreen::new()),
            ScreenId::Decoy(mode) => Self::Decoy(DecoyScreen::new(*mode)),
        }
    }

    #[must_use]
    pub fn id(&self) -> ScreenId {
        match self {
            Self::Browser(_) => ScreenId::Browser,
            Self::Editor(editor) => ScreenId::Editor(editor.note().clone()),
            Self::Canvas(_) => ScreenId::Canvas,
            Self::Settings(_) => ScreenId::Settings,
            Self::Decoy(decoy) => ScreenId::Decoy(decoy.mode()),
        }
    }

    pub fn enter(&mut self, ctx: &mut AppContext) {
        dispatch!(self, s => s.enter(ctx));
    }

    pub fn exit(&mut self, ctx: &mut AppContext) {
        dispatch!(self, s => s.exit(ctx));
    }

    pub fn handle_input(&mut self, ctx: &mut AppContext, event: InputEvent) {
        dispatch!(self, s => s.handle_input(ctx, event));
    }

    pub fn update(&mut self, ctx: &mut AppContext) {
        dispatch!(self, s => s.update(ctx));
    }

    pub fn render(&self, ctx: &AppContext, surface: &mut dyn Surface) {
        dispatch!(self, s => s.render(ctx, surface));
    }
}

/// Title on `row` with a rule underneath.
fn draw_title(surface: &mut dyn Surface, palette: &Palette, row: i32, title: &str, right: &str) {
    let width = surface.bounds().w;
    surface.draw_text(2, row, title, palette.title);
    let right_len = i32::try_from(right.chars().count()).unwrap_or(0);
    surface.draw_text(width - right_len - 2, row, right, palette.text_dim);
    surface.draw_line((0, row + 1), (width - 1, row + 1), palette.border);
}

/// Key hints on the last row.
fn draw_footer(surface: &mut dyn Surface, palette: &Palette, hint: &str) {
    let bounds = surface.bounds();
    surface.fill_rect(Rect::new(0, bounds.bottom() - 1, bounds.w, 1), palette.track);
    surface.draw_text(1, bounds.bottom() - 1, hint, palette.text_dim);
}

/// Scales a color toward black, for faded rows.
fn fade(color: Color, opacity: f32) -> Color {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scale = |c: u8| (f32::from(c) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::rgb(scale(color.r), scale(color.g), scale(color.b))
}
