//! Application layer: shared context, global gestures and the frame loop.
//!
//! # Architecture
//!
//! ```text
//! InputSource → GlobalInputInterceptor → active Screen → AppContext::request
//!                       │                                        │
//!                       └──────────── ApplicationController ◄────┘
//!                                       (exit → open → enter)
//! ```
//!
//! # Modules
//!
//! - [`context`]: [`AppContext`], the state every screen sees
//! - [`controller`]: [`ApplicationController`], frame pipeline and transitions
//! - [`interceptor`]: vault sequence and panic combo
//! - [`modes`]: user-selectable modes stored in the settings record
//!
//! # Example
//!
//! ```
//! use pocket_notes::app::{AppContext, ApplicationController};
//! use pocket_notes::input::{Button, QueuedInput};
//! use pocket_notes::screens::ScreenId;
//! use pocket_notes::storage::{MemoryNoteStore, MemorySettingsStore};
//! use pocket_notes::ui::{RecordingSurface, Theme};
//! use std::time::Duration;
//!
//! let ctx = AppContext::new(
//!     Box::new(MemoryNoteStore::new()),
//!     Box::new(MemorySettingsStore::new()),
//!     &Theme::default(),
//! );
//! let mut controller = ApplicationController::new(ctx);
//! let mut input = QueuedInput::new();
//! let mut surface = RecordingSurface::new(80, 24);
//!
//! input.tap(Button::R1);
//! controller.run_frame(&mut input, &mut surface, Duration::from_millis(16));
//! assert_eq!(controller.active(), ScreenId::Canvas);
//! ```

pub mod context;
pub mod controller;
pub mod interceptor;
pub mod modes;

pub use context::AppContext;
pub use controller::ApplicationController;
pub use interceptor::{GlobalInputInterceptor, GlobalInputState, PANIC_COMBO, VAULT_SEQUENCE};
pub use modes::{DecoyMode, KeyboardLayout, NoteTemplate};
