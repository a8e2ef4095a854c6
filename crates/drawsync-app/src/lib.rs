//! DrawSync Application
//!
//! Board shell: routes pointer and keyboard input into the scene store and
//! redraws the canvas after every change.

mod app;
mod event_handler;
mod shortcuts;

pub use app::{Board, BoardError};
pub use event_handler::EventHandler;
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebBoard, run_wasm};
