//! DrawSync Core Library
//!
//! Platform-agnostic shape model and interaction engine for the DrawSync board:
//! geometry, tool state machines, selection, dragging and the scene store.

pub mod config;
pub mod drag;
pub mod geometry;
pub mod input;
pub mod presets;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod tools;

pub use config::{BoardConfig, ConfigError};
pub use drag::DragState;
pub use input::InputState;
pub use selection::{CursorStyle, SelectionEngine, SelectionRect};
pub use shapes::{Paint, Shape, ShapeId, ShapePatch, ShapeStyle, StyleError, StylePatch};
pub use store::SceneStore;
pub use tools::{DrawOutcome, ToolKind, ToolManager};
