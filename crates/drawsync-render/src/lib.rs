//! DrawSync Render Library
//!
//! Full-scene render pipeline for the DrawSync board, written against a
//! small drawing-surface trait. The browser build draws with Canvas 2D.

pub mod display_list;
pub mod pipeline;
mod renderer;

#[cfg(target_arch = "wasm32")]
mod canvas2d;

pub use display_list::{DisplayList, DrawCommand};
pub use pipeline::{render_scene, visible_shapes};
pub use renderer::{OverlayStyle, RenderContext, RenderResult, RenderSurface, RendererError, Theme, css_color};

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
