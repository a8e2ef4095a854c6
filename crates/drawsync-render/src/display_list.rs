//! Recording surface: captures draw calls instead of rasterizing them.
//!
//! Useful for headless rendering and for asserting on what a frame contains.

use crate::renderer::{OverlayStyle, RenderResult, RenderSurface};
use drawsync_core::shapes::{Ellipse, Pencil, Rectangle, Shape, ShapeId};
use kurbo::{Rect, Size};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { size: Size, background: String },
    /// A shape, with theme colors already resolved.
    Shape(Shape),
    Overlay { rect: Rect, style: OverlayStyle },
}

/// Ordered list of draw calls of a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the shapes drawn, in draw order.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Shape(shape) => Some(shape.id()),
                _ => None,
            })
            .collect()
    }

    /// Selection chrome drawn, in draw order.
    pub fn overlays(&self) -> Vec<(Rect, OverlayStyle)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Overlay { rect, style } => Some((*rect, style.clone())),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for DisplayList {
    fn clear(&mut self, size: Size, background: &str) -> RenderResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            size,
            background: background.to_string(),
        });
        Ok(())
    }

    fn draw_rectangle(&mut self, rect: &Rectangle) -> RenderResult<()> {
        self.commands.push(DrawCommand::Shape(Shape::Rectangle(rect.clone())));
        Ok(())
    }

    fn draw_ellipse(&mut self, ellipse: &Ellipse) -> RenderResult<()> {
        self.commands.push(DrawCommand::Shape(Shape::Ellipse(ellipse.clone())));
        Ok(())
    }

    fn draw_pencil(&mut self, pencil: &Pencil) -> RenderResult<()> {
        self.commands.push(DrawCommand::Shape(Shape::Pencil(pencil.clone())));
        Ok(())
    }

    fn draw_overlay_rect(&mut self, rect: Rect, style: &OverlayStyle) -> RenderResult<()> {
        self.commands.push(DrawCommand::Overlay {
            rect,
            style: style.clone(),
        });
        Ok(())
    }
}
