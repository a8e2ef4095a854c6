//! Tool system for the board.
//!
//! Each drawable tool is a small state machine (`Idle → Drawing → Committed`)
//! that turns one pointer gesture into one candidate shape. A fresh machine
//! is built for every gesture by [`ToolManager::begin`].

mod ellipse;
mod pencil;
mod rectangle;

pub use ellipse::EllipseTool;
pub use pencil::PencilTool;
pub use rectangle::RectangleTool;

use crate::shapes::{DRAWN_THRESHOLD, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Cursor,
    Rectangle,
    Ellipse,
    Pencil,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Cursor,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Pencil,
        ToolKind::Eraser,
    ];

    /// Whether this tool turns gestures into new shapes.
    pub fn is_drawing(self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Pencil)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Cursor => "Cursor",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// State of a single drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for the pointer to go down.
    #[default]
    Idle,
    /// Pointer is down; geometry follows the pointer.
    Drawing {
        /// Where the gesture started.
        anchor: Point,
    },
    /// Gesture finished; the machine ignores further input.
    Committed,
}

/// Result of a finished gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    /// Whether the shape passed the size threshold and should be kept.
    pub drawn: bool,
    /// Final geometry merged with the style captured at gesture start.
    pub shape: Shape,
}

/// One in-flight gesture of a drawable tool.
#[derive(Debug, Clone)]
pub enum DrawingTool {
    Rectangle(RectangleTool),
    Ellipse(EllipseTool),
    Pencil(PencilTool),
}

impl DrawingTool {
    /// Fresh machine for `kind`, or `None` for tools that do not draw.
    pub fn for_kind(kind: ToolKind, style: ShapeStyle) -> Option<Self> {
        match kind {
            ToolKind::Rectangle => Some(DrawingTool::Rectangle(RectangleTool::new(style))),
            ToolKind::Ellipse => Some(DrawingTool::Ellipse(EllipseTool::new(style))),
            ToolKind::Pencil => Some(DrawingTool::Pencil(PencilTool::new(style))),
            ToolKind::Cursor | ToolKind::Eraser => None,
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            DrawingTool::Rectangle(_) => ToolKind::Rectangle,
            DrawingTool::Ellipse(_) => ToolKind::Ellipse,
            DrawingTool::Pencil(_) => ToolKind::Pencil,
        }
    }

    pub fn state(&self) -> ToolState {
        match self {
            DrawingTool::Rectangle(t) => t.state(),
            DrawingTool::Ellipse(t) => t.state(),
            DrawingTool::Pencil(t) => t.state(),
        }
    }

    pub fn pointer_down(&mut self, point: Point) {
        match self {
            DrawingTool::Rectangle(t) => t.pointer_down(point),
            DrawingTool::Ellipse(t) => t.pointer_down(point),
            DrawingTool::Pencil(t) => t.pointer_down(point),
        }
    }

    /// Returns whether the live shape changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self {
            DrawingTool::Rectangle(t) => t.pointer_move(point),
            DrawingTool::Ellipse(t) => t.pointer_move(point),
            DrawingTool::Pencil(t) => t.pointer_move(point),
        }
    }

    pub fn pointer_up(&mut self, drawn_threshold: f64) -> Option<DrawOutcome> {
        match self {
            DrawingTool::Rectangle(t) => t.pointer_up(drawn_threshold),
            DrawingTool::Ellipse(t) => t.pointer_up(drawn_threshold),
            DrawingTool::Pencil(t) => t.pointer_up(drawn_threshold),
        }
    }

    /// The shape as it currently stands, while drawing.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self {
            DrawingTool::Rectangle(t) => t.preview_shape(),
            DrawingTool::Ellipse(t) => t.preview_shape(),
            DrawingTool::Pencil(t) => t.preview_shape(),
        }
    }
}

/// Manages the current tool and the gesture in flight.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Size a shape must exceed to be kept.
    pub drawn_threshold: f64,
    active: Option<DrawingTool>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolKind::default())
    }
}

impl ToolManager {
    pub fn new(tool: ToolKind) -> Self {
        Self {
            current_tool: tool,
            drawn_threshold: DRAWN_THRESHOLD,
            active: None,
        }
    }

    /// Set the current tool, abandoning any gesture in flight.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.active.take().is_some() {
            log::debug!("Abandoned {} gesture on tool switch", self.current_tool.name());
        }
        self.current_tool = tool;
    }

    /// Begin a gesture with a fresh machine seeded from `style`.
    ///
    /// Returns `false` if the current tool does not draw or a gesture is
    /// already in flight.
    pub fn begin(&mut self, point: Point, style: &ShapeStyle) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(mut tool) = DrawingTool::for_kind(self.current_tool, style.clone()) else {
            return false;
        };
        tool.pointer_down(point);
        self.active = Some(tool);
        true
    }

    /// Feed a pointer move to the gesture in flight.
    pub fn update(&mut self, point: Point) -> bool {
        self.active.as_mut().is_some_and(|tool| tool.pointer_move(point))
    }

    /// Finish the gesture in flight; the machine is discarded afterwards.
    pub fn end(&mut self) -> Option<DrawOutcome> {
        let mut tool = self.active.take()?;
        tool.pointer_up(self.drawn_threshold)
    }

    /// Cancel the gesture in flight.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|tool| matches!(tool.state(), ToolState::Drawing { .. }))
    }

    /// Live shape of the gesture in flight.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.active.as_ref().and_then(DrawingTool::preview_shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Paint;

    #[test]
    fn test_default_tool() {
        let tm = ToolManager::default();
        assert_eq!(tm.current_tool, ToolKind::Cursor);
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_cursor_does_not_draw() {
        let mut tm = ToolManager::new(ToolKind::Cursor);
        assert!(!tm.begin(Point::ZERO, &ShapeStyle::default()));
        assert!(tm.end().is_none());
        let mut tm = ToolManager::new(ToolKind::Eraser);
        assert!(!tm.begin(Point::ZERO, &ShapeStyle::default()));
    }

    #[test]
    fn test_rectangle_gesture() {
        let mut tm = ToolManager::new(ToolKind::Rectangle);
        assert!(tm.begin(Point::new(100.0, 100.0), &ShapeStyle::default()));
        assert!(tm.is_drawing());
        assert!(tm.update(Point::new(40.0, 60.0)));
        let outcome = tm.end().unwrap();
        assert!(outcome.drawn);
        let bounds = outcome.shape.bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 60.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 60.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 40.0).abs() < f64::EPSILON);
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_style_snapshot_taken_at_begin() {
        let mut style = ShapeStyle::default();
        let mut tm = ToolManager::new(ToolKind::Ellipse);
        tm.begin(Point::ZERO, &style);
        style.stroke_color = Paint::new("#ef4444");
        tm.update(Point::new(50.0, 50.0));
        let outcome = tm.end().unwrap();
        assert_eq!(outcome.shape.style().stroke_color.as_str(), "black");
    }

    #[test]
    fn test_each_gesture_gets_fresh_id() {
        let mut tm = ToolManager::new(ToolKind::Rectangle);
        tm.begin(Point::ZERO, &ShapeStyle::default());
        tm.update(Point::new(20.0, 20.0));
        let first = tm.end().unwrap().shape.id();
        tm.begin(Point::ZERO, &ShapeStyle::default());
        tm.update(Point::new(20.0, 20.0));
        let second = tm.end().unwrap().shape.id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let mut tm = ToolManager::new(ToolKind::Pencil);
        assert!(!tm.update(Point::new(1.0, 1.0)));
        assert!(tm.preview_shape().is_none());
    }

    #[test]
    fn test_set_tool_abandons_gesture() {
        let mut tm = ToolManager::new(ToolKind::Rectangle);
        tm.begin(Point::ZERO, &ShapeStyle::default());
        tm.set_tool(ToolKind::Cursor);
        assert!(tm.end().is_none());
    }
}
