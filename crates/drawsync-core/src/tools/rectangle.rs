use super::{DrawOutcome, ToolState};
use crate::shapes::{Rectangle, Shape, ShapeStyle, ShapeTrait};
use kurbo::Point;

/// Drag-out rectangle, normalized so any drag direction yields a positive size.
#[derive(Debug, Clone)]
pub struct RectangleTool {
    state: ToolState,
    style: ShapeStyle,
    live: Option<Rectangle>,
}

impl RectangleTool {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            state: ToolState::Idle,
            style,
            live: None,
        }
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn pointer_down(&mut self, point: Point) {
        if self.state != ToolState::Idle {
            return;
        }
        self.live = Some(Rectangle::new(point, 0.0, 0.0, self.style.clone()));
        self.state = ToolState::Drawing { anchor: point };
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        let ToolState::Drawing { anchor } = self.state else {
            return false;
        };
        let Some(rect) = self.live.as_mut() else {
            return false;
        };
        rect.position = Point::new(anchor.x.min(point.x), anchor.y.min(point.y));
        rect.width = (point.x - anchor.x).abs();
        rect.height = (point.y - anchor.y).abs();
        true
    }

    pub fn pointer_up(&mut self, drawn_threshold: f64) -> Option<DrawOutcome> {
        if !matches!(self.state, ToolState::Drawing { .. }) {
            return None;
        }
        self.state = ToolState::Committed;
        let rect = self.live.take()?;
        Some(DrawOutcome {
            drawn: rect.is_drawn(drawn_threshold),
            shape: Shape::Rectangle(rect),
        })
    }

    pub fn preview_shape(&self) -> Option<Shape> {
        self.live.clone().map(Shape::Rectangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::DRAWN_THRESHOLD;

    #[test]
    fn test_state_transitions() {
        let mut tool = RectangleTool::new(ShapeStyle::default());
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(!tool.pointer_move(Point::new(5.0, 5.0)));
        tool.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(tool.state(), ToolState::Drawing { anchor: Point::new(10.0, 10.0) });
        tool.pointer_move(Point::new(30.0, 20.0));
        assert!(tool.pointer_up(DRAWN_THRESHOLD).is_some());
        assert_eq!(tool.state(), ToolState::Committed);
        assert!(tool.pointer_up(DRAWN_THRESHOLD).is_none());
        tool.pointer_down(Point::ZERO);
        assert_eq!(tool.state(), ToolState::Committed);
    }

    #[test]
    fn test_click_without_drag_is_not_drawn() {
        let mut tool = RectangleTool::new(ShapeStyle::default());
        tool.pointer_down(Point::new(10.0, 10.0));
        tool.pointer_move(Point::new(13.0, 14.0));
        let outcome = tool.pointer_up(DRAWN_THRESHOLD).unwrap();
        assert!(!outcome.drawn);
    }
}
