use super::{DrawOutcome, ToolState};
use crate::shapes::{Pencil, Shape, ShapeStyle, ShapeTrait};
use kurbo::Point;

/// Freehand stroke; every pointer move appends a point.
#[derive(Debug, Clone)]
pub struct PencilTool {
    state: ToolState,
    style: ShapeStyle,
    live: Option<Pencil>,
}

impl PencilTool {
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
        self.live = Some(Pencil::new(point, self.style.clone()));
        self.state = ToolState::Drawing { anchor: point };
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !matches!(self.state, ToolState::Drawing { .. }) {
            return false;
        }
        match self.live.as_mut() {
            Some(pencil) => {
                pencil.add_point(point);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self, drawn_threshold: f64) -> Option<DrawOutcome> {
        if !matches!(self.state, ToolState::Drawing { .. }) {
            return None;
        }
        self.state = ToolState::Committed;
        let pencil = self.live.take()?;
        Some(DrawOutcome {
            drawn: pencil.is_drawn(drawn_threshold),
            shape: Shape::Pencil(pencil),
        })
    }

    pub fn preview_shape(&self) -> Option<Shape> {
        self.live.clone().map(Shape::Pencil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::DRAWN_THRESHOLD;

    #[test]
    fn test_points_accumulate() {
        let mut tool = PencilTool::new(ShapeStyle::default());
        tool.pointer_down(Point::new(1.0, 1.0));
        tool.pointer_move(Point::new(2.0, 2.0));
        tool.pointer_move(Point::new(3.0, 2.0));
        let outcome = tool.pointer_up(DRAWN_THRESHOLD).unwrap();
        let Shape::Pencil(pencil) = outcome.shape else {
            panic!("expected a pencil stroke");
        };
        assert_eq!(pencil.len(), 3);
    }

    #[test]
    fn test_tap_is_drawn_as_dot() {
        let mut tool = PencilTool::new(ShapeStyle::default());
        tool.pointer_down(Point::new(1.0, 1.0));
        let outcome = tool.pointer_up(DRAWN_THRESHOLD).unwrap();
        assert!(outcome.drawn);
    }
}
