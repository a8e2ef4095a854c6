use super::{DrawOutcome, ToolState};
use crate::shapes::{Ellipse, Shape, ShapeStyle, ShapeTrait};
use kurbo::Point;

/// Ellipse inscribed in the dragged-out box.
#[derive(Debug, Clone)]
pub struct EllipseTool {
    state: ToolState,
    style: ShapeStyle,
    live: Option<Ellipse>,
}

impl EllipseTool {
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
        self.live = Some(Ellipse::from_drag(point, point, self.style.clone()));
        self.state = ToolState::Drawing { anchor: point };
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !matches!(self.state, ToolState::Drawing { .. }) {
            return false;
        }
        match self.live.as_mut() {
            Some(ellipse) => {
                ellipse.stretch_to(point);
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
        let ellipse = self.live.take()?;
        Some(DrawOutcome {
            drawn: ellipse.is_drawn(drawn_threshold),
            shape: Shape::Ellipse(ellipse),
        })
    }

    pub fn preview_shape(&self) -> Option<Shape> {
        self.live.clone().map(Shape::Ellipse)
    }
}
