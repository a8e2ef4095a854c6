//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{point_to_segment_dist, rect_contains_point, rect_edges};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style,
        }
    }

    /// Create a rectangle from two corner points, in any order.
    pub fn from_corners(p1: Point, p2: Point, style: ShapeStyle) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height, style)
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Corner radius clamped so opposite corners never overlap.
    pub fn corner_radius(&self) -> f64 {
        self.style
            .border_radius
            .min(self.width / 2.0)
            .min(self.height / 2.0)
            .max(0.0)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, min_threshold: f64) -> bool {
        let rect = self.as_rect();
        if self.style.has_fill() && rect_contains_point(rect, point) {
            return true;
        }
        let threshold = self.style.hit_threshold(min_threshold);
        rect_edges(rect)
            .iter()
            .any(|&(a, b)| point_to_segment_dist(point, a, b) <= threshold)
    }

    fn is_drawn(&self, threshold: f64) -> bool {
        self.width.max(self.height) > threshold
    }

    fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
