//! Ellipse shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{distance_to_ellipse_border, is_point_in_ellipse};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use uuid::Uuid;

/// An axis-aligned ellipse drawn by dragging out its bounding diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Corner where the drawing gesture started.
    pub anchor: Point,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "full_turn")]
    pub end_angle: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

fn full_turn() -> f64 {
    TAU
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor: Point::new(center.x - radius_x, center.y - radius_y),
            center,
            radius_x,
            radius_y,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: TAU,
            style,
        }
    }

    /// Ellipse inscribed in the box spanned by `anchor` and `current`.
    pub fn from_drag(anchor: Point, current: Point, style: ShapeStyle) -> Self {
        let mut ellipse = Self::new(anchor, 0.0, 0.0, style);
        ellipse.anchor = anchor;
        ellipse.stretch_to(current);
        ellipse
    }

    /// Recompute center and radii from the anchor to `current`.
    pub fn stretch_to(&mut self, current: Point) {
        self.center = self.anchor.midpoint(current);
        self.radius_x = (current.x - self.anchor.x).abs() / 2.0;
        self.radius_y = (current.y - self.anchor.y).abs() / 2.0;
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, min_threshold: f64) -> bool {
        if self.style.has_fill() && is_point_in_ellipse(point, self.center, self.radius_x, self.radius_y) {
            return true;
        }
        distance_to_ellipse_border(point, self.center, self.radius_x, self.radius_y)
            <= self.style.hit_threshold(min_threshold)
    }

    fn is_drawn(&self, threshold: f64) -> bool {
        self.radius_x.max(self.radius_y) > threshold
    }

    fn translate(&mut self, offset: Vec2) {
        self.anchor += offset;
        self.center += offset;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{DRAWN_THRESHOLD, HIT_THRESHOLD, Paint};

    #[test]
    fn test_from_drag() {
        let e = Ellipse::from_drag(Point::new(0.0, 0.0), Point::new(100.0, 50.0), ShapeStyle::default());
        assert!((e.center.x - 50.0).abs() < f64::EPSILON);
        assert!((e.center.y - 25.0).abs() < f64::EPSILON);
        assert!((e.radius_x - 50.0).abs() < f64::EPSILON);
        assert!((e.radius_y - 25.0).abs() < f64::EPSILON);
        assert!((e.end_angle - TAU).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_drag_reversed() {
        let e = Ellipse::from_drag(Point::new(100.0, 50.0), Point::new(0.0, 0.0), ShapeStyle::default());
        assert!((e.center.x - 50.0).abs() < f64::EPSILON);
        assert!((e.radius_y - 25.0).abs() < f64::EPSILON);
        assert!((e.anchor.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drawn_threshold() {
        let small = Ellipse::from_drag(Point::ZERO, Point::new(10.0, 8.0), ShapeStyle::default());
        assert!(!small.is_drawn(DRAWN_THRESHOLD));
        let big = Ellipse::from_drag(Point::ZERO, Point::new(12.0, 2.0), ShapeStyle::default());
        assert!(big.is_drawn(DRAWN_THRESHOLD));
    }

    #[test]
    fn test_hit_test() {
        let mut e = Ellipse::new(Point::new(50.0, 50.0), 40.0, 20.0, ShapeStyle::default());
        assert!(e.hit_test(Point::new(92.0, 50.0), HIT_THRESHOLD));
        assert!(!e.hit_test(Point::new(50.0, 50.0), HIT_THRESHOLD));
        e.style.fill_color = Paint::new("#16a34a");
        assert!(e.hit_test(Point::new(50.0, 50.0), HIT_THRESHOLD));
        assert!(!e.hit_test(Point::new(150.0, 50.0), HIT_THRESHOLD));
    }

    #[test]
    fn test_translate_moves_anchor_and_center() {
        let mut e = Ellipse::from_drag(Point::new(0.0, 0.0), Point::new(100.0, 50.0), ShapeStyle::default());
        e.translate(Vec2::new(10.0, -5.0));
        assert!((e.anchor.x - 10.0).abs() < f64::EPSILON);
        assert!((e.anchor.y + 5.0).abs() < f64::EPSILON);
        assert!((e.center.x - 60.0).abs() < f64::EPSILON);
        assert!((e.center.y - 20.0).abs() < f64::EPSILON);
        assert!((e.radius_x - 50.0).abs() < f64::EPSILON);
    }
}
