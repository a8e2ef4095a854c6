//! Freehand pencil stroke.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::point_to_polyline_dist;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke (series of points). A single point renders as a dot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pencil {
    pub(crate) id: ShapeId,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Pencil {
    /// Start a stroke at `start`.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self::from_points(vec![start], style)
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Pencil {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, min_threshold: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= self.style.hit_threshold(min_threshold)
    }

    /// Any stroke with at least one point is kept, however small.
    fn is_drawn(&self, _threshold: f64) -> bool {
        !self.points.is_empty()
    }

    fn translate(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
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
    use crate::shapes::{DRAWN_THRESHOLD, HIT_THRESHOLD};

    fn stroke() -> Pencil {
        Pencil::from_points(
            vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, 50.0)],
            ShapeStyle::default(),
        )
    }

    #[test]
    fn test_bounds() {
        let bounds = stroke().bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 50.0).abs() < f64::EPSILON);
        let empty = Pencil::from_points(Vec::new(), ShapeStyle::default());
        assert_eq!(empty.bounds(), Rect::ZERO);
    }

    #[test]
    fn test_single_point_is_drawn() {
        let dot = Pencil::new(Point::new(3.0, 3.0), ShapeStyle::default());
        assert!(dot.is_drawn(DRAWN_THRESHOLD));
        assert!(dot.hit_test(Point::new(6.0, 3.0), HIT_THRESHOLD));
    }

    #[test]
    fn test_hit_test_near_segment() {
        let p = stroke();
        assert!(p.hit_test(Point::new(25.0, 4.0), HIT_THRESHOLD));
        assert!(p.hit_test(Point::new(54.0, 25.0), HIT_THRESHOLD));
        assert!(!p.hit_test(Point::new(25.0, 25.0), HIT_THRESHOLD));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut p = stroke();
        p.translate(Vec2::new(5.0, 5.0));
        assert_eq!(p.points, vec![Point::new(5.0, 5.0), Point::new(55.0, 5.0), Point::new(55.0, 55.0)]);
    }
}
