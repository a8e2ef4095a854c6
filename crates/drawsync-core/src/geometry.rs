//! Pure geometry used by hit-testing and selection.
//!
//! Callers must not pass NaN coordinates; results are unspecified for them.

use kurbo::{Point, Rect, Vec2};

/// Distance from a point to a line segment (a→b).
///
/// A zero-length segment degenerates to the Euclidean distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// A single point is treated as a zero-length segment; an empty slice is
/// infinitely far away.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Whether `point` lies inside (or on) the axis-aligned ellipse.
///
/// A zero radius never contains anything.
pub fn is_point_in_ellipse(point: Point, center: Point, radius_x: f64, radius_y: f64) -> bool {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return false;
    }
    let dx = (point.x - center.x) / radius_x;
    let dy = (point.y - center.y) / radius_y;
    dx * dx + dy * dy <= 1.0
}

/// Approximate distance from `point` to the border of an axis-aligned ellipse.
///
/// The border point is taken along the ray from the center through `point`
/// rather than the true nearest point, so the result overestimates on
/// elongated ellipses. With a zero radius the ellipse collapses into a
/// segment along the other axis.
pub fn distance_to_ellipse_border(point: Point, center: Point, radius_x: f64, radius_y: f64) -> f64 {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        let half = Vec2::new(radius_x.max(0.0), radius_y.max(0.0));
        return point_to_segment_dist(point, center - half, center + half);
    }
    let offset = point - center;
    let dist = offset.hypot();
    let angle = offset.y.atan2(offset.x);
    let (sin, cos) = angle.sin_cos();
    let border = radius_x * radius_y / ((radius_y * cos).powi(2) + (radius_x * sin).powi(2)).sqrt();
    (dist - border).abs()
}

/// Boundary-inclusive containment of `inner` within `outer`.
pub fn rect_contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Boundary-inclusive point-in-rectangle test.
pub fn rect_contains_point(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Rectangle spanned by two arbitrary corners.
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// The four edges of a rectangle, clockwise from the top.
pub fn rect_edges(rect: Rect) -> [(Point, Point); 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_projection() {
        let d = point_to_segment_dist(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoint() {
        let d = point_to_segment_dist(Point::new(13.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_segment() {
        let a = Point::new(1.0, 1.0);
        let d = point_to_segment_dist(Point::new(4.0, 5.0), a, a);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let d = point_to_polyline_dist(Point::new(12.0, 5.0), &pts);
        assert!((d - 2.0).abs() < 1e-12);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
        let single = point_to_polyline_dist(Point::new(3.0, 4.0), &[Point::ZERO]);
        assert!((single - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_in_ellipse() {
        let c = Point::new(50.0, 25.0);
        assert!(is_point_in_ellipse(Point::new(50.0, 25.0), c, 50.0, 25.0));
        assert!(is_point_in_ellipse(Point::new(100.0, 25.0), c, 50.0, 25.0));
        assert!(!is_point_in_ellipse(Point::new(95.0, 45.0), c, 50.0, 25.0));
        assert!(!is_point_in_ellipse(c, c, 0.0, 25.0));
    }

    #[test]
    fn test_ellipse_border_distance() {
        let c = Point::new(0.0, 0.0);
        let d = distance_to_ellipse_border(Point::new(53.0, 0.0), c, 50.0, 20.0);
        assert!((d - 3.0).abs() < 1e-9);
        let d = distance_to_ellipse_border(Point::new(0.0, 10.0), c, 50.0, 20.0);
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_ellipse_border_is_segment() {
        let c = Point::new(10.0, 10.0);
        let d = distance_to_ellipse_border(Point::new(15.0, 13.0), c, 20.0, 0.0);
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_contains(outer, Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(rect_contains(outer, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!rect_contains(outer, Rect::new(90.0, 90.0, 101.0, 100.0)));
    }

    #[test]
    fn test_normalized_rect() {
        let r = normalized_rect(Point::new(100.0, 100.0), Point::new(40.0, 60.0));
        assert!((r.x0 - 40.0).abs() < f64::EPSILON);
        assert!((r.y0 - 60.0).abs() < f64::EPSILON);
        assert!((r.width() - 60.0).abs() < f64::EPSILON);
        assert!((r.height() - 40.0).abs() < f64::EPSILON);
    }
}
