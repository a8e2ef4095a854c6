//! Shape definitions for the board.

mod ellipse;
mod pencil;
mod rectangle;

pub use ellipse::Ellipse;
pub use pencil::Pencil;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Minimum extent (in canvas pixels) a shape must exceed to count as drawn.
pub const DRAWN_THRESHOLD: f64 = 5.0;

/// Minimum border hit distance, regardless of how thin the stroke is.
pub const HIT_THRESHOLD: f64 = 5.0;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A style value outside its allowed range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("line_width must be positive, got {0}")]
    LineWidth(f64),
    #[error("opacity must be within 0..=1, got {0}")]
    Opacity(f64),
    #[error("border_radius must be non-negative, got {0}")]
    BorderRadius(f64),
    #[error("line_dash must hold non-negative lengths")]
    LineDash,
}

/// A CSS color string as handed to the canvas (`"black"`, `"#3b82f6"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paint(String);

impl Paint {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn black() -> Self {
        Self::new("black")
    }

    pub fn white() -> Self {
        Self::new("white")
    }

    pub fn transparent() -> Self {
        Self::new("transparent")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this paint leaves the interior unpainted.
    pub fn is_transparent(&self) -> bool {
        let compact: String = self.0.chars().filter(|c| !c.is_whitespace()).collect();
        compact.eq_ignore_ascii_case("transparent") || compact.eq_ignore_ascii_case("rgba(0,0,0,0)")
    }

    /// Literal `"black"` or `"white"`, the two colors that follow the theme ink.
    pub fn is_theme_ink(&self) -> bool {
        self.0 == "black" || self.0 == "white"
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::black()
    }
}

impl From<&str> for Paint {
    fn from(css: &str) -> Self {
        Self::new(css)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Paint,
    /// Stroke width, always positive.
    pub line_width: f64,
    /// Fill color; `"transparent"` means no fill.
    pub fill_color: Paint,
    /// Dash pattern; empty is a solid line.
    pub line_dash: Vec<f64>,
    /// Corner radius, only used by rectangles.
    pub border_radius: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Paint::black(),
            line_width: 1.0,
            fill_color: Paint::transparent(),
            line_dash: Vec::new(),
            border_radius: 8.0,
            opacity: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Whether the interior is painted and therefore hit-testable.
    pub fn has_fill(&self) -> bool {
        !self.fill_color.is_transparent()
    }

    /// Border hit distance: half the stroke, but never below `min_threshold`.
    pub fn hit_threshold(&self, min_threshold: f64) -> f64 {
        (self.line_width / 2.0).max(min_threshold)
    }

    /// Check the numeric fields against their ranges.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(StyleError::LineWidth(self.line_width));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(StyleError::Opacity(self.opacity));
        }
        if !(self.border_radius.is_finite() && self.border_radius >= 0.0) {
            return Err(StyleError::BorderRadius(self.border_radius));
        }
        if self.line_dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(StyleError::LineDash);
        }
        Ok(())
    }

    /// This style with `patch` merged in, if the result is valid.
    pub fn patched(&self, patch: &StylePatch) -> Result<ShapeStyle, StyleError> {
        let mut style = self.clone();
        style.apply(patch);
        style.validate()?;
        Ok(style)
    }

    /// Merge a partial style update into this style, unchecked.
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(color) = &patch.stroke_color {
            self.stroke_color = color.clone();
        }
        if let Some(width) = patch.line_width {
            self.line_width = width;
        }
        if let Some(color) = &patch.fill_color {
            self.fill_color = color.clone();
        }
        if let Some(dash) = &patch.line_dash {
            self.line_dash = dash.clone();
        }
        if let Some(radius) = patch.border_radius {
            self.border_radius = radius;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
    }
}

/// A partial style update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Variant-specific geometry, detached from id and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Rectangle {
        position: Point,
        width: f64,
        height: f64,
    },
    Ellipse {
        anchor: Point,
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Pencil {
        points: Vec<Point>,
    },
}

/// A merge-update for one shape: any geometry and style fields present
/// replace the stored ones, everything else is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePatch {
    pub geometry: Option<ShapeGeometry>,
    pub style: Option<StylePatch>,
}

impl ShapePatch {
    pub fn geometry(geometry: ShapeGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            style: None,
        }
    }

    pub fn style(style: StylePatch) -> Self {
        Self {
            geometry: None,
            style: Some(style),
        }
    }
}

/// Common behavior of every shape variant.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Axis-aligned bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Whether `point` hits the painted interior or lies near the border.
    fn hit_test(&self, point: Point, min_threshold: f64) -> bool;

    /// Whether the shape is large enough to keep once the gesture ends.
    fn is_drawn(&self, threshold: f64) -> bool;

    /// Move the whole shape by `offset`.
    fn translate(&mut self, offset: Vec2);

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// The closed set of shapes the board can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Pencil(Pencil),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Pencil(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Pencil(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, min_threshold: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, min_threshold),
            Shape::Ellipse(s) => s.hit_test(point, min_threshold),
            Shape::Pencil(s) => s.hit_test(point, min_threshold),
        }
    }

    pub fn is_drawn(&self, threshold: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.is_drawn(threshold),
            Shape::Ellipse(s) => s.is_drawn(threshold),
            Shape::Pencil(s) => s.is_drawn(threshold),
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Shape::Rectangle(s) => s.translate(offset),
            Shape::Ellipse(s) => s.translate(offset),
            Shape::Pencil(s) => s.translate(offset),
        }
    }

    /// A translated copy; the original is left untouched.
    pub fn translated(&self, offset: Vec2) -> Shape {
        let mut moved = self.clone();
        moved.translate(offset);
        moved
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Pencil(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Pencil(s) => s.style_mut(),
        }
    }

    /// Short lowercase name of the variant, as used in serialized scenes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Pencil(_) => "pencil",
        }
    }

    /// Current geometry, detached from id and style.
    pub fn geometry(&self) -> ShapeGeometry {
        match self {
            Shape::Rectangle(r) => ShapeGeometry::Rectangle {
                position: r.position,
                width: r.width,
                height: r.height,
            },
            Shape::Ellipse(e) => ShapeGeometry::Ellipse {
                anchor: e.anchor,
                center: e.center,
                radius_x: e.radius_x,
                radius_y: e.radius_y,
            },
            Shape::Pencil(p) => ShapeGeometry::Pencil {
                points: p.points.clone(),
            },
        }
    }

    /// Replace the geometry, keeping id and style.
    ///
    /// Returns `false` and leaves the shape untouched when the geometry
    /// belongs to a different variant.
    pub fn set_geometry(&mut self, geometry: ShapeGeometry) -> bool {
        match (self, geometry) {
            (Shape::Rectangle(r), ShapeGeometry::Rectangle { position, width, height }) => {
                r.position = position;
                r.width = width;
                r.height = height;
            }
            (
                Shape::Ellipse(e),
                ShapeGeometry::Ellipse {
                    anchor,
                    center,
                    radius_x,
                    radius_y,
                },
            ) => {
                e.anchor = anchor;
                e.center = center;
                e.radius_x = radius_x;
                e.radius_y = radius_y;
            }
            (Shape::Pencil(p), ShapeGeometry::Pencil { points }) => {
                p.points = points;
            }
            _ => return false,
        }
        true
    }

    /// Merge a partial update into this shape.
    ///
    /// Returns `false` if the geometry did not match the variant; the style
    /// part is still applied in that case.
    pub fn apply(&mut self, patch: &ShapePatch) -> bool {
        if let Some(style) = &patch.style {
            self.style_mut().apply(style);
        }
        match &patch.geometry {
            Some(geometry) => self.set_geometry(geometry.clone()),
            None => true,
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Ellipse(s) => s.id = new_id,
            Shape::Pencil(s) => s.id = new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = ShapeStyle::default();
        assert_eq!(style.stroke_color.as_str(), "black");
        assert!((style.line_width - 1.0).abs() < f64::EPSILON);
        assert!(!style.has_fill());
        assert!(style.line_dash.is_empty());
        assert!((style.border_radius - 8.0).abs() < f64::EPSILON);
        assert!((style.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transparent_paints() {
        assert!(Paint::transparent().is_transparent());
        assert!(Paint::new("rgba(0, 0, 0, 0)").is_transparent());
        assert!(!Paint::new("#1f2937").is_transparent());
        assert!(Paint::black().is_theme_ink());
        assert!(!Paint::new("#000000").is_theme_ink());
    }

    #[test]
    fn test_style_ranges() {
        assert!(ShapeStyle::default().validate().is_ok());
        let base = ShapeStyle::default();
        let bad_width = StylePatch {
            line_width: Some(-3.0),
            ..Default::default()
        };
        assert_eq!(base.patched(&bad_width), Err(StyleError::LineWidth(-3.0)));
        let bad_opacity = StylePatch {
            opacity: Some(7.0),
            ..Default::default()
        };
        assert_eq!(base.patched(&bad_opacity), Err(StyleError::Opacity(7.0)));
        let bad_radius = StylePatch {
            border_radius: Some(-10.0),
            ..Default::default()
        };
        assert_eq!(base.patched(&bad_radius), Err(StyleError::BorderRadius(-10.0)));
        let bad_dash = StylePatch {
            line_dash: Some(vec![4.0, f64::NAN]),
            ..Default::default()
        };
        assert_eq!(base.patched(&bad_dash), Err(StyleError::LineDash));

        let ok = StylePatch {
            opacity: Some(0.0),
            border_radius: Some(0.0),
            ..Default::default()
        };
        let style = base.patched(&ok).unwrap();
        assert!(style.opacity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_threshold_floor() {
        let mut style = ShapeStyle::default();
        assert!((style.hit_threshold(HIT_THRESHOLD) - 5.0).abs() < f64::EPSILON);
        style.line_width = 16.0;
        assert!((style.hit_threshold(HIT_THRESHOLD) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_patch_merges() {
        let mut style = ShapeStyle::default();
        style.apply(&StylePatch {
            stroke_color: Some(Paint::new("#ef4444")),
            line_dash: Some(vec![8.0, 8.0]),
            ..Default::default()
        });
        assert_eq!(style.stroke_color.as_str(), "#ef4444");
        assert_eq!(style.line_dash, vec![8.0, 8.0]);
        assert!((style.line_width - 1.0).abs() < f64::EPSILON);
        assert!(style.fill_color.is_transparent());
    }

    #[test]
    fn test_geometry_patch_keeps_style_and_id() {
        let mut style = ShapeStyle::default();
        style.stroke_color = Paint::new("#22c55e");
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0, style));
        let id = shape.id();
        let ok = shape.apply(&ShapePatch::geometry(ShapeGeometry::Rectangle {
            position: Point::new(5.0, 6.0),
            width: 10.0,
            height: 10.0,
        }));
        assert!(ok);
        assert_eq!(shape.id(), id);
        assert_eq!(shape.style().stroke_color.as_str(), "#22c55e");
        assert!((shape.bounds().x0 - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mismatched_geometry_is_rejected() {
        let mut shape = Shape::Pencil(Pencil::new(Point::new(1.0, 1.0), ShapeStyle::default()));
        let before = shape.clone();
        assert!(!shape.set_geometry(ShapeGeometry::Rectangle {
            position: Point::ZERO,
            width: 1.0,
            height: 1.0,
        }));
        assert_eq!(shape, before);
    }

    #[test]
    fn test_serialized_shape_is_tagged() {
        let shape = Shape::Ellipse(Ellipse::from_drag(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            ShapeStyle::default(),
        ));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "ellipse");
        assert_eq!(json["style"]["fill_color"], "transparent");
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }
}
