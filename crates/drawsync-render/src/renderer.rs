//! Rendering surface abstraction, theme and per-frame context.

use drawsync_core::config::SELECTION_PADDING;
use drawsync_core::shapes::{DRAWN_THRESHOLD, Ellipse, Paint, Pencil, Rectangle, Shape};
use drawsync_core::store::SceneStore;
use kurbo::{Rect, Size};
use peniko::Color;
use std::borrow::Cow;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Drawing context unavailable")]
    ContextUnavailable,
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Format a color the way canvas style setters expect it.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        let alpha = (f64::from(rgba.a) / 255.0 * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {alpha})", rgba.r, rgba.g, rgba.b)
    }
}

/// Light or dark color scheme of the page hosting the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::from_rgba8(255, 255, 255, 255),
            Theme::Dark => Color::from_rgba8(10, 10, 10, 255),
        }
    }

    /// Named color used for theme-following strokes and fills.
    pub fn ink(self) -> &'static str {
        match self {
            Theme::Light => "black",
            Theme::Dark => "white",
        }
    }

    /// Map literal black/white to this theme's ink; other paints pass through.
    pub fn resolve<'a>(self, paint: &'a Paint) -> Cow<'a, Paint> {
        if paint.is_theme_ink() && paint.as_str() != self.ink() {
            Cow::Owned(Paint::new(self.ink()))
        } else {
            Cow::Borrowed(paint)
        }
    }

    /// A copy of `shape` with theme-following colors resolved. The input is
    /// left as stored.
    pub fn resolve_shape<'a>(self, shape: &'a Shape) -> Cow<'a, Shape> {
        let style = shape.style();
        let stroke = self.resolve(&style.stroke_color);
        let fill = self.resolve(&style.fill_color);
        if matches!((&stroke, &fill), (Cow::Borrowed(_), Cow::Borrowed(_))) {
            return Cow::Borrowed(shape);
        }
        let (stroke, fill) = (stroke.into_owned(), fill.into_owned());
        let mut resolved = shape.clone();
        let style = resolved.style_mut();
        style.stroke_color = stroke;
        style.fill_color = fill;
        Cow::Owned(resolved)
    }
}

/// Stroke (and optional fill) of selection chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub stroke: String,
    pub fill: Option<String>,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub alpha: f64,
}

impl OverlayStyle {
    /// Dashed box around each selected shape.
    pub fn selection_box(color: Color) -> Self {
        Self {
            stroke: css_color(color),
            fill: None,
            line_width: 2.0,
            line_dash: vec![5.0, 5.0],
            alpha: 0.8,
        }
    }

    /// Translucent drag-selection rectangle.
    pub fn marquee(color: Color) -> Self {
        Self {
            stroke: css_color(color),
            fill: Some(css_color(color.with_alpha(0.1))),
            line_width: 1.0,
            line_dash: vec![3.0, 3.0],
            alpha: 1.0,
        }
    }
}

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// Board state to draw; borrowed for the whole pass.
    pub store: &'a SceneStore,
    /// Canvas size in CSS pixels.
    pub viewport_size: Size,
    pub theme: Theme,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Gap between a selected shape and its box.
    pub selection_padding: f64,
    /// Shape being drawn by the active tool, drawn on top.
    pub live_shape: Option<&'a Shape>,
    /// Size a live shape must exceed before it shows.
    pub drawn_threshold: f64,
}

impl<'a> RenderContext<'a> {
    pub fn new(store: &'a SceneStore, viewport_size: Size) -> Self {
        Self {
            store,
            viewport_size,
            theme: Theme::default(),
            selection_color: Color::from_rgba8(0, 122, 204, 255),
            selection_padding: SELECTION_PADDING,
            live_shape: None,
            drawn_threshold: DRAWN_THRESHOLD,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_selection_padding(mut self, padding: f64) -> Self {
        self.selection_padding = padding;
        self
    }

    pub fn with_live_shape(mut self, shape: Option<&'a Shape>) -> Self {
        self.live_shape = shape;
        self
    }

    pub fn with_drawn_threshold(mut self, threshold: f64) -> Self {
        self.drawn_threshold = threshold;
        self
    }
}

/// A drawing target. Implementations translate these primitives into
/// backend calls; all styling decisions are made by the pipeline.
pub trait RenderSurface {
    /// Reset the whole surface to `background`.
    fn clear(&mut self, size: Size, background: &str) -> RenderResult<()>;

    fn draw_rectangle(&mut self, rect: &Rectangle) -> RenderResult<()>;

    fn draw_ellipse(&mut self, ellipse: &Ellipse) -> RenderResult<()>;

    fn draw_pencil(&mut self, pencil: &Pencil) -> RenderResult<()>;

    /// Dashed outline (and optional fill) used for selection chrome.
    fn draw_overlay_rect(&mut self, rect: Rect, style: &OverlayStyle) -> RenderResult<()>;

    fn draw_shape(&mut self, shape: &Shape) -> RenderResult<()> {
        match shape {
            Shape::Rectangle(r) => self.draw_rectangle(r),
            Shape::Ellipse(e) => self.draw_ellipse(e),
            Shape::Pencil(p) => self.draw_pencil(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawsync_core::shapes::ShapeStyle;
    use kurbo::Point;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(Color::from_rgba8(0, 122, 204, 255)), "#007acc");
        assert_eq!(css_color(Color::from_rgba8(0, 122, 204, 255).with_alpha(0.1)), "rgba(0, 122, 204, 0.1)");
    }

    #[test]
    fn test_theme_ink() {
        assert_eq!(Theme::Dark.resolve(&Paint::black()).as_str(), "white");
        assert_eq!(Theme::Light.resolve(&Paint::white()).as_str(), "black");
        assert_eq!(Theme::Dark.resolve(&Paint::new("#ef4444")).as_str(), "#ef4444");
        assert!(matches!(Theme::Light.resolve(&Paint::black()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_resolve_shape_leaves_original() {
        let mut style = ShapeStyle::default();
        style.fill_color = Paint::white();
        let shape = Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0, style));
        let resolved = Theme::Dark.resolve_shape(&shape);
        assert_eq!(resolved.style().stroke_color.as_str(), "white");
        assert_eq!(resolved.style().fill_color.as_str(), "white");
        assert_eq!(shape.style().stroke_color.as_str(), "black");
        assert_eq!(resolved.id(), shape.id());
    }

    #[test]
    fn test_overlay_styles() {
        let color = Color::from_rgba8(0, 122, 204, 255);
        let sel = OverlayStyle::selection_box(color);
        assert_eq!(sel.line_dash, vec![5.0, 5.0]);
        assert!(sel.fill.is_none());
        let marquee = OverlayStyle::marquee(color);
        assert_eq!(marquee.fill.as_deref(), Some("rgba(0, 122, 204, 0.1)"));
        assert_eq!(marquee.line_dash, vec![3.0, 3.0]);
    }
}
