//! Browser `CanvasRenderingContext2d` surface.
//!
//! All fallible Canvas 2D calls are mapped into [`RendererError::Surface`].

use crate::renderer::{OverlayStyle, RenderResult, RenderSurface, RendererError};
use drawsync_core::shapes::{Ellipse, Pencil, Rectangle, ShapeStyle};
use kurbo::{Rect, Size};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_err(err: JsValue) -> RendererError {
    RendererError::Surface(format!("{err:?}"))
}

fn dash_array(dash: &[f64]) -> js_sys::Array {
    let array = js_sys::Array::new();
    for &len in dash {
        array.push(&len.into());
    }
    array
}

/// Draws onto a 2D canvas context.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Acquire the 2D context of `canvas`.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> RenderResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or(RendererError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RendererError::ContextUnavailable)?;
        Ok(Self::new(ctx))
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Push `style` onto the context. Callers pair this with `restore`.
    fn apply_style(&self, style: &ShapeStyle) -> RenderResult<()> {
        self.ctx.save();
        self.ctx.set_global_alpha(style.opacity);
        self.ctx.set_stroke_style_str(style.stroke_color.as_str());
        self.ctx.set_line_width(style.line_width);
        if let Err(err) = self.ctx.set_line_dash(&dash_array(&style.line_dash)) {
            self.ctx.restore();
            return Err(js_err(err));
        }
        Ok(())
    }

    fn fill_and_stroke(&self, style: &ShapeStyle) {
        if style.has_fill() {
            self.ctx.set_fill_style_str(style.fill_color.as_str());
            self.ctx.fill();
        }
        self.ctx.stroke();
    }

    fn rounded_rect_path(&self, rect: Rect, radius: f64) -> RenderResult<()> {
        let ctx = &self.ctx;
        ctx.begin_path();
        if radius <= 0.0 {
            ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
            return Ok(());
        }
        ctx.move_to(rect.x0 + radius, rect.y0);
        ctx.arc_to(rect.x1, rect.y0, rect.x1, rect.y1, radius).map_err(js_err)?;
        ctx.arc_to(rect.x1, rect.y1, rect.x0, rect.y1, radius).map_err(js_err)?;
        ctx.arc_to(rect.x0, rect.y1, rect.x0, rect.y0, radius).map_err(js_err)?;
        ctx.arc_to(rect.x0, rect.y0, rect.x1, rect.y0, radius).map_err(js_err)?;
        ctx.close_path();
        Ok(())
    }
}

impl RenderSurface for Canvas2dSurface {
    fn clear(&mut self, size: Size, background: &str) -> RenderResult<()> {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        self.ctx.set_fill_style_str(background);
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn draw_rectangle(&mut self, rect: &Rectangle) -> RenderResult<()> {
        self.apply_style(&rect.style)?;
        let result = self.rounded_rect_path(rect.as_rect(), rect.corner_radius());
        if result.is_ok() {
            self.fill_and_stroke(&rect.style);
        }
        self.ctx.restore();
        result
    }

    fn draw_ellipse(&mut self, ellipse: &Ellipse) -> RenderResult<()> {
        self.apply_style(&ellipse.style)?;
        self.ctx.begin_path();
        let result = self
            .ctx
            .ellipse(
                ellipse.center.x,
                ellipse.center.y,
                ellipse.radius_x,
                ellipse.radius_y,
                ellipse.rotation,
                ellipse.start_angle,
                ellipse.end_angle,
            )
            .map_err(js_err);
        if result.is_ok() {
            self.fill_and_stroke(&ellipse.style);
        }
        self.ctx.restore();
        result
    }

    fn draw_pencil(&mut self, pencil: &Pencil) -> RenderResult<()> {
        let Some(first) = pencil.points.first() else {
            return Ok(());
        };
        self.apply_style(&pencil.style)?;
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.begin_path();
        let mut result = Ok(());
        if pencil.points.len() == 1 {
            result = self
                .ctx
                .arc(first.x, first.y, pencil.style.line_width / 2.0, 0.0, TAU)
                .map_err(js_err);
            if result.is_ok() {
                self.ctx.set_fill_style_str(pencil.style.stroke_color.as_str());
                self.ctx.fill();
            }
        } else {
            self.ctx.move_to(first.x, first.y);
            for point in &pencil.points[1..] {
                self.ctx.line_to(point.x, point.y);
            }
            self.ctx.stroke();
        }
        self.ctx.restore();
        result
    }

    fn draw_overlay_rect(&mut self, rect: Rect, style: &OverlayStyle) -> RenderResult<()> {
        self.ctx.save();
        self.ctx.set_global_alpha(style.alpha);
        if let Err(err) = self.ctx.set_line_dash(&dash_array(&style.line_dash)) {
            self.ctx.restore();
            return Err(js_err(err));
        }
        if let Some(fill) = &style.fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
        }
        self.ctx.set_stroke_style_str(&style.stroke);
        self.ctx.set_line_width(style.line_width);
        self.ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
        self.ctx.restore();
        Ok(())
    }
}
