//! Full-scene render pass.
//!
//! The board is redrawn from scratch after every mutation: background, shapes
//! bottom to top, the shape being drawn, then selection chrome.

use crate::renderer::{OverlayStyle, RenderContext, RenderResult, RenderSurface, css_color};
use drawsync_core::shapes::Shape;
use std::borrow::Cow;

/// Shapes in paint order, with any drag in flight applied.
pub fn visible_shapes<'a>(ctx: &RenderContext<'a>) -> Cow<'a, [Shape]> {
    ctx.store.drag().preview_positions(ctx.store.shapes())
}

/// Render one frame of the board onto `surface`.
pub fn render_scene<S>(surface: &mut S, ctx: &RenderContext<'_>) -> RenderResult<()>
where
    S: RenderSurface + ?Sized,
{
    surface.clear(ctx.viewport_size, &css_color(ctx.theme.background()))?;

    let shapes = visible_shapes(ctx);
    for shape in shapes.iter() {
        surface.draw_shape(&ctx.theme.resolve_shape(shape))?;
    }

    if let Some(live) = ctx.live_shape {
        if live.is_drawn(ctx.drawn_threshold) {
            surface.draw_shape(&ctx.theme.resolve_shape(live))?;
        }
    }

    let selection = OverlayStyle::selection_box(ctx.selection_color);
    for shape in shapes.iter().filter(|s| ctx.store.is_selected(s.id())) {
        let padded = shape.bounds().inflate(ctx.selection_padding, ctx.selection_padding);
        surface.draw_overlay_rect(padded, &selection)?;
    }

    if let Some(marquee) = ctx.store.selection_rect() {
        surface.draw_overlay_rect(marquee.to_rect(), &OverlayStyle::marquee(ctx.selection_color))?;
    }

    log::trace!(
        "Rendered {} shapes at revision {}",
        shapes.len(),
        ctx.store.revision()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawCommand};
    use crate::renderer::Theme;
    use drawsync_core::selection::SelectionRect;
    use drawsync_core::shapes::{Ellipse, Paint, Pencil, Rectangle, ShapeStyle};
    use drawsync_core::store::SceneStore;
    use drawsync_core::tools::ToolKind;
    use kurbo::{Point, Rect, Size};

    fn rect_shape(x: f64, y: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), 40.0, 20.0, ShapeStyle::default()))
    }

    fn render(ctx: &RenderContext<'_>) -> DisplayList {
        let mut list = DisplayList::default();
        render_scene(&mut list, ctx).unwrap();
        list
    }

    #[test]
    fn test_clears_then_draws_in_order() {
        let mut store = SceneStore::default();
        let a = store.add_shape(rect_shape(0.0, 0.0));
        let b = store.add_shape(Shape::Ellipse(Ellipse::new(Point::new(50.0, 50.0), 10.0, 10.0, ShapeStyle::default())));
        let ctx = RenderContext::new(&store, Size::new(800.0, 600.0));
        let list = render(&ctx);
        assert_eq!(list.commands.len(), 3);
        assert!(matches!(&list.commands[0], DrawCommand::Clear { background, .. } if background == "#ffffff"));
        assert_eq!(list.shape_ids(), vec![a, b]);
    }

    #[test]
    fn test_dark_theme_remaps_ink_without_touching_store() {
        let mut store = SceneStore::default();
        let id = store.add_shape(rect_shape(0.0, 0.0));
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0)).with_theme(Theme::Dark);
        let list = render(&ctx);
        let DrawCommand::Shape(drawn) = &list.commands[1] else {
            panic!("expected a shape command");
        };
        assert_eq!(drawn.style().stroke_color.as_str(), "white");
        assert_eq!(store.shape(id).unwrap().style().stroke_color.as_str(), "black");
    }

    #[test]
    fn test_custom_colors_survive_theme() {
        let mut store = SceneStore::default();
        let mut style = ShapeStyle::default();
        style.stroke_color = Paint::new("#f59e0b");
        store.add_shape(Shape::Pencil(Pencil::new(Point::new(1.0, 1.0), style)));
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0)).with_theme(Theme::Dark);
        let list = render(&ctx);
        let DrawCommand::Shape(drawn) = &list.commands[1] else {
            panic!("expected a shape command");
        };
        assert_eq!(drawn.style().stroke_color.as_str(), "#f59e0b");
    }

    #[test]
    fn test_selection_box_is_padded() {
        let mut store = SceneStore::new(ToolKind::Cursor, ShapeStyle::default());
        let id = store.add_shape(rect_shape(10.0, 10.0));
        store.set_selection(vec![id]);
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0));
        let list = render(&ctx);
        let overlays = list.overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].0, Rect::new(2.0, 2.0, 58.0, 38.0));
        assert_eq!(overlays[0].1.line_dash, vec![5.0, 5.0]);
    }

    #[test]
    fn test_drag_preview_is_drawn_and_store_unchanged() {
        let mut store = SceneStore::new(ToolKind::Cursor, ShapeStyle::default());
        let id = store.add_shape(rect_shape(0.0, 0.0));
        store.set_selection(vec![id]);
        store.start_drag(Point::new(5.0, 5.0));
        store.update_drag(Point::new(35.0, 15.0));
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0));

        let first = render(&ctx);
        let second = render(&ctx);
        assert_eq!(first, second);

        let DrawCommand::Shape(drawn) = &first.commands[1] else {
            panic!("expected a shape command");
        };
        assert!((drawn.bounds().x0 - 30.0).abs() < f64::EPSILON);
        assert!((store.shape(id).unwrap().bounds().x0 - 0.0).abs() < f64::EPSILON);
        assert_eq!(first.overlays()[0].0, Rect::new(22.0, 2.0, 78.0, 38.0));
    }

    #[test]
    fn test_marquee_drawn_normalized() {
        let mut store = SceneStore::new(ToolKind::Cursor, ShapeStyle::default());
        store.set_selection_rect(Some(SelectionRect {
            start: Point::new(50.0, 60.0),
            current: Point::new(10.0, 20.0),
        }));
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0));
        let list = render(&ctx);
        let overlays = list.overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].0, Rect::new(10.0, 20.0, 50.0, 60.0));
        assert!(overlays[0].1.fill.is_some());
    }

    #[test]
    fn test_live_shape_only_once_drawn() {
        let store = SceneStore::default();
        let tiny = rect_shape(0.0, 0.0);
        let Shape::Rectangle(mut r) = tiny.clone() else {
            unreachable!()
        };
        r.width = 3.0;
        r.height = 3.0;
        let tiny = Shape::Rectangle(r);
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0)).with_live_shape(Some(&tiny));
        assert_eq!(render(&ctx).commands.len(), 1);

        let big = rect_shape(0.0, 0.0);
        let ctx = RenderContext::new(&store, Size::new(100.0, 100.0)).with_live_shape(Some(&big));
        assert_eq!(render(&ctx).shape_ids(), vec![big.id()]);
    }
}
