//! Selection engine: hit-testing, click/shift-click selection, marquee
//! selection and the hand-off to shape dragging.

use crate::geometry::{normalized_rect, rect_contains};
use crate::shapes::{HIT_THRESHOLD, Shape, ShapeId};
use crate::store::SceneStore;
use crate::tools::ToolKind;
use kurbo::{Point, Rect};

/// Drag-selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Starting point (where mouse was pressed).
    pub start: Point,
    /// Current point (where mouse is now).
    pub current: Point,
}

impl SelectionRect {
    /// Zero-size marquee at `point`.
    pub fn new(point: Point) -> Self {
        Self {
            start: point,
            current: point,
        }
    }

    /// Convert to a normalized kurbo Rect.
    pub fn to_rect(&self) -> Rect {
        normalized_rect(self.start, self.current)
    }
}

/// Topmost shape under `point`, if any.
pub fn shape_at_position(shapes: &[Shape], point: Point, min_threshold: f64) -> Option<&Shape> {
    shapes.iter().rev().find(|shape| shape.hit_test(point, min_threshold))
}

/// Shapes whose bounds lie fully inside `marquee`, in paint order.
pub fn shapes_in_marquee(shapes: &[Shape], marquee: Rect) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|shape| rect_contains(marquee, shape.bounds()))
        .map(Shape::id)
        .collect()
}

/// Pointer affordance shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Move,
    Grab,
    Grabbing,
}

impl CursorStyle {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Move => "move",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Button down on a shape; nothing follows the pointer.
    Pressed,
    /// Button down on empty space; the marquee follows the pointer.
    Marquee,
    /// Button down on a selected shape; the selection follows the pointer.
    Dragging,
}

/// Cursor-tool interaction. Pointer handlers report whether the board
/// needs a redraw.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    gesture: Gesture,
    /// Minimum border hit distance.
    pub hit_threshold: f64,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(HIT_THRESHOLD)
    }
}

impl SelectionEngine {
    pub fn new(hit_threshold: f64) -> Self {
        Self {
            gesture: Gesture::Idle,
            hit_threshold,
        }
    }

    /// Whether the initiating button is still down.
    pub fn is_pressed(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn pointer_down(&mut self, store: &mut SceneStore, point: Point, shift: bool) -> bool {
        if store.tool() != ToolKind::Cursor {
            return false;
        }
        let hit = shape_at_position(store.shapes(), point, self.hit_threshold).map(Shape::id);
        match hit {
            Some(id) if store.is_selected(id) => {
                if shift {
                    store.remove_from_selection(id);
                    self.gesture = Gesture::Pressed;
                } else {
                    store.start_drag(point);
                    self.gesture = Gesture::Dragging;
                }
            }
            Some(id) => {
                if shift {
                    store.add_to_selection(id);
                } else {
                    store.set_selection(vec![id]);
                }
                self.gesture = Gesture::Pressed;
            }
            None => {
                if !shift {
                    store.clear_selection();
                }
                store.set_selection_rect(Some(SelectionRect::new(point)));
                self.gesture = Gesture::Marquee;
            }
        }
        true
    }

    pub fn pointer_move(&mut self, store: &mut SceneStore, point: Point) -> bool {
        match self.gesture {
            Gesture::Dragging => store.update_drag(point),
            Gesture::Marquee => match store.selection_rect() {
                Some(mut rect) => {
                    rect.current = point;
                    store.set_selection_rect(Some(rect));
                    true
                }
                None => false,
            },
            Gesture::Idle | Gesture::Pressed => false,
        }
    }

    pub fn pointer_up(&mut self, store: &mut SceneStore, shift: bool) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Idle => return false,
            Gesture::Dragging => {
                let moved = store.end_drag();
                log::debug!("Moved {moved} shapes");
            }
            Gesture::Marquee => {
                if let Some(rect) = store.selection_rect() {
                    let contained = shapes_in_marquee(store.shapes(), rect.to_rect());
                    if shift {
                        let mut ids = store.selection().to_vec();
                        ids.extend(contained);
                        store.set_selection(ids);
                    } else {
                        store.set_selection(contained);
                    }
                }
            }
            Gesture::Pressed => {}
        }
        store.set_selection_rect(None);
        true
    }

    /// Abandon the gesture without committing anything.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Cursor to show with the pointer at `point`.
    pub fn cursor_for(&self, store: &SceneStore, point: Point) -> CursorStyle {
        match store.tool() {
            ToolKind::Cursor => {}
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Pencil | ToolKind::Eraser => {
                return CursorStyle::Crosshair;
            }
        }
        if store.drag().is_dragging {
            return CursorStyle::Grabbing;
        }
        match shape_at_position(store.shapes(), point, self.hit_threshold) {
            Some(shape) if store.is_selected(shape.id()) => CursorStyle::Grab,
            Some(_) => CursorStyle::Move,
            None => CursorStyle::Default,
        }
    }
}
