//! Drag-to-move of the selected shapes.
//!
//! While a drag is in flight the store keeps the original geometry; the
//! renderer asks for [`DragState::preview_positions`] instead. The final
//! offset is committed exactly once, when the drag ends.

use crate::shapes::{Shape, ShapeId, ShapePatch};
use kurbo::{Point, Vec2};
use std::borrow::Cow;

/// Transient state of a shape drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    /// Pointer position when the drag started.
    pub start_position: Point,
    /// Pointer travel since `start_position`.
    pub current_offset: Vec2,
    /// Shapes moved by this drag.
    pub dragged_ids: Vec<ShapeId>,
}

impl DragState {
    /// Begin dragging `ids` from `point`.
    pub fn start(&mut self, point: Point, ids: Vec<ShapeId>) {
        self.is_dragging = true;
        self.start_position = point;
        self.current_offset = Vec2::ZERO;
        self.dragged_ids = ids;
    }

    /// Track the pointer. No-op when no drag is in flight.
    pub fn update(&mut self, point: Point) -> bool {
        if !self.is_dragging {
            return false;
        }
        self.current_offset = point - self.start_position;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The shape list as it should be drawn right now.
    ///
    /// Dragged shapes are translated copies; the input is never modified, so
    /// calling this repeatedly yields the same result.
    pub fn preview_positions<'a>(&self, shapes: &'a [Shape]) -> Cow<'a, [Shape]> {
        if !self.is_dragging || self.dragged_ids.is_empty() {
            return Cow::Borrowed(shapes);
        }
        Cow::Owned(
            shapes
                .iter()
                .map(|shape| {
                    if self.dragged_ids.contains(&shape.id()) {
                        shape.translated(self.current_offset)
                    } else {
                        shape.clone()
                    }
                })
                .collect(),
        )
    }

    /// One geometry patch per dragged shape still present in `shapes`.
    pub fn commit_patches(&self, shapes: &[Shape]) -> Vec<(ShapeId, ShapePatch)> {
        if !self.is_dragging {
            return Vec::new();
        }
        self.dragged_ids
            .iter()
            .filter_map(|id| {
                let Some(shape) = shapes.iter().find(|s| s.id() == *id) else {
                    log::debug!("Dragged shape {id} vanished before commit");
                    return None;
                };
                let moved = shape.translated(self.current_offset);
                Some((*id, ShapePatch::geometry(moved.geometry())))
            })
            .collect()
    }
}
