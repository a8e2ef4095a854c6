//! Scene store: the single owner of the board's state.
//!
//! Shapes are kept in insertion order, which is also the paint order (first
//! = bottom). Every mutating method is one commit and bumps [`SceneStore::revision`].

use crate::config::BoardConfig;
use crate::drag::DragState;
use crate::selection::SelectionRect;
use crate::shapes::{Shape, ShapeId, ShapePatch, ShapeStyle, StyleError, StylePatch};
use crate::tools::ToolKind;
use kurbo::Point;

/// Board state shared by the interaction engine and the renderer.
#[derive(Debug, Clone)]
pub struct SceneStore {
    tool: ToolKind,
    shapes: Vec<Shape>,
    default_style: ShapeStyle,
    selection: Vec<ShapeId>,
    selection_rect: Option<SelectionRect>,
    drag: DragState,
    revision: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(ToolKind::Rectangle, ShapeStyle::default())
    }
}

impl SceneStore {
    pub fn new(tool: ToolKind, default_style: ShapeStyle) -> Self {
        Self {
            tool,
            shapes: Vec::new(),
            default_style,
            selection: Vec::new(),
            selection_rect: None,
            drag: DragState::default(),
            revision: 0,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.initial_tool, config.default_style.clone())
    }

    fn commit(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Monotonic counter of commits; changes whenever anything visible may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// All shapes, bottom to top.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn default_style(&self) -> &ShapeStyle {
        &self.default_style
    }

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection_rect
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Switch tools.
    ///
    /// Any tool other than the cursor drops the selection; every switch
    /// drops the marquee and any drag in flight.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != ToolKind::Cursor {
            self.selection.clear();
        }
        self.selection_rect = None;
        self.drag.reset();
        if self.tool != tool {
            log::debug!("Tool {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
        self.commit();
    }

    /// Append a shape on top of the scene and return its id.
    ///
    /// A shape whose id is already taken gets a fresh one.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        if self.shape(shape.id()).is_some() {
            log::warn!("Duplicate shape id {}, assigning a new one", shape.id());
            shape.regenerate_id();
        }
        let id = shape.id();
        self.shapes.push(shape);
        self.commit();
        id
    }

    fn apply_patch(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) else {
            log::debug!("Update for unknown shape {id} ignored");
            return false;
        };
        if let Some(style) = &patch.style {
            if let Err(err) = shape.style().patched(style) {
                log::warn!("Rejected style for shape {id}: {err}");
                return false;
            }
        }
        if !shape.apply(patch) {
            log::warn!("Rejected {} geometry for {} shape {id}", patch_kind(patch), shape.kind_name());
        }
        true
    }

    /// Merge `patch` into the shape with `id`. Returns `false` for unknown ids
    /// and for style patches that would leave the style out of range.
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        let found = self.apply_patch(id, patch);
        if found {
            self.commit();
        }
        found
    }

    /// Apply several updates as one commit. Returns how many shapes were updated.
    pub fn batch_update_shapes<I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (ShapeId, ShapePatch)>,
    {
        let applied = updates
            .into_iter()
            .filter(|(id, patch)| self.apply_patch(*id, patch))
            .count();
        if applied > 0 {
            self.commit();
        }
        applied
    }

    /// Remove a shape, also dropping it from the selection.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        self.selection.retain(|&selected| selected != id);
        let removed = self.shapes.remove(index);
        self.commit();
        Some(removed)
    }

    /// Remove every selected shape. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let before = self.shapes.len();
        let selection = std::mem::take(&mut self.selection);
        self.shapes.retain(|s| !selection.contains(&s.id()));
        self.commit();
        before - self.shapes.len()
    }

    /// Replace the style new shapes are created with. Existing shapes keep theirs.
    pub fn set_default_style(&mut self, style: ShapeStyle) -> Result<(), StyleError> {
        style.validate()?;
        self.default_style = style;
        self.commit();
        Ok(())
    }

    /// Merge `patch` into the default style. Nothing changes if the merged
    /// style is invalid.
    pub fn update_default_style(&mut self, patch: &StylePatch) -> Result<(), StyleError> {
        self.default_style = self.default_style.patched(patch)?;
        self.commit();
        Ok(())
    }

    /// Apply a style patch to every selected shape. Returns how many changed.
    ///
    /// The patch is checked against every selected shape first; if any
    /// result would be invalid, no shape is touched.
    pub fn restyle_selection(&mut self, patch: &StylePatch) -> Result<usize, StyleError> {
        for shape in self.shapes.iter().filter(|s| self.selection.contains(&s.id())) {
            shape.style().patched(patch)?;
        }
        let updates: Vec<_> = self
            .selection
            .iter()
            .map(|&id| (id, ShapePatch::style(patch.clone())))
            .collect();
        Ok(self.batch_update_shapes(updates))
    }

    /// Replace the selection. Duplicate ids are collapsed.
    pub fn set_selection(&mut self, ids: Vec<ShapeId>) {
        self.selection.clear();
        for id in ids {
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
        self.commit();
    }

    pub fn add_to_selection(&mut self, id: ShapeId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
            self.commit();
        }
    }

    pub fn remove_from_selection(&mut self, id: ShapeId) {
        let before = self.selection.len();
        self.selection.retain(|&selected| selected != id);
        if self.selection.len() != before {
            self.commit();
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.commit();
        }
    }

    pub fn set_selection_rect(&mut self, rect: Option<SelectionRect>) {
        self.selection_rect = rect;
        self.commit();
    }

    /// Start dragging the current selection from `point`.
    pub fn start_drag(&mut self, point: Point) {
        let ids = self.selection.clone();
        self.drag.start(point, ids);
        self.commit();
    }

    /// Track the drag. No-op when no drag is in flight.
    pub fn update_drag(&mut self, point: Point) -> bool {
        let moved = self.drag.update(point);
        if moved {
            self.commit();
        }
        moved
    }

    /// Commit the final drag offset, one update per dragged shape, and reset
    /// the drag state. Returns how many shapes were moved.
    pub fn end_drag(&mut self) -> usize {
        if !self.drag.is_dragging {
            return 0;
        }
        let patches = self.drag.commit_patches(&self.shapes);
        self.drag.reset();
        let moved = self.batch_update_shapes(patches);
        if moved == 0 {
            // The batch did not commit; publish the reset on its own.
            self.commit();
        }
        moved
    }

    /// Serialize the shape list, bottom to top.
    pub fn shapes_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.shapes)
    }
}

fn patch_kind(patch: &ShapePatch) -> &'static str {
    use crate::shapes::ShapeGeometry;
    match patch.geometry {
        Some(ShapeGeometry::Rectangle { .. }) => "rectangle",
        Some(ShapeGeometry::Ellipse { .. }) => "ellipse",
        Some(ShapeGeometry::Pencil { .. }) => "pencil",
        None => "no",
    }
}
