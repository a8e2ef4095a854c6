//! Pointer event routing.
//!
//! Drawing tools feed a [`ToolManager`] gesture; the cursor tool feeds the
//! [`SelectionEngine`]. The eraser has no behavior yet and swallows input.

use drawsync_core::config::BoardConfig;
use drawsync_core::input::InputState;
use drawsync_core::selection::{CursorStyle, SelectionEngine};
use drawsync_core::shapes::Shape;
use drawsync_core::store::SceneStore;
use drawsync_core::tools::{ToolKind, ToolManager};
use kurbo::Point;

/// Turns canvas-space pointer events into store commits.
///
/// Every handler returns whether the board needs a redraw.
#[derive(Debug, Clone)]
pub struct EventHandler {
    tools: ToolManager,
    selection: SelectionEngine,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

impl EventHandler {
    pub fn new(config: &BoardConfig) -> Self {
        let mut tools = ToolManager::new(config.initial_tool);
        tools.drawn_threshold = config.drawn_threshold;
        Self {
            tools,
            selection: SelectionEngine::new(config.hit_threshold),
        }
    }

    /// Abandon any gesture in flight, e.g. after a tool switch.
    pub fn cancel(&mut self) {
        self.tools.cancel();
        self.selection.cancel();
    }

    fn sync_tool(&mut self, store: &SceneStore) {
        if self.tools.current_tool != store.tool() {
            self.tools.set_tool(store.tool());
            self.selection.cancel();
        }
    }

    pub fn handle_press(&mut self, store: &mut SceneStore, point: Point, input: &InputState) -> bool {
        self.sync_tool(store);
        match store.tool() {
            ToolKind::Cursor => self.selection.pointer_down(store, point, input.shift()),
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Pencil => {
                self.tools.begin(point, store.default_style())
            }
            ToolKind::Eraser => {
                log::debug!("Eraser press ignored");
                false
            }
        }
    }

    pub fn handle_drag(&mut self, store: &mut SceneStore, point: Point) -> bool {
        match store.tool() {
            ToolKind::Cursor => self.selection.pointer_move(store, point),
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Pencil => self.tools.update(point),
            ToolKind::Eraser => false,
        }
    }

    pub fn handle_release(&mut self, store: &mut SceneStore, input: &InputState) -> bool {
        match store.tool() {
            ToolKind::Cursor => self.selection.pointer_up(store, input.shift()),
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Pencil => {
                let tool = self.tools.current_tool;
                let Some(outcome) = self.tools.end() else {
                    return false;
                };
                if !outcome.drawn {
                    log::debug!("{} too small, discarded", tool.name());
                    return true;
                }
                let id = store.add_shape(outcome.shape);
                log::debug!("Added {} {id}", tool.name());
                // Rectangles and ellipses are one-shot; pencil strokes chain.
                if tool != ToolKind::Pencil {
                    store.set_tool(ToolKind::Cursor);
                    self.tools.set_tool(ToolKind::Cursor);
                }
                true
            }
            ToolKind::Eraser => false,
        }
    }

    /// Shape being drawn right now, if any.
    pub fn live_shape(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }

    pub fn is_busy(&self) -> bool {
        self.tools.is_drawing() || self.selection.is_pressed()
    }

    pub fn cursor_for(&self, store: &SceneStore, point: Point) -> CursorStyle {
        self.selection.cursor_for(store, point)
    }
}
