//! Board state and lifecycle.
//!
//! [`Board`] owns the scene store and everything needed to turn host events
//! into commits and frames. It holds no DOM handles, so the whole event flow
//! runs natively in tests.

use drawsync_core::config::{BoardConfig, ConfigError};
use drawsync_core::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent, client_to_canvas};
use drawsync_core::presets::{self, DashPreset};
use drawsync_core::selection::CursorStyle;
use drawsync_core::shapes::{ShapeStyle, StyleError, StylePatch};
use drawsync_core::store::SceneStore;
use drawsync_core::tools::ToolKind;
use drawsync_render::{RenderContext, RenderResult, RenderSurface, RendererError, Theme, render_scene};
use kurbo::{Point, Size};
use thiserror::Error;

use crate::event_handler::EventHandler;
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};

/// Errors surfaced to the host page.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },
}

/// A drawing board: scene, input tracking and view settings.
pub struct Board {
    config: BoardConfig,
    store: SceneStore,
    input: InputState,
    events: EventHandler,
    theme: Theme,
    /// Canvas size in CSS pixels.
    viewport: Size,
    /// Canvas top-left in client coordinates.
    canvas_origin: Point,
    rendered_revision: Option<u64>,
    /// Set by changes that don't touch the store (theme, size, live shape).
    dirty: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let store = SceneStore::from_config(&config);
        let events = EventHandler::new(&config);
        Self {
            canvas_origin: Point::new(0.0, config.header_height),
            config,
            store,
            input: InputState::new(),
            events,
            theme: Theme::default(),
            viewport: Size::ZERO,
            rendered_revision: None,
            dirty: true,
        }
    }

    /// Build a board from a (possibly partial) JSON config.
    pub fn from_json_config(json: &str) -> Result<Self, BoardError> {
        Ok(Self::new(BoardConfig::from_json(json)?))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Fit the canvas to a window of the given size, leaving room for the
    /// header. Returns the new canvas size.
    pub fn resize(&mut self, window_width: f64, window_height: f64) -> Size {
        let size = Size::new(
            window_width.max(0.0),
            (window_height - self.config.header_height).max(0.0),
        );
        if size != self.viewport {
            log::info!("Canvas resized to {}x{}", size.width, size.height);
            self.viewport = size;
            self.dirty = true;
        }
        size
    }

    /// Where the canvas sits in client coordinates.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            log::debug!("Theme changed to {theme:?}");
            self.theme = theme;
            self.dirty = true;
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.store.tool()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.events.cancel();
        self.store.set_tool(tool);
    }

    /// Look a tool up by name ("rectangle", "Pencil", ...) and select it.
    pub fn set_tool_by_name(&mut self, name: &str) -> Result<(), BoardError> {
        let tool = ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BoardError::Unknown {
                kind: "tool",
                name: name.to_string(),
            })?;
        self.set_tool(tool);
        Ok(())
    }

    /// Refresh modifier state from a pointer event.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    fn to_canvas(&self, client: Point) -> Point {
        client_to_canvas(client, self.canvas_origin)
    }

    /// Pointer pressed at a client position. Returns whether anything changed.
    pub fn pointer_down(&mut self, client: Point, button: MouseButton) -> bool {
        let position = self.to_canvas(client);
        self.input.handle_pointer_event(PointerEvent::Down { position, button });
        if button != MouseButton::Left {
            return false;
        }
        self.events.handle_press(&mut self.store, position, &self.input)
    }

    pub fn pointer_move(&mut self, client: Point) -> bool {
        let position = self.to_canvas(client);
        self.input.handle_pointer_event(PointerEvent::Move { position });
        if !self.events.is_busy() {
            return false;
        }
        let changed = self.events.handle_drag(&mut self.store, position);
        if changed && self.events.live_shape().is_some() {
            self.dirty = true;
        }
        changed
    }

    /// Pointer released. A release without a matching press on the canvas,
    /// e.g. a click that started elsewhere on the page, is ignored.
    pub fn pointer_up(&mut self, client: Point, button: MouseButton) -> bool {
        let position = self.to_canvas(client);
        let pressed = self.input.is_button_pressed(button);
        self.input.handle_pointer_event(PointerEvent::Up { position, button });
        if button != MouseButton::Left || !pressed {
            return false;
        }
        // A discarded live shape leaves the store untouched but still
        // has to disappear from the canvas.
        self.dirty |= self.events.live_shape().is_some();
        self.events.handle_release(&mut self.store, &self.input)
    }

    /// Finish whatever gesture is in flight, e.g. when the page loses focus.
    pub fn release_all(&mut self) -> bool {
        let changed = if self.events.is_busy() {
            self.dirty |= self.events.live_shape().is_some();
            self.events.handle_release(&mut self.store, &self.input)
        } else {
            false
        };
        self.input.reset();
        changed
    }

    /// Key pressed, by DOM `KeyboardEvent.key`. Returns whether the board
    /// acted on it. Hosts leave the key's default action alone either way;
    /// keys typed into text fields should not reach the board at all.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.handle_key_event(&KeyEvent::Pressed(key.to_string()));
        let modifiers = self.input.modifiers;
        if modifiers.ctrl || modifiers.meta || modifiers.alt {
            return false;
        }
        let Some(shortcut) = ShortcutRegistry::lookup(key) else {
            return false;
        };
        match shortcut.action {
            ShortcutAction::SelectTool(tool) => {
                self.set_tool(tool);
                true
            }
            ShortcutAction::DeleteSelection => {
                if self.store.tool() != ToolKind::Cursor || self.events.is_busy() {
                    return false;
                }
                let removed = self.store.delete_selected();
                if removed > 0 {
                    log::info!("Deleted {removed} shapes");
                }
                removed > 0
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.handle_key_event(&KeyEvent::Released(key.to_string()));
    }

    pub fn set_default_style(&mut self, style: ShapeStyle) -> Result<(), BoardError> {
        Ok(self.store.set_default_style(style)?)
    }

    pub fn update_default_style(&mut self, patch: &StylePatch) -> Result<(), BoardError> {
        Ok(self.store.update_default_style(patch)?)
    }

    /// Apply `patch` to every selected shape. Returns how many changed.
    pub fn restyle_selection(&mut self, patch: &StylePatch) -> Result<usize, BoardError> {
        Ok(self.store.restyle_selection(patch)?)
    }

    /// Parse a JSON style patch and apply it to the default style.
    pub fn update_default_style_json(&mut self, json: &str) -> Result<(), BoardError> {
        let patch: StylePatch = serde_json::from_str(json)?;
        self.update_default_style(&patch)
    }

    pub fn restyle_selection_json(&mut self, json: &str) -> Result<usize, BoardError> {
        let patch: StylePatch = serde_json::from_str(json)?;
        self.restyle_selection(&patch)
    }

    pub fn set_stroke_color(&mut self, color: &str) -> Result<(), BoardError> {
        self.update_default_style(&presets::stroke_patch(color))
    }

    pub fn set_fill_color(&mut self, color: &str) -> Result<(), BoardError> {
        self.update_default_style(&presets::fill_patch(color))
    }

    /// Select a dash preset by name for the default style.
    pub fn set_dash_preset(&mut self, name: &str) -> Result<(), BoardError> {
        let dash = DashPreset::from_name(name).ok_or_else(|| BoardError::Unknown {
            kind: "dash preset",
            name: name.to_string(),
        })?;
        self.update_default_style(&presets::dash_patch(dash))
    }

    /// Stroke colors offered for the current theme.
    pub fn stroke_palette(&self) -> Vec<&'static str> {
        presets::stroke_palette(self.theme.ink())
    }

    pub fn shapes_json(&self) -> Result<String, BoardError> {
        Ok(self.store.shapes_json()?)
    }

    /// Cursor to show at the last pointer position.
    pub fn cursor(&self) -> CursorStyle {
        self.events.cursor_for(&self.store, self.input.pointer_position)
    }

    /// Whether the last frame is stale.
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.rendered_revision != Some(self.store.revision())
    }

    /// Draw the full scene onto `surface`.
    pub fn render<S>(&mut self, surface: &mut S) -> RenderResult<()>
    where
        S: RenderSurface + ?Sized,
    {
        let live = self.events.live_shape();
        let ctx = RenderContext::new(&self.store, self.viewport)
            .with_theme(self.theme)
            .with_selection_padding(self.config.selection_padding)
            .with_drawn_threshold(self.config.drawn_threshold)
            .with_live_shape(live.as_ref());
        render_scene(surface, &ctx)?;
        self.rendered_revision = Some(self.store.revision());
        self.dirty = false;
        Ok(())
    }
}
