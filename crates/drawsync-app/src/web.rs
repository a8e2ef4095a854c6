//! WebAssembly entry point and DOM wiring.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use drawsync_core::input::{Modifiers, MouseButton};
use drawsync_core::presets;
use drawsync_render::{Canvas2dSurface, Theme};
use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::app::{Board, BoardError};
use crate::shortcuts::{ShortcutRegistry, is_text_entry};

fn to_js(err: BoardError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}

/// Board plus the DOM objects it draws into.
struct Host {
    board: Board,
    canvas: HtmlCanvasElement,
    /// `None` when the 2D context could not be acquired; drawing is skipped.
    surface: Option<Canvas2dSurface>,
}

impl Host {
    /// Match the canvas to the window, minus the header.
    fn fit_to_window(&mut self, window: &Window) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let before = self.board.viewport();
        let size = self.board.resize(width, height);
        // Assigning the canvas size wipes it, so only do it on change.
        if size != before {
            self.canvas.set_width(size.width as u32);
            self.canvas.set_height(size.height as u32);
        }
        self.sync_origin();
    }

    fn sync_origin(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.board.set_canvas_origin(Point::new(rect.left(), rect.top()));
    }

    /// Read the page color scheme from the canvas' computed style.
    fn sync_theme(&mut self, window: &Window) {
        let scheme = window
            .get_computed_style(&self.canvas)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("color-scheme").ok())
            .unwrap_or_default();
        self.board.set_theme(Theme::from_dark(scheme.trim() == "dark"));
    }

    fn redraw(&mut self) {
        if !self.board.needs_redraw() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(err) = self.board.render(surface) {
            log::warn!("Render failed: {err}");
        }
    }

    fn sync_cursor(&self) {
        let cursor = self.board.cursor().as_css();
        if let Err(err) = self.canvas.style().set_property("cursor", cursor) {
            log::debug!("Failed to set cursor: {err:?}");
        }
    }

    fn after_event(&mut self) {
        self.redraw();
        self.sync_cursor();
    }
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

/// Whether the key went to a text field rather than the page.
fn typed_into_field(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .is_some_and(|el| is_text_entry(&el.tag_name(), el.is_content_editable()))
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// A DOM listener, detached again on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        host: &Rc<RefCell<Host>>,
        mut handler: impl FnMut(&mut Host, &Event) + 'static,
    ) -> Result<Self, JsValue> {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            // A listener fired while another one holds the board is dropped.
            let Ok(mut host) = host.try_borrow_mut() else {
                log::debug!("Skipped re-entrant {}", event.type_());
                return;
            };
            handler(&mut *host, &event);
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Browser handle for a board bound to a `<canvas>`.
#[wasm_bindgen]
pub struct WebBoard {
    host: Rc<RefCell<Host>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebBoard {
    /// Bind a board to the canvas with id `canvas_id`. `config` is an
    /// optional JSON board config.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config: Option<String>) -> Result<WebBoard, JsValue> {
        let window = window()?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;

        let board = match config.as_deref() {
            Some(json) => Board::from_json_config(json).map_err(to_js)?,
            None => Board::default(),
        };
        let surface = match Canvas2dSurface::from_canvas(&canvas) {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::warn!("Canvas unavailable, drawing disabled: {err}");
                None
            }
        };

        let host = Rc::new(RefCell::new(Host {
            board,
            canvas: canvas.clone(),
            surface,
        }));
        {
            let mut host = host.borrow_mut();
            host.fit_to_window(&window);
            host.sync_theme(&window);
            host.after_event();
        }

        let listeners = Self::attach_listeners(&host, &canvas, &window)?;
        log::info!("Board bound to #{canvas_id}");
        Ok(WebBoard {
            host,
            _listeners: listeners,
        })
    }

    #[wasm_bindgen(js_name = setDarkMode)]
    pub fn set_dark_mode(&self, dark: bool) -> Result<(), JsValue> {
        self.with_host(|host| host.board.set_theme(Theme::from_dark(dark)))
    }

    /// Re-read the page color scheme, e.g. after the host toggles it.
    #[wasm_bindgen(js_name = syncTheme)]
    pub fn sync_theme(&self) -> Result<(), JsValue> {
        let window = window()?;
        self.with_host(|host| host.sync_theme(&window))
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) -> Result<(), JsValue> {
        self.with_host(|host| host.board.set_tool_by_name(name))?.map_err(to_js)
    }

    pub fn tool(&self) -> Result<String, JsValue> {
        self.with_host(|host| host.board.tool().name().to_lowercase())
    }

    /// Merge a JSON style patch into the style new shapes start from.
    #[wasm_bindgen(js_name = updateDefaultStyle)]
    pub fn update_default_style(&self, patch: &str) -> Result<(), JsValue> {
        self.with_host(|host| host.board.update_default_style_json(patch))?.map_err(to_js)
    }

    /// Apply a JSON style patch to the selected shapes.
    #[wasm_bindgen(js_name = restyleSelection)]
    pub fn restyle_selection(&self, patch: &str) -> Result<usize, JsValue> {
        self.with_host(|host| host.board.restyle_selection_json(patch))?.map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDashPreset)]
    pub fn set_dash_preset(&self, name: &str) -> Result<(), JsValue> {
        self.with_host(|host| host.board.set_dash_preset(name))?.map_err(to_js)
    }

    #[wasm_bindgen(js_name = strokePalette)]
    pub fn stroke_palette(&self) -> Result<js_sys::Array, JsValue> {
        let palette = self.with_host(|host| host.board.stroke_palette())?;
        Ok(palette.into_iter().map(JsValue::from_str).collect())
    }

    #[wasm_bindgen(js_name = fillPalette)]
    pub fn fill_palette() -> js_sys::Array {
        presets::FILL_COLORS.into_iter().map(JsValue::from_str).collect()
    }

    #[wasm_bindgen(js_name = strokeWidths)]
    pub fn stroke_widths() -> js_sys::Array {
        presets::STROKE_WIDTHS.into_iter().map(JsValue::from_f64).collect()
    }

    #[wasm_bindgen(js_name = borderRadii)]
    pub fn border_radii() -> js_sys::Array {
        presets::BORDER_RADII.into_iter().map(JsValue::from_f64).collect()
    }

    #[wasm_bindgen(js_name = setStrokeColor)]
    pub fn set_stroke_color(&self, color: &str) -> Result<(), JsValue> {
        self.with_host(|host| host.board.set_stroke_color(color))?.map_err(to_js)
    }

    #[wasm_bindgen(js_name = setFillColor)]
    pub fn set_fill_color(&self, color: &str) -> Result<(), JsValue> {
        self.with_host(|host| host.board.set_fill_color(color))?.map_err(to_js)
    }

    #[wasm_bindgen(js_name = shapesJson)]
    pub fn shapes_json(&self) -> Result<String, JsValue> {
        self.with_host(|host| host.board.shapes_json())?.map_err(to_js)
    }

    /// Force a full redraw.
    pub fn render(&self) -> Result<(), JsValue> {
        let mut host = self.borrow_host()?;
        let Host { board, surface, .. } = &mut *host;
        match surface.as_mut() {
            Some(surface) => board.render(surface).map_err(|err| to_js(err.into())),
            None => Ok(()),
        }
    }
}

impl WebBoard {
    fn attach_listeners(
        host: &Rc<RefCell<Host>>,
        canvas: &HtmlCanvasElement,
        window: &Window,
    ) -> Result<Vec<Listener>, JsValue> {
        let canvas_target: &EventTarget = canvas.as_ref();
        let window_target: &EventTarget = window.as_ref();

        let resize_window = window.clone();
        let listeners = vec![
            Listener::attach(canvas_target, "mousedown", host, |host, event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(button) = MouseButton::from_dom(event.button()) else {
                    return;
                };
                host.sync_origin();
                host.board.set_modifiers(modifiers(event));
                host.board.pointer_down(client_point(event), button);
                host.after_event();
            })?,
            // Moves and releases are tracked on the window so a gesture that
            // leaves the canvas still ends.
            Listener::attach(window_target, "mousemove", host, |host, event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                // Scrolling moves the canvas without a resize.
                host.sync_origin();
                host.board.set_modifiers(modifiers(event));
                host.board.pointer_move(client_point(event));
                host.after_event();
            })?,
            Listener::attach(window_target, "mouseup", host, |host, event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(button) = MouseButton::from_dom(event.button()) else {
                    return;
                };
                host.sync_origin();
                host.board.set_modifiers(modifiers(event));
                host.board.pointer_up(client_point(event), button);
                host.after_event();
            })?,
            Listener::attach(window_target, "keydown", host, |host, event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if typed_into_field(event) {
                    return;
                }
                // Default actions stay intact; the board only reacts.
                host.board.key_down(&event.key());
                host.after_event();
            })?,
            Listener::attach(window_target, "keyup", host, |host, event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    host.board.key_up(&event.key());
                }
            })?,
            Listener::attach(window_target, "blur", host, |host, _| {
                host.board.release_all();
                host.after_event();
            })?,
            Listener::attach(window_target, "resize", host, move |host, _| {
                host.fit_to_window(&resize_window);
                host.after_event();
            })?,
        ];
        Ok(listeners)
    }

    fn borrow_host(&self) -> Result<RefMut<'_, Host>, JsValue> {
        self.host
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Board is busy"))
    }

    /// Run `f` on the board, then redraw if needed.
    fn with_host<T>(&self, f: impl FnOnce(&mut Host) -> T) -> Result<T, JsValue> {
        let mut host = self.borrow_host()?;
        let result = f(&mut *host);
        host.after_event();
        Ok(result)
    }
}

/// Initialize logging for the WASM build.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Failed to initialize logger: {err}").into());
    }

    log::info!("Starting DrawSync (WASM)");
    ShortcutRegistry::log_all();
}
