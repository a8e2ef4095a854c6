//! Input state for pointer and keyboard events.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => position,
        }
    }
}

/// Keyboard event carrying the DOM `KeyboardEvent.key` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Translate a client (viewport) position into canvas coordinates, given
/// the canvas element's top-left corner in client space.
pub fn client_to_canvas(client: Point, canvas_origin: Point) -> Point {
    Point::ORIGIN + (client - canvas_origin)
}

/// Tracks pointer and keyboard state between events.
///
/// Shift is tracked from key events regardless of the active tool, so a
/// selection gesture always sees the current modifier state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position in canvas coordinates.
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { button, .. } => {
                self.pressed_buttons.insert(button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { .. } => {}
        }
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, down) = match event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        match key.as_str() {
            "Shift" => self.modifiers.shift = down,
            "Control" => self.modifiers.ctrl = down,
            "Alt" => self.modifiers.alt = down,
            "Meta" => self.modifiers.meta = down,
            _ => {}
        }
    }

    /// Override modifiers from an event that carries them (e.g. a mouse event).
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }

    /// Whether `button` went down and has not been released since.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Forget held buttons and modifiers, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.pressed_buttons.clear();
        self.modifiers = Modifiers::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_canvas() {
        let p = client_to_canvas(Point::new(120.0, 150.0), Point::new(20.0, 69.0));
        assert_eq!(p, Point::new(100.0, 81.0));
    }

    #[test]
    fn test_shift_tracking() {
        let mut input = InputState::new();
        assert!(!input.shift());
        input.handle_key_event(&KeyEvent::Pressed("Shift".into()));
        assert!(input.shift());
        input.handle_key_event(&KeyEvent::Pressed("a".into()));
        assert_eq!(input.modifiers, Modifiers { shift: true, ..Default::default() });
        input.handle_key_event(&KeyEvent::Released("Shift".into()));
        assert!(!input.shift());
    }

    #[test]
    fn test_button_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        input.handle_pointer_event(PointerEvent::Move {
            position: Point::new(15.0, 30.0),
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        assert_eq!(input.pointer_position, Point::new(15.0, 30.0));
        input.handle_pointer_event(PointerEvent::Up {
            position: Point::new(15.0, 30.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_dom_buttons() {
        assert_eq!(MouseButton::from_dom(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_dom(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_dom(7), None);
    }
}
