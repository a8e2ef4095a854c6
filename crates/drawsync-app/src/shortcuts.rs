//! Keyboard shortcut registry and documentation.

use drawsync_core::tools::ToolKind;

/// What a shortcut does when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectTool(ToolKind),
    DeleteSelection,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// DOM `KeyboardEvent.key` value.
    pub key: &'static str,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "1", "Delete").
    pub fn format(&self) -> String {
        self.key.to_string()
    }
}

static SHORTCUTS: [Shortcut; 7] = [
    Shortcut::new("1", ShortcutAction::SelectTool(ToolKind::Cursor), "Cursor"),
    Shortcut::new("2", ShortcutAction::SelectTool(ToolKind::Rectangle), "Rectangle"),
    Shortcut::new("3", ShortcutAction::SelectTool(ToolKind::Ellipse), "Ellipse"),
    Shortcut::new("4", ShortcutAction::SelectTool(ToolKind::Pencil), "Pencil"),
    Shortcut::new("5", ShortcutAction::SelectTool(ToolKind::Eraser), "Eraser"),
    Shortcut::new("Delete", ShortcutAction::DeleteSelection, "Delete selected shapes"),
    Shortcut::new("Backspace", ShortcutAction::DeleteSelection, "Delete selected shapes"),
];

/// Whether a key event aimed at this element is text entry and must not
/// trigger shortcuts. `tag_name` is the DOM `tagName`.
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || ["INPUT", "TEXTAREA", "SELECT"]
            .iter()
            .any(|tag| tag_name.eq_ignore_ascii_case(tag))
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        &SHORTCUTS
    }

    /// Shortcut bound to `key`. Keys are matched exactly, so "1" on the
    /// numpad and the top row both resolve.
    pub fn lookup(key: &str) -> Option<&'static Shortcut> {
        SHORTCUTS.iter().find(|shortcut| shortcut.key == key)
    }

    pub fn tool_for_key(key: &str) -> Option<ToolKind> {
        match Self::lookup(key)?.action {
            ShortcutAction::SelectTool(tool) => Some(tool),
            ShortcutAction::DeleteSelection => None,
        }
    }

    /// Key that selects `tool`.
    pub fn key_for_tool(tool: ToolKind) -> Option<&'static str> {
        SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.action == ShortcutAction::SelectTool(tool))
            .map(|shortcut| shortcut.key)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}
