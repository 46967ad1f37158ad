//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives in
//! Rust so the WASM host and native tests share one definition.

use crate::input::KeyEvent;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Copy,
    Paste,
    Delete,

    // ── View ──
    ZoomIn,
    ZoomOut,
    /// Space held: pointer drags pan the canvas.
    PanStart,
    PanEnd,
}

impl ShortcutAction {
    /// camelCase name reported across the WASM boundary.
    pub fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Delete => "delete",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::PanStart => "panStart",
            Self::PanEnd => "panEnd",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key press. Returns `None` when the combo has no binding or
    /// focus is inside a text input.
    pub fn resolve_down(event: &KeyEvent) -> Option<ShortcutAction> {
        if event.in_text_input {
            return None;
        }
        let mods = event.modifiers;
        let cmd = mods.ctrl || mods.meta;
        let key = event.key.as_str();

        if cmd {
            return match key {
                "c" | "C" => Some(ShortcutAction::Copy),
                "v" | "V" => Some(ShortcutAction::Paste),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "+" => Some(ShortcutAction::ZoomIn),
            " " => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }

    /// Resolve a key release. Only Space has a release binding.
    pub fn resolve_up(event: &KeyEvent) -> Option<ShortcutAction> {
        if event.in_text_input {
            return None;
        }
        match event.key.as_str() {
            " " => Some(ShortcutAction::PanEnd),
            _ => None,
        }
    }
}
