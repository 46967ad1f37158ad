//! WASM bridge for Seatmap. Exposes the layout editor engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the canvas
//! and persistence; it forwards pointer/keyboard events here and draws what
//! the render queries return. Structured results cross the boundary as JSON
//! strings.

use seatmap_core::config::EditorConfig;
use seatmap_core::id::ElementId;
use seatmap_core::model::ElementTemplate;
use seatmap_core::snapshot::LayoutSnapshot;
use seatmap_core::{LayoutError, Size};
use seatmap_editor::guides::GuideView;
use seatmap_editor::input::{InputEvent, KeyEvent, Modifiers, PointerButton};
use seatmap_editor::transform::TransformFrame;
use seatmap_editor::Editor;
use serde_json::json;
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor controller.
#[wasm_bindgen]
pub struct SeatmapCanvas {
    editor: Editor,
}

#[wasm_bindgen]
impl SeatmapCanvas {
    /// Create an editor for a canvas of the given size with default tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: Editor::new(EditorConfig::default(), Size::new(width, height)),
        }
    }

    /// Replace the tuning config. Scene, selection and clipboard are kept.
    /// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn set_config_json(&mut self, json: &str) -> String {
        match EditorConfig::from_json(json) {
            Ok(config) => {
                self.editor.set_config(config);
                ok()
            }
            Err(e) => error_json(&e),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.editor.resize(Size::new(width, height));
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the scene with a layout fetched by the host.
    /// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_json(&mut self, json: &str) -> String {
        match LayoutSnapshot::from_json(json) {
            Ok(snapshot) => {
                self.editor.load_snapshot(&snapshot);
                ok()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Full layout payload for the host to persist (replace-all).
    pub fn save_json(&self) -> String {
        match self.editor.context().snapshot().to_json() {
            Ok(layout) => json!({ "ok": true, "layout": raw(&layout) }).to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// Adopt the element list the host's backend returned from a save.
    pub fn apply_saved_json(&mut self, json: &str) -> String {
        match LayoutSnapshot::from_json(json) {
            Ok(saved) => {
                self.editor.context_mut().apply_saved(saved);
                ok()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Set (or clear, with an empty string) the background image reference.
    pub fn set_background(&mut self, background_ref: &str) {
        let value = (!background_ref.is_empty()).then(|| background_ref.to_string());
        self.editor.set_background(value);
    }

    // ─── Pointer / wheel ─────────────────────────────────────────────────

    /// Handle pointer down. `button` follows `MouseEvent.button`.
    /// Returns true if the scene needs a redraw.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: u8,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::PointerDown {
            x,
            y,
            button: button_from_code(button),
            modifiers: modifiers(shift, ctrl, alt, meta),
        };
        self.editor.dispatch(&event)
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let event = InputEvent::PointerMove {
            x,
            y,
            modifiers: modifiers(shift, ctrl, alt, meta),
        };
        self.editor.dispatch(&event)
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let event = InputEvent::PointerUp {
            x,
            y,
            modifiers: modifiers(shift, ctrl, alt, meta),
        };
        self.editor.dispatch(&event)
    }

    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.editor.dispatch(&InputEvent::Wheel { x, y, delta_y })
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a key press. Returns `{"action":"<name>"}`, with `"none"` when
    /// the key has no binding or focus is in a text input.
    pub fn handle_key_down(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        in_text_input: bool,
    ) -> String {
        let event = key_event(key, modifiers(shift, ctrl, alt, meta), in_text_input);
        let action = self.editor.key_down(&event).map_or("none", |a| a.name());
        json!({ "action": action }).to_string()
    }

    pub fn handle_key_up(&mut self, key: &str, in_text_input: bool) -> String {
        let event = key_event(key, Modifiers::NONE, in_text_input);
        let action = self.editor.key_up(&event).map_or("none", |a| a.name());
        json!({ "action": action }).to_string()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Add a palette template at the viewport center.
    /// Returns `{"ok":true,"element":{...}}` or `{"ok":false,"error":"..."}`.
    pub fn add_element_json(&mut self, template_json: &str) -> String {
        let template: ElementTemplate = match serde_json::from_str(template_json) {
            Ok(t) => t,
            Err(e) => return error_json(&LayoutError::from(e)),
        };
        match self.editor.add_from_palette(&template) {
            Ok(element) => json!({ "ok": true, "element": element }).to_string(),
            Err(e) => error_json(&e),
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        !self.editor.delete_selected().is_empty()
    }

    pub fn copy(&mut self) -> bool {
        self.editor.copy()
    }

    /// Paste next to the pointer. Returns the new id, or an empty string.
    pub fn paste(&mut self) -> String {
        self.editor
            .paste()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Replace the selection with the given ids (JSON array). Unknown ids are
    /// dropped.
    pub fn select_ids_json(&mut self, json: &str) -> bool {
        let Ok(ids) = serde_json::from_str::<Vec<String>>(json) else {
            return false;
        };
        let ctx = self.editor.context_mut();
        let ids: Vec<ElementId> = ids
            .iter()
            .map(|s| ElementId::intern(s))
            .filter(|id| ctx.store.contains(*id))
            .collect();
        ctx.selection.set_all(ids);
        true
    }

    // ─── Transform handles ───────────────────────────────────────────────

    pub fn begin_transform(&mut self) -> bool {
        self.editor.begin_transform()
    }

    pub fn update_transform(&mut self, x: f64, y: f64, scale_x: f64, scale_y: f64, rotation: f64) {
        self.editor.update_transform(TransformFrame {
            x,
            y,
            scale_x,
            scale_y,
            rotation,
        });
    }

    /// Commit the transform. Returns the committed id, or an empty string.
    pub fn end_transform(&mut self) -> String {
        self.editor
            .end_transform()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Render queries ──────────────────────────────────────────────────

    /// Elements in paint order, with in-flight drag/transform geometry.
    pub fn elements_json(&self) -> String {
        serde_json::to_string(&self.editor.render_elements()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn guides_json(&self) -> String {
        let guides: Vec<GuideView> = self.editor.guides().iter().map(GuideView::from).collect();
        serde_json::to_string(&guides).unwrap_or_else(|_| "[]".to_string())
    }

    /// Marquee band in world space, or `null`.
    pub fn marquee_json(&self) -> String {
        match self.editor.marquee_rect() {
            Some(r) => json!({ "x": r.x0, "y": r.y0, "width": r.width(), "height": r.height() }).to_string(),
            None => "null".to_string(),
        }
    }

    pub fn selection_json(&self) -> String {
        let ids: Vec<&str> = self.editor.selected_ids().iter().map(|id| id.as_str()).collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// `{"scale":…, "panX":…, "panY":…}` for the host's stage transform.
    pub fn viewport_json(&self) -> String {
        let vp = &self.editor.context().viewport;
        json!({ "scale": vp.scale, "panX": vp.pan.x, "panY": vp.pan.y }).to_string()
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn key_event(key: &str, modifiers: Modifiers, in_text_input: bool) -> KeyEvent {
    KeyEvent {
        in_text_input,
        ..KeyEvent::new(key, modifiers)
    }
}

/// `MouseEvent.button`: 0 main, 1 auxiliary (wheel), 2 secondary.
fn button_from_code(code: u8) -> PointerButton {
    match code {
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    }
}

fn ok() -> String {
    r#"{"ok":true}"#.to_string()
}

fn error_json(e: &LayoutError) -> String {
    log::warn!("rejected host payload: {e}");
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

/// Embed already-serialized JSON without re-encoding it as a string.
fn raw(json: &str) -> serde_json::Value {
    serde_json::from_str(json).unwrap_or(serde_json::Value::Null)
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Seatmap WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a layout payload. Returns `{"ok":true,"elements":n}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_layout(json: &str) -> String {
    match LayoutSnapshot::from_json(json) {
        Ok(snapshot) => json!({ "ok": true, "elements": snapshot.elements.len() }).to_string(),
        Err(e) => error_json(&e),
    }
}
