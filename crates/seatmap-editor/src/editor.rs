//! Gesture dispatcher.
//!
//! `Editor` owns the scene context and one state machine per gesture, and
//! routes normalized input events between them. At most one pointer gesture
//! runs at a time:
//!
//! | Pointer-down on | Result |
//! |-----------------|--------|
//! | element | press; first move turns it into a drag, an up without a move is a click |
//! | empty canvas | marquee |
//! | anything, middle button or Space held | pan |
//!
//! A pointer-down while another gesture (or a transform) is running is
//! ignored, and moves/ups with nothing running are no-ops.

use crate::clipboard::Clipboard;
use crate::context::SceneContext;
use crate::drag::DragCoordinator;
use crate::guides::GuideLine;
use crate::input::{InputEvent, KeyEvent, Modifiers, PointerButton};
use crate::marquee::MarqueeSelector;
use crate::rotation::RotationSnapper;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::snap::AlignmentSnapper;
use crate::transform::{TransformFrame, Transformer};
use seatmap_core::config::EditorConfig;
use seatmap_core::error::LayoutError;
use seatmap_core::geometry::rotated_center;
use seatmap_core::id::ElementId;
use seatmap_core::model::{ElementTemplate, LayoutElement};
use seatmap_core::snapshot::{LayoutBackend, LayoutSnapshot};
use seatmap_core::{Point, Rect, Size};
use std::collections::HashSet;

/// Pointer-down on an element, not yet resolved into click or drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    pub id: ElementId,
    pub origin: Point,
    pub modifiers: Modifiers,
}

/// Which pointer gesture currently owns the input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Pressed(Press),
    Dragging,
    Marquee,
    /// `last` is in screen space.
    Panning { last: Point },
}

pub struct Editor {
    ctx: SceneContext,
    gesture: Gesture,
    marquee: MarqueeSelector,
    drag: DragCoordinator,
    transformer: Transformer,
    clipboard: Clipboard,
    snapper: AlignmentSnapper,
    rotation_snapper: RotationSnapper,
    space_held: bool,
    last_pointer_world: Option<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Size::new(800.0, 600.0))
    }
}

impl Editor {
    pub fn new(config: EditorConfig, canvas: Size) -> Self {
        let snapper = AlignmentSnapper::new(config.snap_threshold_px);
        let rotation_snapper = RotationSnapper::from_config(&config);
        Self {
            ctx: SceneContext::new(config, canvas),
            gesture: Gesture::Idle,
            marquee: MarqueeSelector::new(),
            drag: DragCoordinator::new(),
            transformer: Transformer::new(),
            clipboard: Clipboard::new(),
            snapper,
            rotation_snapper,
            space_held: false,
            last_pointer_world: None,
        }
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        self.ctx.selection.ids()
    }

    pub fn resize(&mut self, canvas: Size) {
        self.ctx.viewport.resize(canvas);
    }

    /// Swap in new tuning. Scene, selection, clipboard, viewport position
    /// and any running gesture carry over; a zoom outside the new limits is
    /// pulled back in.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.snapper = AlignmentSnapper::new(config.snap_threshold_px);
        self.rotation_snapper = RotationSnapper::from_config(&config);
        self.ctx.viewport.set_limits(&config);
        self.ctx.store.set_min_size(config.min_size);
        log::debug!("config replaced: {config:?}");
        self.ctx.config = config;
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle an event, hit-testing pointer-downs against the store.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        let hit = match event {
            InputEvent::PointerDown { x, y, .. } => {
                let world = self.ctx.viewport.to_world(Point::new(*x, *y));
                self.ctx.store.hit_test(world)
            }
            _ => None,
        };
        self.handle(event, hit)
    }

    /// Handle an event with the host's own hit-test result for pointer-downs.
    /// Returns `true` when the scene needs a redraw.
    pub fn handle(&mut self, event: &InputEvent, hit: Option<ElementId>) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(Point::new(*x, *y), *button, *modifiers, hit),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { x, y, .. } => self.pointer_up(Point::new(*x, *y)),
            InputEvent::Wheel { x, y, delta_y } => {
                self.ctx.viewport.zoom_wheel(Point::new(*x, *y), *delta_y)
            }
            InputEvent::KeyDown(key) => self.key_down(key).is_some_and(|a| a != ShortcutAction::PanStart),
            InputEvent::KeyUp(key) => {
                self.key_up(key);
                false
            }
        }
    }

    fn pointer_down(
        &mut self,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
        hit: Option<ElementId>,
    ) -> bool {
        let world = self.ctx.viewport.to_world(screen);
        self.last_pointer_world = Some(world);
        if self.gesture != Gesture::Idle || self.transformer.is_active() {
            log::debug!("pointer-down ignored; {:?} in progress", self.gesture);
            return false;
        }
        if button == PointerButton::Middle || self.space_held {
            self.gesture = Gesture::Panning { last: screen };
            return false;
        }
        if button != PointerButton::Primary {
            return false;
        }
        match hit.filter(|id| self.ctx.store.contains(*id)) {
            Some(id) => {
                self.gesture = Gesture::Pressed(Press {
                    id,
                    origin: world,
                    modifiers,
                });
                false
            }
            None => {
                self.marquee.begin(&self.ctx, world, modifiers.additive());
                self.gesture = Gesture::Marquee;
                true
            }
        }
    }

    fn pointer_move(&mut self, screen: Point) -> bool {
        let world = self.ctx.viewport.to_world(screen);
        self.last_pointer_world = Some(world);
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Pressed(press) => {
                if !self.drag.begin(&mut self.ctx, press.id, press.origin) {
                    self.gesture = Gesture::Idle;
                    return false;
                }
                self.gesture = Gesture::Dragging;
                self.drag.update(&self.ctx, world, &self.snapper);
                true
            }
            Gesture::Dragging => {
                self.drag.update(&self.ctx, world, &self.snapper);
                true
            }
            Gesture::Marquee => {
                self.marquee.update(&mut self.ctx, world);
                true
            }
            Gesture::Panning { last } => {
                self.ctx.viewport.pan_by(screen - last);
                self.gesture = Gesture::Panning { last: screen };
                true
            }
        }
    }

    fn pointer_up(&mut self, screen: Point) -> bool {
        let world = self.ctx.viewport.to_world(screen);
        self.last_pointer_world = Some(world);
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Pressed(press) => {
                if self.ctx.store.contains(press.id) {
                    self.ctx.selection.toggle(press.id, press.modifiers.additive());
                }
                true
            }
            // Commits the geometry of the last move; the release point is not re-snapped.
            Gesture::Dragging => self.drag.end(&mut self.ctx).is_some(),
            Gesture::Marquee => self.marquee.end(&mut self.ctx, world),
            Gesture::Panning { .. } => false,
        }
    }

    /// Run the shortcut bound to a key press, if any, and report it.
    pub fn key_down(&mut self, key: &KeyEvent) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve_down(key)?;
        log::debug!("shortcut: {action:?}");
        match action {
            ShortcutAction::Copy => {
                self.copy();
            }
            ShortcutAction::Paste => {
                self.paste();
            }
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::ZoomIn => {
                self.ctx.viewport.zoom_in();
            }
            ShortcutAction::ZoomOut => {
                self.ctx.viewport.zoom_out();
            }
            ShortcutAction::PanStart => self.space_held = true,
            ShortcutAction::PanEnd => self.space_held = false,
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &KeyEvent) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve_up(key)?;
        if action == ShortcutAction::PanEnd {
            self.space_held = false;
        }
        Some(action)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Add a palette item centered in the visible canvas.
    ///
    /// # Errors
    /// Only fails if the generated id collides, which `fresh_id` rules out.
    pub fn add_from_palette(&mut self, template: &ElementTemplate) -> Result<LayoutElement, LayoutError> {
        let id = self.ctx.store.fresh_id(template.kind.id_prefix());
        let offset = rotated_center(Point::ZERO, template.width, template.height, template.rotation);
        let origin = self.ctx.viewport.center_world() - offset.to_vec2();
        self.ctx.add(template.instantiate(id, origin))?;
        log::debug!("palette: added {id}");
        // the store may have clamped the template's geometry
        self.ctx
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| LayoutError::Backend(format!("element {id} missing after add")))
    }

    /// Remove every selected element. Returns the ids actually removed.
    pub fn delete_selected(&mut self) -> Vec<ElementId> {
        let ids: HashSet<ElementId> = self.ctx.selection.ids().iter().copied().collect();
        let removed = self.ctx.remove(&ids);
        log::debug!("deleted {} element(s)", removed.len());
        removed
    }

    pub fn copy(&mut self) -> bool {
        self.clipboard.copy(&self.ctx)
    }

    /// Paste next to the last known pointer position, or the canvas center
    /// before the pointer has been seen.
    pub fn paste(&mut self) -> Option<ElementId> {
        let at = self
            .last_pointer_world
            .unwrap_or_else(|| self.ctx.viewport.center_world());
        self.clipboard.paste(&mut self.ctx, at)
    }

    pub fn begin_transform(&mut self) -> bool {
        if self.gesture != Gesture::Idle {
            log::debug!("transform refused; {:?} in progress", self.gesture);
            return false;
        }
        self.transformer.begin(&self.ctx)
    }

    pub fn update_transform(&mut self, frame: TransformFrame) {
        self.transformer.update(&self.ctx, frame, &self.rotation_snapper);
    }

    pub fn end_transform(&mut self) -> Option<ElementId> {
        self.transformer.end(&mut self.ctx, &self.rotation_snapper)
    }

    pub fn set_background(&mut self, background_ref: Option<String>) {
        self.ctx.background_ref = background_ref;
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the scene with `scene_id` from `backend`. A scene the backend
    /// does not know loads as empty. Any in-flight gesture is dropped.
    ///
    /// # Errors
    /// Propagates the backend's error; the current scene is then untouched.
    pub fn load_from(&mut self, backend: &dyn LayoutBackend, scene_id: &str) -> Result<(), LayoutError> {
        let snapshot = backend.load_layout(scene_id)?.unwrap_or_default();
        self.load_snapshot(&snapshot);
        Ok(())
    }

    pub fn load_snapshot(&mut self, snapshot: &LayoutSnapshot) {
        self.reset_gestures();
        self.ctx.load(snapshot);
        log::debug!("loaded {} element(s)", self.ctx.store.len());
    }

    /// Save the scene and adopt the backend's reconciled element list.
    ///
    /// # Errors
    /// Propagates the backend's error; no retry is attempted.
    pub fn save_to(&mut self, backend: &mut dyn LayoutBackend, scene_id: &str) -> Result<(), LayoutError> {
        let saved = backend.save_layout(scene_id, &self.ctx.snapshot())?;
        self.ctx.apply_saved(saved);
        log::debug!("saved scene {scene_id}");
        Ok(())
    }

    fn reset_gestures(&mut self) {
        self.gesture = Gesture::Idle;
        self.marquee = MarqueeSelector::new();
        self.drag = DragCoordinator::new();
        self.transformer = Transformer::new();
    }

    // ─── Render queries ──────────────────────────────────────────────────

    /// Elements in paint order with in-flight drag/transform geometry applied.
    pub fn render_elements(&self) -> Vec<LayoutElement> {
        self.ctx
            .store
            .iter()
            .map(|el| {
                let mut el = el.clone();
                if let Some(live) = self.drag.live_position(el.id) {
                    el.x = live.x;
                    el.y = live.y;
                }
                if let Some(frame) = self.transformer.live_frame(el.id) {
                    el.x = frame.x;
                    el.y = frame.y;
                    el.width *= frame.scale_x.abs();
                    el.height *= frame.scale_y.abs();
                    el.rotation = frame.rotation;
                }
                el
            })
            .collect()
    }

    pub fn guides(&self) -> Vec<GuideLine> {
        self.drag
            .guides()
            .iter()
            .chain(self.transformer.guides())
            .copied()
            .collect()
    }

    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee.rect()
    }
}
