//! Resize/rotate finalization for a single selected element.
//!
//! The host's transform handles report a [`TransformFrame`] on every move:
//! the live top-left, scale factors relative to the committed size, and the
//! raw rotation. Nothing reaches the store until [`Transformer::end`], which
//! folds the scale into absolute width/height and snaps the rotation.

use crate::context::SceneContext;
use crate::guides::{GuideLine, Guides};
use crate::rotation::RotationSnapper;
use seatmap_core::geometry::rotated_center;
use seatmap_core::id::ElementId;
use seatmap_core::model::ElementPatch;
use seatmap_core::Point;

/// Live transform state as reported by the handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformFrame {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees, not normalized.
    pub rotation: f64,
}

impl TransformFrame {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformSession {
    pub id: ElementId,
    pub frame: TransformFrame,
    pub guides: Guides,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransformState {
    #[default]
    Idle,
    Active(TransformSession),
}

#[derive(Debug, Clone, Default)]
pub struct Transformer {
    state: TransformState,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TransformState::Active(_))
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Live frame for `id`, if it is the element being transformed.
    pub fn live_frame(&self, id: ElementId) -> Option<TransformFrame> {
        match &self.state {
            TransformState::Active(session) if session.id == id => Some(session.frame),
            _ => None,
        }
    }

    pub fn guides(&self) -> &[GuideLine] {
        match &self.state {
            TransformState::Active(session) => &session.guides,
            TransformState::Idle => &[],
        }
    }

    /// Start transforming the selected element. Only a selection of exactly
    /// one existing element qualifies.
    pub fn begin(&mut self, ctx: &SceneContext) -> bool {
        let [id] = ctx.selection.ids() else {
            log::debug!("transform: needs exactly one selected element, have {}", ctx.selection.len());
            return false;
        };
        let Some(el) = ctx.store.get(*id) else {
            log::warn!("transform: selected {id} is not in the store");
            return false;
        };
        log::debug!("transform: begin on {id}");
        self.state = TransformState::Active(TransformSession {
            id: *id,
            frame: TransformFrame {
                x: el.x,
                y: el.y,
                scale_x: 1.0,
                scale_y: 1.0,
                rotation: el.rotation,
            },
            guides: Guides::new(),
        });
        true
    }

    /// Track the handles and refresh the rotation guide. A no-op when idle.
    pub fn update(&mut self, ctx: &SceneContext, frame: TransformFrame, snapper: &RotationSnapper) {
        let TransformState::Active(session) = &mut self.state else {
            return;
        };
        session.frame = frame;
        let Some(el) = ctx.store.get(session.id) else {
            session.guides.clear();
            return;
        };
        let width = el.width * frame.scale_x.abs();
        let height = el.height * frame.scale_y.abs();
        let center = rotated_center(frame.origin(), width, height, frame.rotation);
        session.guides = snapper.compute(frame.rotation, center, width.max(height)).guides;
    }

    /// Commit the final geometry and go idle. Returns the committed id.
    pub fn end(&mut self, ctx: &mut SceneContext, snapper: &RotationSnapper) -> Option<ElementId> {
        let TransformState::Active(session) = std::mem::take(&mut self.state) else {
            log::warn!("transform: end without begin; ignoring");
            return None;
        };
        let TransformSession { id, frame, .. } = session;
        let Some(el) = ctx.store.get(id) else {
            log::warn!("transform: {id} vanished mid-gesture; nothing committed");
            return None;
        };
        let min = ctx.config.min_size;
        let mut width = (el.width * frame.scale_x.abs()).max(min);
        let mut height = (el.height * frame.scale_y.abs()).max(min);
        if el.is_circle() {
            let side = width.max(height);
            width = side;
            height = side;
        }
        let rotation = snapper.resolve(frame.rotation);
        let patch = ElementPatch {
            x: Some(frame.x),
            y: Some(frame.y),
            width: Some(width),
            height: Some(height),
            rotation: Some(rotation),
            ..ElementPatch::default()
        };
        ctx.store.update(id, &patch);
        log::debug!("transform: committed {id} {width}x{height} @ {rotation}deg");
        Some(id)
    }
}
