//! Marquee (rubber-band) selection.
//!
//! Starts on pointer-down over empty canvas and live-updates the selection on
//! every move. Without a modifier the selection becomes exactly the elements
//! under the band; with one, the band only ever adds to the selection that
//! existed when the gesture began.

use crate::context::SceneContext;
use seatmap_core::geometry::rect_between;
use seatmap_core::id::ElementId;
use seatmap_core::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeSession {
    /// World point under the pointer at pointer-down.
    pub start: Point,
    pub current: Point,
    pub initial_selection: Vec<ElementId>,
    pub additive: bool,
}

impl MarqueeSession {
    pub fn rect(&self) -> Rect {
        rect_between(self.start, self.current)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MarqueeState {
    #[default]
    Idle,
    Active(MarqueeSession),
}

#[derive(Debug, Clone, Default)]
pub struct MarqueeSelector {
    state: MarqueeState,
}

impl MarqueeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, MarqueeState::Active(_))
    }

    pub fn state(&self) -> &MarqueeState {
        &self.state
    }

    /// Current band in world space, for rendering.
    pub fn rect(&self) -> Option<Rect> {
        match &self.state {
            MarqueeState::Active(session) => Some(session.rect()),
            MarqueeState::Idle => None,
        }
    }

    pub fn begin(&mut self, ctx: &SceneContext, start_world: Point, additive: bool) {
        log::debug!("marquee: begin at {start_world:?} additive={additive}");
        self.state = MarqueeState::Active(MarqueeSession {
            start: start_world,
            current: start_world,
            initial_selection: ctx.selection.ids().to_vec(),
            additive,
        });
    }

    /// Stretch the band to `world` and recompute the selection.
    /// A no-op when idle.
    pub fn update(&mut self, ctx: &mut SceneContext, world: Point) {
        let MarqueeState::Active(session) = &mut self.state else {
            return;
        };
        session.current = world;
        let hits = ctx.store.ids_intersecting(session.rect());
        if session.additive {
            // elements can be deleted while the band is held
            session.initial_selection.retain(|id| ctx.store.contains(*id));
            let combined = session.initial_selection.iter().copied().chain(hits);
            ctx.selection.set_all(combined);
        } else {
            ctx.selection.set_all(hits);
        }
    }

    /// Apply the band at the release point and go idle.
    /// Returns `false` if no marquee was running.
    pub fn end(&mut self, ctx: &mut SceneContext, world: Point) -> bool {
        if !self.is_active() {
            log::warn!("marquee: end without begin; ignoring");
            return false;
        }
        self.update(ctx, world);
        self.state = MarqueeState::Idle;
        log::debug!("marquee: end with {} selected", ctx.selection.len());
        true
    }
}
