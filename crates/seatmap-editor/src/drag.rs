//! Multi-element drag.
//!
//! On begin, the start position of every selected element is captured. While
//! the pointer moves, every dragged element follows the raw world delta and
//! only the active element (the one under the pointer at press time) is
//! pulled onto alignment guides of every other element.
//! On end, every live position is committed to the store in one pass.

use crate::context::SceneContext;
use crate::guides::Guides;
use crate::snap::AlignmentSnapper;
use seatmap_core::id::ElementId;
use seatmap_core::model::ElementPatch;
use seatmap_core::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEntry {
    pub id: ElementId,
    pub start: Point,
    pub live: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active: ElementId,
    /// World pointer position at begin.
    pub origin: Point,
    /// Selection order; the active element is always present.
    pub entries: Vec<DragEntry>,
    pub guides: Guides,
}

impl DragSession {
    fn entry(&self, id: ElementId) -> Option<&DragEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Active(DragSession),
}

/// What a finished drag did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    pub committed: Vec<ElementId>,
    pub deselected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// In-flight top-left of `id`, if it is part of the current drag.
    pub fn live_position(&self, id: ElementId) -> Option<Point> {
        match &self.state {
            DragState::Active(session) => session.entry(id).map(|e| e.live),
            DragState::Idle => None,
        }
    }

    pub fn guides(&self) -> &[crate::guides::GuideLine] {
        match &self.state {
            DragState::Active(session) => &session.guides,
            DragState::Idle => &[],
        }
    }

    /// Start dragging `active`. An unselected element joins the selection.
    /// Returns `false` (and stays idle) if `active` is not in the store.
    pub fn begin(&mut self, ctx: &mut SceneContext, active: ElementId, origin: Point) -> bool {
        if !ctx.store.contains(active) {
            log::warn!("drag: {active} is not in the store; not starting");
            return false;
        }
        ctx.selection.add(active);
        let entries: Vec<DragEntry> = ctx
            .selection
            .ids()
            .iter()
            .filter_map(|id| ctx.store.get(*id))
            .map(|el| DragEntry {
                id: el.id,
                start: el.origin(),
                live: el.origin(),
            })
            .collect();
        log::debug!("drag: begin on {active} with {} element(s)", entries.len());
        self.state = DragState::Active(DragSession {
            active,
            origin,
            entries,
            guides: Guides::new(),
        });
        true
    }

    /// Move to the pointer at `world`. A no-op when idle.
    pub fn update(&mut self, ctx: &SceneContext, world: Point, snapper: &AlignmentSnapper) {
        let DragState::Active(session) = &mut self.state else {
            return;
        };
        let delta: Vec2 = world - session.origin;
        for entry in &mut session.entries {
            entry.live = entry.start + delta;
        }

        let Some(active_el) = ctx.store.get(session.active) else {
            session.guides.clear();
            return;
        };
        let Some(active_live) = session.entry(session.active).map(|e| e.live) else {
            session.guides.clear();
            return;
        };

        // Followers are candidates at their live positions.
        let active_id = session.active;
        let entries = &session.entries;
        let candidates = ctx.store.iter().filter(|el| el.id != active_id).map(|el| {
            let origin = entries
                .iter()
                .find(|e| e.id == el.id)
                .map_or(el.origin(), |e| e.live);
            el.bounds_at(origin)
        });
        let result = snapper.compute(active_el.bounds_at(active_live), candidates, ctx.viewport.scale);

        let correction = Vec2::new(
            result.correction.dx.unwrap_or(0.0),
            result.correction.dy.unwrap_or(0.0),
        );
        if let Some(entry) = session.entries.iter_mut().find(|e| e.id == active_id) {
            entry.live = active_live + correction;
        }
        session.guides = result.guides;
    }

    /// Commit every live position and go idle.
    ///
    /// A drag that moved exactly one element clears the selection afterwards,
    /// unless the selection changed to something else mid-drag.
    /// Returns `None` if no drag was running.
    pub fn end(&mut self, ctx: &mut SceneContext) -> Option<DragOutcome> {
        let DragState::Active(session) = std::mem::take(&mut self.state) else {
            log::warn!("drag: end without begin; ignoring");
            return None;
        };
        let mut committed = Vec::with_capacity(session.entries.len());
        for entry in &session.entries {
            if ctx.store.update(entry.id, &ElementPatch::position(entry.live)) {
                committed.push(entry.id);
            } else {
                log::debug!("drag: {} vanished mid-drag; skipped", entry.id);
            }
        }
        // only undo the drag's own selection; anything picked meanwhile stays
        let deselected = session.entries.len() == 1 && ctx.selection.ids() == [session.active];
        if deselected {
            ctx.selection.clear();
        }
        log::debug!("drag: committed {} element(s)", committed.len());
        Some(DragOutcome {
            committed,
            deselected,
        })
    }
}
