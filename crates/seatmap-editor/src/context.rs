//! Scene context: everything a gesture handler may read or mutate.
//!
//! Handlers receive the context explicitly; nothing is looked up through
//! global state.

use crate::selection::Selection;
use seatmap_core::config::EditorConfig;
use seatmap_core::error::LayoutError;
use seatmap_core::id::ElementId;
use seatmap_core::model::LayoutElement;
use seatmap_core::snapshot::LayoutSnapshot;
use seatmap_core::store::ElementStore;
use seatmap_core::viewport::Viewport;
use seatmap_core::Size;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SceneContext {
    pub store: ElementStore,
    pub viewport: Viewport,
    pub selection: Selection,
    pub config: EditorConfig,
    /// Opaque background image reference, saved alongside the elements.
    pub background_ref: Option<String>,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Size::new(800.0, 600.0))
    }
}

impl SceneContext {
    pub fn new(config: EditorConfig, canvas: Size) -> Self {
        Self {
            store: ElementStore::new(config.min_size),
            viewport: Viewport::new(canvas, &config),
            selection: Selection::new(),
            config,
            background_ref: None,
        }
    }

    /// Add an element to the store.
    ///
    /// # Errors
    /// Returns [`LayoutError::DuplicateId`] if the id is taken.
    pub fn add(&mut self, element: LayoutElement) -> Result<ElementId, LayoutError> {
        let id = element.id;
        self.store.add(element)?;
        Ok(id)
    }

    /// Remove elements and drop them from the selection.
    pub fn remove(&mut self, ids: &HashSet<ElementId>) -> Vec<ElementId> {
        let removed = self.store.remove(ids);
        self.selection.prune(&removed);
        removed
    }

    /// Replace the scene with a loaded layout. Selection is cleared.
    pub fn load(&mut self, snapshot: &LayoutSnapshot) {
        self.store.load(snapshot);
        self.background_ref = snapshot.background_ref.clone();
        self.selection.clear();
    }

    /// Adopt the element list returned by a save, keeping whatever part of
    /// the selection survived id reconciliation.
    pub fn apply_saved(&mut self, saved: LayoutSnapshot) {
        self.store.replace_all(saved.elements);
        self.selection.retain_existing(&self.store);
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        self.store.snapshot(self.background_ref.clone())
    }
}
