//! The element store: single source of truth for placed elements.
//!
//! Elements live in a `StableDiGraph` arena so their handles stay valid
//! across removals. An `id → handle` index makes every lookup a map hit, and
//! an explicit paint order keeps z-order independent of arena slot reuse.
//! Every mutation is applied synchronously.

use crate::error::LayoutError;
use crate::geometry::rects_overlap;
use crate::id::ElementId;
use crate::model::{ElementPatch, LayoutElement};
use crate::snapshot::LayoutSnapshot;
use kurbo::{Point, Rect};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::{HashMap, HashSet};

/// Stable handle into the store's arena.
pub type ElementHandle = NodeIndex;

#[derive(Debug, Clone)]
pub struct ElementStore {
    /// Edgeless: only node slots are used. `StableDiGraph` keeps every
    /// `NodeIndex` valid across removals, which `id_index` and `order` rely on.
    arena: StableDiGraph<LayoutElement, ()>,
    id_index: HashMap<ElementId, ElementHandle>,
    /// Paint order, back to front.
    order: Vec<ElementHandle>,
    min_size: f64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new(crate::config::MIN_SIZE)
    }
}

impl ElementStore {
    pub fn new(min_size: f64) -> Self {
        Self {
            arena: StableDiGraph::new(),
            id_index: HashMap::new(),
            order: Vec::new(),
            min_size,
        }
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Change the floor applied to later adds and updates. Elements already
    /// stored keep their geometry.
    pub fn set_min_size(&mut self, min_size: f64) {
        self.min_size = min_size;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn handle_of(&self, id: ElementId) -> Option<ElementHandle> {
        self.id_index.get(&id).copied()
    }

    pub fn get(&self, id: ElementId) -> Option<&LayoutElement> {
        self.id_index.get(&id).and_then(|h| self.arena.node_weight(*h))
    }

    /// All elements in paint order (back to front).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LayoutElement> + '_ {
        self.order.iter().filter_map(|h| self.arena.node_weight(*h))
    }

    /// Cloned list of every element in paint order.
    pub fn get_all(&self) -> Vec<LayoutElement> {
        self.iter().cloned().collect()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().map(|e| e.id).collect()
    }

    /// Insert a new element on top of the paint order.
    ///
    /// The element is sanitized first.
    ///
    /// # Errors
    /// Returns [`LayoutError::DuplicateId`] if the id is already present.
    pub fn add(&mut self, mut element: LayoutElement) -> Result<ElementHandle, LayoutError> {
        if self.contains(element.id) {
            return Err(LayoutError::DuplicateId(element.id));
        }
        element.sanitize(self.min_size);
        let id = element.id;
        let handle = self.arena.add_node(element);
        self.id_index.insert(id, handle);
        self.order.push(handle);
        Ok(handle)
    }

    /// Apply a partial update, then re-sanitize. Unknown ids are a no-op
    /// and return `false`.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let min_size = self.min_size;
        let Some(element) = self.get_mut(id) else {
            log::debug!("update skipped: {id} is not in the store");
            return false;
        };
        element.apply(patch);
        element.sanitize(min_size);
        true
    }

    /// Remove every listed id that exists. Returns the ids actually removed.
    pub fn remove(&mut self, ids: &HashSet<ElementId>) -> Vec<ElementId> {
        let mut removed = Vec::new();
        for id in ids {
            if let Some(handle) = self.id_index.remove(id) {
                self.arena.remove_node(handle);
                removed.push(*id);
            }
        }
        if !removed.is_empty() {
            let arena = &self.arena;
            self.order.retain(|h| arena.contains_node(*h));
        }
        removed
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.id_index.clear();
        self.order.clear();
    }

    /// An id with the given prefix that no element currently uses.
    pub fn fresh_id(&self, prefix: &str) -> ElementId {
        loop {
            let id = ElementId::generate(prefix);
            if !self.contains(id) {
                return id;
            }
        }
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(LayoutElement::bounds)
    }

    /// Topmost element whose shape contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.iter().rev().find(|e| e.contains(point)).map(|e| e.id)
    }

    /// Every element whose world bounds overlap `rect` (inclusive), in paint order.
    pub fn ids_intersecting(&self, rect: Rect) -> Vec<ElementId> {
        self.iter()
            .filter(|e| rects_overlap(e.bounds(), rect))
            .map(|e| e.id)
            .collect()
    }

    // ─── Load / save boundary ────────────────────────────────────────────

    /// Replace the contents with `elements`, repairing what can be repaired.
    ///
    /// Bad geometry is clamped rather than rejected. A repeated id keeps the
    /// first element and gives later ones a fresh id.
    pub fn replace_all(&mut self, elements: Vec<LayoutElement>) {
        self.clear();
        for mut element in elements {
            if element.sanitize(self.min_size) {
                log::warn!("element {} had invalid geometry; clamped", element.id);
            }
            if self.contains(element.id) {
                let fresh = self.fresh_id(element.kind.id_prefix());
                log::warn!("duplicate element id {}; reassigned to {fresh}", element.id);
                element.id = fresh;
            }
            let id = element.id;
            let handle = self.arena.add_node(element);
            self.id_index.insert(id, handle);
            self.order.push(handle);
        }
    }

    /// Load a snapshot's elements. The background reference is the caller's.
    pub fn load(&mut self, snapshot: &LayoutSnapshot) {
        self.replace_all(snapshot.elements.clone());
    }

    pub fn snapshot(&self, background_ref: Option<String>) -> LayoutSnapshot {
        LayoutSnapshot {
            elements: self.get_all(),
            background_ref,
        }
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut LayoutElement> {
        let handle = self.id_index.get(&id).copied()?;
        self.arena.node_weight_mut(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, TableShape};
    use pretty_assertions::assert_eq;

    fn decor(id: &str, x: f64, y: f64, w: f64, h: f64) -> LayoutElement {
        LayoutElement::new(ElementId::intern(id), ElementKind::Decor, x, y, w, h)
    }

    #[test]
    fn add_get_update() {
        let mut store = ElementStore::default();
        store.add(decor("s1", 0.0, 0.0, 20.0, 20.0)).unwrap();
        assert!(store.update(
            ElementId::intern("s1"),
            &ElementPatch::position(Point::new(5.0, 6.0))
        ));
        let el = store.get(ElementId::intern("s1")).unwrap();
        assert_eq!((el.x, el.y), (5.0, 6.0));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = ElementStore::default();
        store.add(decor("s2", 0.0, 0.0, 20.0, 20.0)).unwrap();
        let err = store.add(decor("s2", 1.0, 1.0, 20.0, 20.0)).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_unknown_is_noop() {
        let mut store = ElementStore::default();
        assert!(!store.update(ElementId::intern("ghost"), &ElementPatch::default()));
    }

    #[test]
    fn update_resanitizes() {
        let mut store = ElementStore::default();
        store.add(decor("s3", 0.0, 0.0, 20.0, 20.0)).unwrap();
        store.update(
            ElementId::intern("s3"),
            &ElementPatch {
                width: Some(1.0),
                rotation: Some(725.0),
                ..ElementPatch::default()
            },
        );
        let el = store.get(ElementId::intern("s3")).unwrap();
        assert_eq!(el.width, 5.0);
        assert_eq!(el.rotation, 5.0);
    }

    #[test]
    fn remove_keeps_order_of_survivors() {
        let mut store = ElementStore::default();
        for id in ["o1", "o2", "o3", "o4"] {
            store.add(decor(id, 0.0, 0.0, 10.0, 10.0)).unwrap();
        }
        let removed = store.remove(&HashSet::from([ElementId::intern("o2"), ElementId::intern("nope")]));
        assert_eq!(removed, vec![ElementId::intern("o2")]);
        // arena slot reuse must not disturb paint order
        store.add(decor("o5", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let ids: Vec<_> = store.ids().iter().map(|id| id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["o1", "o3", "o4", "o5"]);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut store = ElementStore::default();
        store.add(decor("h1", 0.0, 0.0, 100.0, 100.0)).unwrap();
        store.add(decor("h2", 50.0, 50.0, 100.0, 100.0)).unwrap();
        assert_eq!(store.hit_test(Point::new(75.0, 75.0)), Some(ElementId::intern("h2")));
        assert_eq!(store.hit_test(Point::new(10.0, 10.0)), Some(ElementId::intern("h1")));
        assert_eq!(store.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn hit_test_round_table_corner_misses() {
        let mut store = ElementStore::default();
        store
            .add(LayoutElement::new(
                ElementId::intern("h3"),
                ElementKind::Table {
                    shape: TableShape::Circle,
                    seat_count: None,
                },
                0.0,
                0.0,
                50.0,
                50.0,
            ))
            .unwrap();
        assert_eq!(store.hit_test(Point::new(2.0, 2.0)), None);
        assert_eq!(store.hit_test(Point::new(25.0, 25.0)), Some(ElementId::intern("h3")));
    }

    #[test]
    fn replace_all_repairs_input() {
        let mut store = ElementStore::default();
        store.replace_all(vec![
            decor("r1", 0.0, 0.0, 0.0, -10.0),
            decor("r1", 10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(store.len(), 2);
        let first = store.get(ElementId::intern("r1")).unwrap();
        assert_eq!((first.width, first.height), (5.0, 5.0));
        let ids = store.ids();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn fresh_id_avoids_loaded_ids() {
        let mut store = ElementStore::default();
        store.add(decor("table_0", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let id = store.fresh_id("table");
        assert!(!store.contains(id));
    }
}
