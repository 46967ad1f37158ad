//! The selection set.
//!
//! Ordered by insertion so "the last selected element" is well defined.

use seatmap_core::id::ElementId;
use seatmap_core::store::ElementStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Most recently added id.
    pub fn last(&self) -> Option<ElementId> {
        self.ids.last().copied()
    }

    /// Replace the selection with `{id}`, unless `id` already is the whole
    /// selection.
    pub fn select_one(&mut self, id: ElementId) {
        if self.ids.len() == 1 && self.ids[0] == id {
            return;
        }
        self.ids.clear();
        self.ids.push(id);
    }

    /// Click semantics: with `additive` flip membership of `id`, otherwise
    /// behave like [`Selection::select_one`].
    pub fn toggle(&mut self, id: ElementId, additive: bool) {
        if !additive {
            self.select_one(id);
            return;
        }
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn add(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace wholesale, dropping repeats while keeping first occurrence.
    pub fn set_all<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    /// Forget the given ids.
    pub fn prune(&mut self, removed: &[ElementId]) {
        self.ids.retain(|id| !removed.contains(id));
    }

    /// Forget every id the store no longer holds.
    pub fn retain_existing(&mut self, store: &ElementStore) {
        self.ids.retain(|id| store.contains(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    #[test]
    fn select_one_replaces() {
        let mut sel = Selection::new();
        sel.set_all([id("a"), id("b")]);
        sel.select_one(id("c"));
        assert_eq!(sel.ids(), &[id("c")]);
    }

    #[test]
    fn select_one_is_idempotent() {
        let mut sel = Selection::new();
        sel.select_one(id("a"));
        let before = sel.clone();
        sel.select_one(id("a"));
        assert_eq!(sel, before);
    }

    #[test]
    fn select_one_on_member_of_many_narrows() {
        let mut sel = Selection::new();
        sel.set_all([id("a"), id("b")]);
        sel.select_one(id("a"));
        assert_eq!(sel.ids(), &[id("a")]);
    }

    #[test]
    fn additive_toggle_flips_membership() {
        let mut sel = Selection::new();
        sel.toggle(id("a"), false);
        sel.toggle(id("b"), true);
        assert_eq!(sel.ids(), &[id("a"), id("b")]);
        sel.toggle(id("a"), true);
        assert_eq!(sel.ids(), &[id("b")]);
    }

    #[test]
    fn set_all_dedups() {
        let mut sel = Selection::new();
        sel.set_all([id("a"), id("b"), id("a")]);
        assert_eq!(sel.ids(), &[id("a"), id("b")]);
        assert_eq!(sel.last(), Some(id("b")));
    }

    #[test]
    fn prune_removes_deleted() {
        let mut sel = Selection::new();
        sel.set_all([id("a"), id("b"), id("c")]);
        sel.prune(&[id("b")]);
        assert_eq!(sel.ids(), &[id("a"), id("c")]);
    }
}
