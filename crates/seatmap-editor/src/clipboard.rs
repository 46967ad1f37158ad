//! Single-slot element clipboard.

use crate::context::SceneContext;
use seatmap_core::id::ElementId;
use seatmap_core::model::ElementTemplate;
use seatmap_core::Point;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    entry: Option<ElementTemplate>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> Option<&ElementTemplate> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Capture the most recently selected element that still exists,
    /// overwriting any previous entry. Returns `false` if there was nothing
    /// to copy; the clipboard is then left as it was.
    pub fn copy(&mut self, ctx: &SceneContext) -> bool {
        let source = ctx
            .selection
            .ids()
            .iter()
            .rev()
            .find_map(|id| ctx.store.get(*id));
        let Some(el) = source else {
            return false;
        };
        log::debug!("clipboard: copied {}", el.id);
        self.entry = Some(el.template());
        true
    }

    /// Instantiate the entry at `pointer_world` plus the configured offset
    /// and make it the only selected element.
    pub fn paste(&self, ctx: &mut SceneContext, pointer_world: Point) -> Option<ElementId> {
        let template = self.entry.as_ref()?;
        let id = ctx.store.fresh_id(template.kind.id_prefix());
        let origin = pointer_world + ctx.config.paste_offset.to_vec2();
        match ctx.add(template.instantiate(id, origin)) {
            Ok(id) => {
                ctx.selection.select_one(id);
                log::debug!("clipboard: pasted {id} at {origin:?}");
                Some(id)
            }
            Err(err) => {
                log::warn!("clipboard: paste failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use seatmap_core::model::{ElementKind, LayoutElement, TableShape};

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    fn scene() -> SceneContext {
        let mut ctx = SceneContext::default();
        let mut table = LayoutElement::new(
            id("cb_table"),
            ElementKind::Table {
                shape: TableShape::Rectangle,
                seat_count: Some(6),
            },
            0.0,
            0.0,
            120.0,
            60.0,
        );
        table.rotation = 90.0;
        table.label = Some("T1".into());
        ctx.add(table).unwrap();
        ctx.add(LayoutElement::new(id("cb_decor"), ElementKind::Decor, 300.0, 0.0, 20.0, 20.0))
            .unwrap();
        ctx
    }

    #[test]
    fn copy_takes_last_selected() {
        let mut ctx = scene();
        ctx.selection.set_all([id("cb_decor"), id("cb_table")]);
        let mut clip = Clipboard::new();
        assert!(clip.copy(&ctx));
        assert_eq!(clip.entry().unwrap().width, 120.0);
    }

    #[test]
    fn copy_with_empty_selection_keeps_entry() {
        let mut ctx = scene();
        ctx.selection.select_one(id("cb_decor"));
        let mut clip = Clipboard::new();
        clip.copy(&ctx);
        let before = clip.clone();
        ctx.selection.clear();
        assert!(!clip.copy(&ctx));
        assert_eq!(clip, before);
    }

    #[test]
    fn copy_skips_dangling_ids() {
        let mut ctx = scene();
        ctx.selection.set_all([id("cb_table"), id("cb_gone")]);
        let mut clip = Clipboard::new();
        assert!(clip.copy(&ctx));
        assert_eq!(clip.entry().unwrap().label.as_deref(), Some("T1"));
    }

    #[test]
    fn paste_places_fresh_copy_at_offset() {
        let mut ctx = scene();
        ctx.selection.select_one(id("cb_table"));
        let mut clip = Clipboard::new();
        clip.copy(&ctx);

        let pointer = Point::new(500.0, 400.0);
        let new_id = clip.paste(&mut ctx, pointer).unwrap();
        assert_ne!(new_id, id("cb_table"));
        assert!(new_id.as_str().starts_with("table_"));
        assert_eq!(ctx.selection.ids(), &[new_id]);

        let pasted = ctx.store.get(new_id).unwrap();
        assert_eq!(pasted.origin(), Point::new(510.0, 410.0));
        assert_ne!(pasted.origin(), pointer);
        let original = ctx.store.get(id("cb_table")).unwrap();
        assert_eq!(pasted.template(), original.template());
        assert_eq!(ctx.store.len(), 3);
    }

    #[test]
    fn paste_twice_gives_distinct_ids() {
        let mut ctx = scene();
        ctx.selection.select_one(id("cb_decor"));
        let mut clip = Clipboard::new();
        clip.copy(&ctx);
        let a = clip.paste(&mut ctx, Point::ZERO).unwrap();
        let b = clip.paste(&mut ctx, Point::ZERO).unwrap();
        assert_ne!(a, b);
        assert_eq!(ctx.selection.ids(), &[b]);
    }

    #[test]
    fn paste_with_empty_clipboard_is_noop() {
        let mut ctx = scene();
        ctx.selection.select_one(id("cb_decor"));
        let clip = Clipboard::new();
        assert_eq!(clip.paste(&mut ctx, Point::ZERO), None);
        assert_eq!(ctx.store.len(), 2);
        assert_eq!(ctx.selection.ids(), &[id("cb_decor")]);
    }
}
