//! Integration tests: gesture state machine and keyboard handling.
//!
//! Covers click vs. drag resolution, gesture exclusivity, panning, wheel zoom
//! and shortcuts, including the ordering edge cases a real pointer stream
//! produces.

use pretty_assertions::assert_eq;
use seatmap_core::{ElementId, ElementKind, LayoutElement, Point, Vec2};
use seatmap_editor::{
    Editor, Gesture, InputEvent, KeyEvent, Modifiers, PointerButton, ShortcutAction,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn id(s: &str) -> ElementId {
    ElementId::intern(s)
}

fn editor_with(elements: &[(&str, f64, f64)]) -> Editor {
    init_logging();
    let mut editor = Editor::default();
    for (name, x, y) in elements {
        editor
            .context_mut()
            .add(LayoutElement::new(id(name), ElementKind::Decor, *x, *y, 40.0, 40.0))
            .unwrap();
    }
    editor
}

fn click(editor: &mut Editor, x: f64, y: f64, modifiers: Modifiers) {
    editor.dispatch(&InputEvent::pointer_down(x, y, modifiers));
    editor.dispatch(&InputEvent::PointerUp { x, y, modifiers });
}

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    }
}

// ─── Click ───────────────────────────────────────────────────────────────

#[test]
fn click_and_shift_click_toggle_membership() {
    let mut editor = editor_with(&[("gc_a", 0.0, 0.0), ("gc_b", 100.0, 0.0)]);
    click(&mut editor, 10.0, 10.0, Modifiers::NONE);
    assert_eq!(editor.selected_ids(), &[id("gc_a")]);

    click(&mut editor, 110.0, 10.0, Modifiers::SHIFT);
    assert_eq!(editor.selected_ids(), &[id("gc_a"), id("gc_b")]);

    click(&mut editor, 10.0, 10.0, Modifiers::SHIFT);
    assert_eq!(editor.selected_ids(), &[id("gc_b")]);

    // ctrl counts as additive too
    click(&mut editor, 10.0, 10.0, ctrl());
    assert_eq!(editor.selected_ids(), &[id("gc_b"), id("gc_a")]);

    // a plain click narrows back to one
    click(&mut editor, 110.0, 10.0, Modifiers::NONE);
    assert_eq!(editor.selected_ids(), &[id("gc_b")]);
}

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut editor = editor_with(&[("ge_a", 0.0, 0.0)]);
    editor.context_mut().selection.select_one(id("ge_a"));
    click(&mut editor, 500.0, 500.0, Modifiers::NONE);
    assert!(editor.selected_ids().is_empty());
}

#[test]
fn element_deleted_before_release_is_not_selected() {
    let mut editor = editor_with(&[("gd_a", 0.0, 0.0)]);
    editor.dispatch(&InputEvent::pointer_down(10.0, 10.0, Modifiers::NONE));
    editor.context_mut().remove(&[id("gd_a")].into_iter().collect());
    assert!(editor.dispatch(&InputEvent::pointer_up(10.0, 10.0)));
    assert!(editor.selected_ids().is_empty());
    assert_eq!(editor.gesture(), Gesture::Idle);
}

// ─── Exclusivity and ordering ────────────────────────────────────────────

#[test]
fn pointer_down_during_marquee_is_ignored() {
    let mut editor = editor_with(&[("gx_a", 200.0, 200.0)]);
    editor.dispatch(&InputEvent::pointer_down(0.0, 0.0, Modifiers::NONE));
    assert_eq!(editor.gesture(), Gesture::Marquee);
    assert!(!editor.dispatch(&InputEvent::pointer_down(210.0, 210.0, Modifiers::NONE)));
    assert_eq!(editor.gesture(), Gesture::Marquee);
    editor.dispatch(&InputEvent::pointer_up(50.0, 50.0));
    assert_eq!(editor.gesture(), Gesture::Idle);
    assert!(editor.selected_ids().is_empty());
}

#[test]
fn delete_during_additive_marquee_keeps_selection_live() {
    let mut editor = editor_with(&[("gz_a", 0.0, 0.0), ("gz_b", 300.0, 300.0)]);
    editor.context_mut().selection.select_one(id("gz_a"));
    editor.dispatch(&InputEvent::pointer_down(500.0, 500.0, Modifiers::SHIFT));
    assert_eq!(editor.gesture(), Gesture::Marquee);

    editor.dispatch(&InputEvent::KeyDown(KeyEvent::new("Delete", Modifiers::NONE)));
    assert!(!editor.context().store.contains(id("gz_a")));

    editor.dispatch(&InputEvent::pointer_move(510.0, 510.0));
    assert!(editor.selected_ids().is_empty());

    editor.dispatch(&InputEvent::pointer_move(250.0, 250.0));
    assert_eq!(editor.selected_ids(), &[id("gz_b")]);
    editor.dispatch(&InputEvent::pointer_up(250.0, 250.0));
    assert_eq!(editor.selected_ids(), &[id("gz_b")]);
}

#[test]
fn move_and_up_without_gesture_are_noops() {
    let mut editor = editor_with(&[("gn_a", 0.0, 0.0)]);
    assert!(!editor.dispatch(&InputEvent::pointer_move(10.0, 10.0)));
    assert!(!editor.dispatch(&InputEvent::pointer_up(10.0, 10.0)));
    assert!(editor.selected_ids().is_empty());
}

#[test]
fn move_after_up_does_not_drag() {
    let mut editor = editor_with(&[("gm_a", 0.0, 0.0)]);
    editor.dispatch(&InputEvent::pointer_down(10.0, 10.0, Modifiers::NONE));
    editor.dispatch(&InputEvent::pointer_move(60.0, 10.0));
    editor.dispatch(&InputEvent::pointer_up(60.0, 10.0));
    let committed = editor.context().store.get(id("gm_a")).unwrap().origin();
    assert_eq!(committed, Point::new(50.0, 0.0));

    assert!(!editor.dispatch(&InputEvent::pointer_move(400.0, 400.0)));
    assert_eq!(editor.context().store.get(id("gm_a")).unwrap().origin(), committed);
    assert_eq!(editor.render_elements()[0].origin(), committed);
}

#[test]
fn secondary_button_does_nothing() {
    let mut editor = editor_with(&[("gs_a", 0.0, 0.0)]);
    let down = InputEvent::PointerDown {
        x: 10.0,
        y: 10.0,
        button: PointerButton::Secondary,
        modifiers: Modifiers::NONE,
    };
    assert!(!editor.dispatch(&down));
    assert_eq!(editor.gesture(), Gesture::Idle);
}

// ─── Pan and zoom ────────────────────────────────────────────────────────

#[test]
fn middle_button_pans_the_viewport() {
    let mut editor = editor_with(&[("gp_a", 0.0, 0.0)]);
    let down = InputEvent::PointerDown {
        x: 10.0,
        y: 10.0,
        button: PointerButton::Middle,
        modifiers: Modifiers::NONE,
    };
    editor.dispatch(&down);
    editor.dispatch(&InputEvent::pointer_move(40.0, 30.0));
    editor.dispatch(&InputEvent::pointer_move(50.0, 50.0));
    editor.dispatch(&InputEvent::pointer_up(50.0, 50.0));

    assert_eq!(editor.context().viewport.pan, Vec2::new(40.0, 40.0));
    // the element under the press neither moved nor got selected
    assert_eq!(editor.context().store.get(id("gp_a")).unwrap().origin(), Point::ZERO);
    assert!(editor.selected_ids().is_empty());
}

#[test]
fn space_held_turns_press_into_pan() {
    let mut editor = editor_with(&[("gq_a", 0.0, 0.0)]);
    let space = KeyEvent::new(" ", Modifiers::NONE);
    assert_eq!(editor.key_down(&space), Some(ShortcutAction::PanStart));

    editor.dispatch(&InputEvent::pointer_down(10.0, 10.0, Modifiers::NONE));
    assert!(matches!(editor.gesture(), Gesture::Panning { .. }));
    editor.dispatch(&InputEvent::pointer_move(20.0, 10.0));
    editor.dispatch(&InputEvent::pointer_up(20.0, 10.0));
    assert_eq!(editor.context().viewport.pan, Vec2::new(10.0, 0.0));

    editor.dispatch(&InputEvent::KeyUp(space));
    // world (0, 0) is now at screen (10, 0)
    editor.dispatch(&InputEvent::pointer_down(20.0, 10.0, Modifiers::NONE));
    assert!(matches!(editor.gesture(), Gesture::Pressed(_)));
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut editor = editor_with(&[]);
    let anchor = Point::new(200.0, 150.0);
    let before = editor.context().viewport.to_world(anchor);

    assert!(editor.dispatch(&InputEvent::Wheel {
        x: anchor.x,
        y: anchor.y,
        delta_y: -120.0,
    }));
    let viewport = editor.context().viewport;
    assert!((viewport.scale - 1.05).abs() < 1e-12);
    let after = viewport.to_world(anchor);
    assert!((after - before).hypot() < 1e-9, "{before:?} drifted to {after:?}");

    editor.dispatch(&InputEvent::Wheel {
        x: anchor.x,
        y: anchor.y,
        delta_y: 120.0,
    });
    assert!((editor.context().viewport.scale - 1.0).abs() < 1e-12);
}

#[test]
fn zoom_is_clamped() {
    let mut editor = editor_with(&[]);
    editor.context_mut().viewport.scale = 5.0;
    let zoom_in = InputEvent::Wheel {
        x: 0.0,
        y: 0.0,
        delta_y: -1.0,
    };
    assert!(!editor.dispatch(&zoom_in));
    assert_eq!(editor.context().viewport.scale, 5.0);
}

// ─── Keyboard ────────────────────────────────────────────────────────────

#[test]
fn delete_key_removes_selection() {
    let mut editor = editor_with(&[("gk_a", 0.0, 0.0), ("gk_b", 100.0, 0.0)]);
    editor.context_mut().selection.select_one(id("gk_a"));
    let delete = InputEvent::KeyDown(KeyEvent::new("Delete", Modifiers::NONE));
    assert!(editor.dispatch(&delete));
    assert!(!editor.context().store.contains(id("gk_a")));
    assert!(editor.context().store.contains(id("gk_b")));
    assert!(editor.selected_ids().is_empty());
}

#[test]
fn shortcuts_are_suppressed_in_text_input() {
    let mut editor = editor_with(&[("gt_a", 0.0, 0.0)]);
    editor.context_mut().selection.select_one(id("gt_a"));
    let mut backspace = KeyEvent::new("Backspace", Modifiers::NONE);
    backspace.in_text_input = true;
    assert_eq!(editor.key_down(&backspace), None);
    assert!(editor.context().store.contains(id("gt_a")));

    let mut space = KeyEvent::new(" ", Modifiers::NONE);
    space.in_text_input = true;
    editor.key_down(&space);
    editor.dispatch(&InputEvent::pointer_down(10.0, 10.0, Modifiers::NONE));
    assert!(matches!(editor.gesture(), Gesture::Pressed(_)));
}

#[test]
fn keyboard_copy_paste_follows_pointer() {
    let mut editor = editor_with(&[("gv_a", 0.0, 0.0)]);
    editor.context_mut().selection.select_one(id("gv_a"));
    assert_eq!(
        editor.key_down(&KeyEvent::new("c", ctrl())),
        Some(ShortcutAction::Copy)
    );
    editor.dispatch(&InputEvent::pointer_move(300.0, 200.0));
    assert_eq!(
        editor.key_down(&KeyEvent::new("v", ctrl())),
        Some(ShortcutAction::Paste)
    );

    assert_eq!(editor.context().store.len(), 2);
    let pasted = editor.selected_ids()[0];
    assert_ne!(pasted, id("gv_a"));
    assert_eq!(
        editor.context().store.get(pasted).unwrap().origin(),
        Point::new(310.0, 210.0)
    );
}

#[test]
fn paste_during_single_drag_keeps_pasted_selection() {
    let mut editor = editor_with(&[("gw_a", 0.0, 0.0)]);
    editor.dispatch(&InputEvent::pointer_down(10.0, 10.0, Modifiers::NONE));
    editor.dispatch(&InputEvent::pointer_move(60.0, 10.0));
    assert_eq!(editor.gesture(), Gesture::Dragging);

    editor.key_down(&KeyEvent::new("c", ctrl()));
    editor.key_down(&KeyEvent::new("v", ctrl()));
    let pasted = editor.selected_ids()[0];
    assert_ne!(pasted, id("gw_a"));

    editor.dispatch(&InputEvent::pointer_up(60.0, 10.0));
    assert_eq!(editor.selected_ids(), &[pasted]);
    assert_eq!(
        editor.context().store.get(id("gw_a")).unwrap().origin(),
        Point::new(50.0, 0.0)
    );
}

#[test]
fn zoom_shortcuts_scale_about_canvas_center() {
    let mut editor = editor_with(&[]);
    let center = editor.context().viewport.center_world();
    let zoom_in = KeyEvent::new("=", ctrl());
    assert_eq!(editor.key_down(&zoom_in), Some(ShortcutAction::ZoomIn));
    assert!(editor.context().viewport.scale > 1.0);
    let moved = editor.context().viewport.center_world();
    assert!((moved - center).hypot() < 1e-9);
}
