#![allow(clippy::float_cmp)]

use super::*;
use crate::boxes::BoxKey;
use crate::geom::{Point, Rect};
use crate::input::Mode;

/// Canvas at the viewport origin, 140x140, with the 100x100 image inset by
/// (20, 20) — the layout the server renders for a floorplan card.
fn geometry() -> Geometry {
    Geometry {
        canvas: Rect::new(0.0, 0.0, 140.0, 140.0),
        image: Rect::new(20.0, 20.0, 100.0, 100.0),
    }
}

fn engine() -> EngineCore {
    let mut core = EngineCore::new("/maskprev/fp1");
    core.set_geometry(geometry());
    core
}

fn drag(core: &mut EngineCore, from: (f64, f64), to: (f64, f64)) -> Action {
    core.pointer_down(Point::new(from.0, from.1));
    core.pointer_move(Point::new(to.0, to.1));
    core.pointer_up()
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn offset_is_image_minus_canvas_origin() {
    assert_eq!(geometry().offset(), Point::new(20.0, 20.0));
}

#[test]
fn offset_follows_canvas_position() {
    let g = Geometry {
        canvas: Rect::new(100.0, 400.0, 140.0, 140.0),
        image: Rect::new(120.0, 420.0, 100.0, 100.0),
    };
    assert_eq!(g.offset(), Point::new(20.0, 20.0));
}

// =============================================================
// Drag commit
// =============================================================

#[test]
fn drag_clamps_and_commits_image_local_key() {
    let mut core = engine();
    let action = drag(&mut core, (10.0, 10.0), (50.0, 40.0));
    assert_eq!(action, Action::BoxAdded(BoxKey::new(0, 0, 20, 30)));
    assert_eq!(core.boxes().serialized(), "0-0-20-30");
}

#[test]
fn drag_within_image_is_not_clamped() {
    let mut core = engine();
    let action = drag(&mut core, (30.0, 30.0), (70.0, 60.0));
    assert_eq!(action, Action::BoxAdded(BoxKey::new(10, 10, 40, 50)));
}

#[test]
fn drag_direction_does_not_matter() {
    let mut core = engine();
    drag(&mut core, (70.0, 60.0), (30.0, 30.0));
    assert_eq!(core.boxes().serialized(), "10-10-40-50");
}

#[test]
fn drag_started_is_zero_sized_at_canvas_local_origin() {
    let mut core = engine();
    let action = core.pointer_down(Point::new(30.0, 40.0));
    assert_eq!(action, Action::DragStarted(Rect::zero_at(Point::new(30.0, 40.0))));
}

#[test]
fn drag_tracks_canvas_moved_by_scroll() {
    // Same gesture after the page scrolled: client coordinates shift, the
    // committed key does not, because geometry was re-measured.
    let mut core = EngineCore::new("/maskprev/fp1");
    core.set_geometry(Geometry {
        canvas: Rect::new(0.0, -60.0, 140.0, 140.0),
        image: Rect::new(20.0, -40.0, 100.0, 100.0),
    });
    let action = drag(&mut core, (10.0, -50.0), (50.0, -20.0));
    assert_eq!(action, Action::BoxAdded(BoxKey::new(0, 0, 20, 30)));
}

#[test]
fn pointer_move_reports_current_rect() {
    let mut core = engine();
    core.pointer_down(Point::new(30.0, 30.0));
    let action = core.pointer_move(Point::new(50.0, 70.0));
    assert_eq!(action, Action::DragMoved(Rect::new(30.0, 30.0, 20.0, 40.0)));
    // Dragging back past the origin flips the rectangle, not the origin.
    let action = core.pointer_move(Point::new(10.0, 10.0));
    assert_eq!(action, Action::DragMoved(Rect::new(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn pointer_move_without_drag_is_noop() {
    let mut core = engine();
    assert_eq!(core.pointer_move(Point::new(50.0, 50.0)), Action::None);
}

#[test]
fn pointer_up_without_drag_is_noop() {
    let mut core = engine();
    assert_eq!(core.pointer_up(), Action::None);
}

// =============================================================
// Degenerate drags
// =============================================================

#[test]
fn click_without_move_is_rejected() {
    let mut core = engine();
    core.pointer_down(Point::new(30.0, 30.0));
    assert_eq!(core.pointer_up(), Action::DegenerateRejected);
    assert!(core.boxes().is_empty());
}

#[test]
fn drag_clamped_to_zero_width_is_rejected() {
    // Entirely left of the image: both x edges clamp to column 0.
    let mut core = engine();
    let action = drag(&mut core, (5.0, 30.0), (15.0, 60.0));
    assert_eq!(action, Action::DegenerateRejected);
    assert!(core.boxes().is_empty());
}

#[test]
fn drag_clamped_to_zero_height_is_rejected() {
    // Entirely below the image: both y edges clamp to the bottom row.
    let mut core = engine();
    let action = drag(&mut core, (30.0, 125.0), (60.0, 135.0));
    assert_eq!(action, Action::DegenerateRejected);
}

#[test]
fn rejected_drag_leaves_no_query_parameter() {
    let mut core = engine();
    drag(&mut core, (5.0, 30.0), (15.0, 60.0));
    let req = core.begin_refresh();
    assert_eq!(req.url, "/maskprev/fp1");
    assert_eq!(req.feedback, "");
}

// =============================================================
// Duplicates
// =============================================================

#[test]
fn identical_drags_commit_once() {
    let mut core = engine();
    assert_eq!(
        drag(&mut core, (30.0, 30.0), (70.0, 60.0)),
        Action::BoxAdded(BoxKey::new(10, 10, 40, 50))
    );
    assert_eq!(drag(&mut core, (30.0, 30.0), (70.0, 60.0)), Action::DuplicateDiscarded);
    assert_eq!(core.boxes().len(), 1);
}

#[test]
fn near_identical_drags_commit_twice() {
    // One pixel apart after truncation: distinct keys.
    let mut core = engine();
    drag(&mut core, (30.0, 30.0), (70.0, 60.0));
    drag(&mut core, (30.0, 30.0), (71.0, 60.0));
    assert_eq!(core.boxes().len(), 2);
}

// =============================================================
// Mode / erase
// =============================================================

#[test]
fn pointer_down_in_erase_mode_is_noop() {
    let mut core = engine();
    core.toggle_mode();
    assert_eq!(core.pointer_down(Point::new(30.0, 30.0)), Action::None);
    assert_eq!(core.pointer_up(), Action::None);
}

#[test]
fn toggle_reports_new_mode() {
    let mut core = engine();
    assert_eq!(core.toggle_mode(), vec![Action::ModeChanged(Mode::Erase)]);
    assert_eq!(core.mode(), Mode::Erase);
    assert_eq!(core.toggle_mode(), vec![Action::ModeChanged(Mode::Draw)]);
}

#[test]
fn toggle_cancels_open_drag_first() {
    let mut core = engine();
    core.pointer_down(Point::new(30.0, 30.0));
    core.pointer_move(Point::new(50.0, 50.0));
    let actions = core.toggle_mode();
    assert_eq!(actions, vec![Action::DragCancelled, Action::ModeChanged(Mode::Erase)]);
    // The cancelled gesture must not commit on a later pointer-up.
    assert_eq!(core.pointer_up(), Action::None);
    assert!(core.boxes().is_empty());
}

#[test]
fn erase_removes_existing_box() {
    let mut core = engine();
    drag(&mut core, (30.0, 30.0), (70.0, 60.0));
    core.toggle_mode();
    let key = BoxKey::new(10, 10, 40, 50);
    assert_eq!(core.erase(key), Action::BoxRemoved(key));
    assert!(core.boxes().is_empty());
}

#[test]
fn erase_in_draw_mode_is_noop() {
    let mut core = engine();
    drag(&mut core, (30.0, 30.0), (70.0, 60.0));
    let key = BoxKey::new(10, 10, 40, 50);
    assert_eq!(core.erase(key), Action::None);
    assert_eq!(core.boxes().len(), 1);
}

#[test]
fn erase_missing_key_is_noop() {
    let mut core = engine();
    core.toggle_mode();
    assert_eq!(core.erase(BoxKey::new(0, 0, 1, 1)), Action::None);
}

#[test]
fn draw_then_erase_round_trips() {
    let mut core = engine();
    drag(&mut core, (30.0, 30.0), (70.0, 60.0));
    let before = core.boxes().serialized();
    drag(&mut core, (40.0, 40.0), (60.0, 50.0));
    core.toggle_mode();
    core.erase(BoxKey::new(20, 20, 30, 40));
    assert_eq!(core.boxes().serialized(), before);
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_with_boxes_builds_query() {
    let mut core = engine();
    drag(&mut core, (10.0, 10.0), (50.0, 40.0));
    let req = core.begin_refresh();
    assert_eq!(req.url, "/maskprev/fp1?boxes=0-0-20-30");
    assert_eq!(req.feedback, "0-0-20-30");
}

#[test]
fn refresh_joins_multiple_boxes() {
    let mut core = engine();
    drag(&mut core, (20.0, 20.0), (50.0, 40.0));
    drag(&mut core, (25.0, 25.0), (35.0, 35.0));
    let req = core.begin_refresh();
    assert_eq!(req.url, "/maskprev/fp1?boxes=0-0-20-30-5-5-15-15");
}

#[test]
fn refresh_without_boxes_has_no_query() {
    let mut core = engine();
    let req = core.begin_refresh();
    assert_eq!(req.url, "/maskprev/fp1");
    assert_eq!(req.feedback, "");
}

#[test]
fn generations_increase_per_request() {
    let mut core = engine();
    let a = core.begin_refresh();
    let b = core.begin_refresh();
    assert!(b.generation > a.generation);
}

#[test]
fn stale_generation_is_dropped() {
    let mut core = engine();
    let first = core.begin_refresh();
    let second = core.begin_refresh();
    assert!(!core.accept_refresh(first.generation));
    assert!(core.accept_refresh(second.generation));
}

// =============================================================
// load_existing
// =============================================================

#[test]
fn load_existing_offsets_server_rects() {
    let mut core = engine();
    core.load_existing(&[Rect::new(30.0, 25.0, 40.0, 10.0)]);
    assert_eq!(core.boxes().serialized(), "5-10-15-50");
}

#[test]
fn load_existing_drops_duplicates() {
    let mut core = engine();
    core.load_existing(&[
        Rect::new(30.0, 25.0, 40.0, 10.0),
        Rect::new(30.0, 25.0, 40.0, 10.0),
    ]);
    assert_eq!(core.boxes().len(), 1);
}

#[test]
fn loaded_box_collides_with_identical_drag() {
    let mut core = engine();
    // Canvas-relative (30, 30) sized 40x30 maps to key 10-10-40-50, the same
    // extent the drag below produces.
    core.load_existing(&[Rect::new(30.0, 30.0, 40.0, 30.0)]);
    assert_eq!(drag(&mut core, (30.0, 30.0), (70.0, 60.0)), Action::DuplicateDiscarded);
}
