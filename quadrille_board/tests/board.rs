// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end board scenarios: raw input in, geometry and render passes out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Affine, Point, Vec2};
use quadrille_board::{
    Attributes, Board, BoardConfig, BoardEvent, BoardMode, BoundingBox, DeviceFamily, Element,
    HookKind, Host, Modifiers, NullRenderer, PointerId, RawEvent, Renderer, RendererKind,
    StaticHost, UpdateQuality, ZoomSettings,
};

#[derive(Clone, Default)]
struct Counters {
    displays: usize,
    passes: usize,
    last_quality: Option<UpdateQuality>,
}

/// Retained-mode recorder: counts element displays and render passes.
struct Recorder {
    counters: Rc<RefCell<Counters>>,
}

impl Renderer for Recorder {
    fn kind(&self) -> RendererKind {
        RendererKind::Svg
    }

    fn display(&mut self, _element: &Element, _visible: bool, quality: UpdateQuality) {
        let mut c = self.counters.borrow_mut();
        c.displays += 1;
        c.last_quality = Some(quality);
    }

    fn clear(&mut self) {}

    fn unsuspend_redraw(&mut self) {
        self.counters.borrow_mut().passes += 1;
    }
}

/// A host whose container transform can change after the board attaches,
/// like a page restyling the embedding element.
struct ScaledHost {
    scale: Rc<Cell<f64>>,
}

impl Host for ScaledHost {
    fn container_size(&self) -> (f64, f64) {
        (500.0, 500.0)
    }

    fn container_transform(&self) -> Affine {
        Affine::scale(self.scale.get())
    }
}

fn board() -> Board {
    let host = StaticHost::new(500.0, 500.0);
    let mut board = Board::new("brd", Box::new(host), Box::new(NullRenderer));
    board
        .set_bounding_box(BoundingBox::new(-5.0, 5.0, 5.0, -5.0), false)
        .unwrap();
    board
}

fn recorded_board() -> (Board, Rc<RefCell<Counters>>) {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let host = StaticHost::new(500.0, 500.0);
    let mut board = Board::new(
        "brd",
        Box::new(host),
        Box::new(Recorder {
            counters: counters.clone(),
        }),
    );
    board
        .set_bounding_box(BoundingBox::new(-5.0, 5.0, 5.0, -5.0), false)
        .unwrap();
    (board, counters)
}

fn down(id: u64, x: f64, y: f64, time: u64) -> RawEvent {
    down_mod(id, x, y, Modifiers::empty(), time)
}

fn down_mod(id: u64, x: f64, y: f64, modifiers: Modifiers, time: u64) -> RawEvent {
    RawEvent::Down {
        family: DeviceFamily::Pointer,
        pointer: PointerId(id),
        pos: Point::new(x, y),
        modifiers,
        time,
    }
}

fn mv(id: u64, x: f64, y: f64, time: u64) -> RawEvent {
    RawEvent::Move {
        family: DeviceFamily::Pointer,
        pointer: PointerId(id),
        pos: Point::new(x, y),
        modifiers: Modifiers::empty(),
        time,
    }
}

fn up(id: u64, x: f64, y: f64, time: u64) -> RawEvent {
    RawEvent::Up {
        family: DeviceFamily::Pointer,
        pointer: PointerId(id),
        pos: Point::new(x, y),
        time,
    }
}

#[test]
fn simple_drag_moves_the_point_one_unit() {
    let mut board = board();
    let p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    let updates = Rc::new(RefCell::new(0));
    let u = updates.clone();
    board.on(HookKind::Update, move |_| *u.borrow_mut() += 1);

    // 50 px per unit: the point sits at screen (250, 250).
    board.handle_raw(down(1, 250.0, 250.0, 1000));
    assert_eq!(board.mode(), BoardMode::Dragging);

    board.handle_raw(mv(1, 300.0, 250.0, 1016));
    // Exactly one update pass per processed move.
    assert_eq!(*updates.borrow(), 1);

    board.handle_raw(up(1, 300.0, 250.0, 1032));
    assert_eq!(board.mode(), BoardMode::Idle);

    let pos = board.registry().user_of(&p).unwrap();
    assert!((pos.x - 1.0).abs() < 1e-9);
    assert!(pos.y.abs() < 1e-9);
}

#[test]
fn second_down_for_a_live_pointer_is_ignored() {
    let mut board = board();
    let _p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    board.handle_raw(down(1, 250.0, 250.0, 1000));
    assert_eq!(board.debug_info().sessions, 1);
    // The host skipped an up; the original session survives.
    board.handle_raw(down(1, 100.0, 100.0, 1005));
    assert_eq!(board.debug_info().sessions, 1);
    assert_eq!(board.mode(), BoardMode::Dragging);
}

#[test]
fn anti_parallel_spread_zooms_in() {
    let mut board = board();
    // Two fingers on empty background.
    board.handle_raw(down(1, 150.0, 200.0, 1000));
    board.handle_raw(down(2, 250.0, 200.0, 1005));
    assert_eq!(board.mode(), BoardMode::ZoomGesture);

    // Horizontal spread: movement vectors anti-parallel along the
    // connecting axis. Must classify as pinch, not pan.
    board.handle_raw(mv(1, 120.0, 200.0, 1021));
    board.handle_raw(mv(2, 280.0, 200.0, 1022));

    let info = board.debug_info();
    assert!(info.zoom.0 > 1.0, "zoom_x = {}", info.zoom.0);
    assert!(info.zoom.1 > 1.0);

    board.handle_raw(up(1, 120.0, 200.0, 1100));
    board.handle_raw(up(2, 280.0, 200.0, 1101));
    assert_eq!(board.mode(), BoardMode::Idle);
}

#[test]
fn parallel_two_finger_motion_pans_instead() {
    let mut board = board();
    board.handle_raw(down(1, 150.0, 200.0, 1000));
    board.handle_raw(down(2, 250.0, 200.0, 1005));

    let before = board.get_bounding_box();
    board.handle_raw(mv(1, 180.0, 200.0, 1021));
    board.handle_raw(mv(2, 280.0, 200.0, 1022));

    let info = board.debug_info();
    assert!((info.zoom.0 - 1.0).abs() < 1e-12);
    let after = board.get_bounding_box();
    // The view shifted left in logical space (content followed the fingers).
    assert!(after.left < before.left);
    assert!((after.width() - before.width()).abs() < 1e-9);
}

#[test]
fn removing_a_parent_cascades_to_dependents() {
    let mut board = board();
    let c = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();
    let r = board
        .create("point", &[], &Attributes::at(Point::new(2.0, 0.0)))
        .unwrap();
    let circle = board
        .create("circle", &[&c, &r], &Attributes::default())
        .unwrap();

    board.remove_object(&c);
    assert!(board.select(&c).is_none());
    assert!(board.select(&circle).is_none());
    // The through-point does not depend on the center.
    assert!(board.select(&r).is_some());
    assert!(board.registry().positions_consistent());
}

#[test]
fn positions_stay_dense_across_interleaved_removals() {
    let mut board = board();
    let ids: Vec<String> = (0..6)
        .map(|i| {
            board
                .create("point", &[], &Attributes::at(Point::new(f64::from(i), 0.0)))
                .unwrap()
        })
        .collect();
    board.remove_object(&ids[1]);
    board.remove_object(&ids[4]);
    board.remove_object("never-existed");
    assert_eq!(board.registry().len(), 4);
    assert!(board.registry().positions_consistent());
}

#[test]
fn suspended_updates_batch_into_one_render_pass() {
    let (mut board, counters) = recorded_board();
    let baseline = counters.borrow().passes;

    board.suspend_update();
    for i in 0..10 {
        board
            .create("point", &[], &Attributes::at(Point::new(f64::from(i), 0.0)))
            .unwrap();
    }
    assert_eq!(counters.borrow().passes, baseline, "no pass while suspended");

    board.unsuspend_update();
    assert_eq!(counters.borrow().passes, baseline + 1);
    assert_eq!(board.registry().len(), 10);
}

#[test]
fn zoom_clamps_and_leaves_state_unchanged() {
    let mut board = board();
    let mut config = BoardConfig::default();
    config.zoom = ZoomSettings {
        max: 2.0,
        min: 0.5,
        ..ZoomSettings::default()
    };
    board.set_config(config);

    assert!(board.zoom_in(None)); // 1.25
    assert!(board.zoom_in(None)); // 1.5625
    assert!(board.zoom_in(None)); // 1.9531
    let before = board.get_bounding_box();
    assert!(!board.zoom_in(None)); // would be 2.44 > 2.0
    assert_eq!(board.get_bounding_box(), before);

    board.zoom_100();
    assert!((board.debug_info().zoom.0 - 1.0).abs() < 1e-12);
}

#[test]
fn aspect_preserving_box_contains_the_request() {
    let mut board = board();
    board
        .set_bounding_box(BoundingBox::new(-10.0, 2.0, 10.0, -2.0), true)
        .unwrap();
    let bb = board.get_bounding_box();
    assert!(bb.contains(Point::new(-10.0, 2.0)));
    assert!(bb.contains(Point::new(10.0, -2.0)));
    // Square canvas: equal logical extents.
    assert!((bb.width() - bb.height()).abs() < 1e-9);
}

#[test]
fn boxes_outside_the_maximum_are_refused_or_clamped() {
    let mut board = board();
    board.set_max_bounding_box(Some(BoundingBox::new(-10.0, 10.0, 10.0, -10.0)));

    // Fully outside: the view stays where it was.
    let before = board.get_bounding_box();
    assert!(board
        .set_bounding_box(BoundingBox::new(20.0, 5.0, 30.0, -5.0), false)
        .is_err());
    assert_eq!(board.get_bounding_box(), before);

    // Partially outside: clamped to the overlap with the maximum.
    board
        .set_bounding_box(BoundingBox::new(-30.0, 5.0, 0.0, -5.0), false)
        .unwrap();
    let bb = board.get_bounding_box();
    assert!((bb.left + 10.0).abs() < 1e-9);
    assert!((bb.right - 0.0).abs() < 1e-9);
}

#[test]
fn click_and_double_click_are_mutually_exclusive() {
    let mut board = board();
    let p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    let clicks: Rc<RefCell<Vec<BoardEvent>>> = Rc::default();
    let c = clicks.clone();
    board.on(HookKind::Click, move |ev| c.borrow_mut().push(ev.clone()));
    let d = clicks.clone();
    board.on(HookKind::DblClick, move |ev| d.borrow_mut().push(ev.clone()));

    // Fast tap-tap: double click only.
    board.handle_raw(down(1, 250.0, 250.0, 1000));
    board.handle_raw(up(1, 250.0, 250.0, 1050));
    board.handle_raw(down(1, 250.0, 250.0, 1150));
    board.handle_raw(up(1, 250.0, 250.0, 1200));
    board.poll(2000);
    {
        let events = clicks.borrow();
        let dbl = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::DblClick { element: Some(id), .. } if id == &p))
            .count();
        let single = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::Click { element: Some(_), .. }))
            .count();
        assert_eq!(dbl, 1);
        assert_eq!(single, 0);
    }

    // Lone tap: single click after the window.
    clicks.borrow_mut().clear();
    board.handle_raw(down(1, 250.0, 250.0, 3000));
    board.handle_raw(up(1, 250.0, 250.0, 3040));
    board.poll(3100); // window still open
    assert!(clicks.borrow().is_empty());
    board.poll(3400);
    let events = clicks.borrow();
    assert_eq!(events.len(), 2); // element click + board click
    assert!(events
        .iter()
        .any(|e| matches!(e, BoardEvent::Click { element: Some(id), .. } if id == &p)));
}

#[test]
fn drag_cancels_any_pending_click() {
    let mut board = board();
    let _p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    let clicks = Rc::new(RefCell::new(0));
    let c = clicks.clone();
    board.on(HookKind::Click, move |_| *c.borrow_mut() += 1);

    board.handle_raw(down(1, 250.0, 250.0, 1000));
    board.handle_raw(mv(1, 290.0, 250.0, 1016));
    board.handle_raw(up(1, 290.0, 250.0, 1040));
    board.poll(2000);
    assert_eq!(*clicks.borrow(), 0);
}

#[test]
fn rejected_third_finger_moves_are_ignored() {
    let mut board = board();
    let a = board
        .create("point", &[], &Attributes::at(Point::new(-1.0, 0.0)))
        .unwrap();
    let b = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 0.0)))
        .unwrap();
    let line = board.create("line", &[&a, &b], &Attributes::default()).unwrap();

    // Two fingers on the line's endpoints (both hit the line region via
    // its endpoints' screen positions on the segment).
    board.handle_raw(down(1, 220.0, 250.0, 1000));
    board.handle_raw(down(2, 280.0, 250.0, 1001));
    // A third finger on the same line is dropped.
    board.handle_raw(down(3, 250.0, 250.0, 1002));
    let sessions_before = board.debug_info().sessions;
    board.handle_raw(mv(3, 250.0, 300.0, 1020));
    assert_eq!(board.debug_info().sessions, sessions_before);

    let _ = line;
}

#[test]
fn selection_rectangle_collects_points() {
    let mut board = board();
    let inside = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 1.0)))
        .unwrap();
    let outside = board
        .create("point", &[], &Attributes::at(Point::new(4.0, 4.0)))
        .unwrap();

    board.start_selection();
    assert_eq!(board.mode(), BoardMode::Selecting);
    // Down during selection anchors the rectangle instead of dragging.
    board.handle_raw(down(1, 200.0, 300.0, 1000));
    board.handle_raw(mv(1, 320.0, 180.0, 1016));
    board.handle_raw(up(1, 320.0, 180.0, 1030));

    assert_eq!(board.mode(), BoardMode::Idle);
    assert_eq!(board.selected(), [inside.clone()]);
    assert!(!board.selected().contains(&outside));
}

#[test]
fn frozen_elements_keep_screen_position_across_pan() {
    let mut board = board();
    let free = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 0.0)))
        .unwrap();
    let frozen = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 0.0)))
        .unwrap();
    board
        .registry_mut()
        .get_mut(&frozen)
        .unwrap()
        .flags
        .insert(quadrille_board::ElementFlags::FROZEN);

    board.move_origin(Vec2::new(-50.0, 0.0));

    // The free point kept its user position; its screen position moved.
    assert_eq!(board.registry().user_of(&free).unwrap(), Point::new(1.0, 0.0));
    assert_eq!(
        board.registry().screen_of(&free).unwrap(),
        Point::new(250.0, 250.0)
    );
    // The frozen point kept its screen position; its user position moved.
    assert_eq!(
        board.registry().screen_of(&frozen).unwrap(),
        Point::new(300.0, 250.0)
    );
    assert_eq!(board.registry().user_of(&frozen).unwrap(), Point::new(2.0, 0.0));
}

#[test]
fn dependent_boards_update_once_without_recursion() {
    let host = StaticHost::new(500.0, 500.0);
    let dep = Rc::new(RefCell::new(Board::new(
        "dep",
        Box::new(host),
        Box::new(NullRenderer),
    )));
    let dep_updates = Rc::new(RefCell::new(0));
    {
        let u = dep_updates.clone();
        dep.borrow_mut()
            .on(HookKind::Update, move |_| *u.borrow_mut() += 1);
    }

    let mut board = board();
    board.add_dependent_board(dep.clone());
    board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();
    assert_eq!(*dep_updates.borrow(), 1);

    // A board that depends on itself is skipped, not recursed into.
    {
        let mut d = dep.borrow_mut();
        d.add_dependent_board(dep.clone());
        d.full_update();
    }
    assert_eq!(*dep_updates.borrow(), 2);
}

#[test]
fn unknown_kind_and_missing_parent_register_nothing() {
    let mut board = board();
    assert!(board.create("hyperbola", &[], &Attributes::default()).is_err());
    assert!(board
        .create("line", &["ghost-a", "ghost-b"], &Attributes::default())
        .is_err());
    assert!(board.registry().is_empty());
}

#[test]
fn legacy_host_still_drags_with_mouse_events() {
    let host = StaticHost {
        width: 500.0,
        height: 500.0,
        pointer_events: false,
    };
    let mut board = Board::new("brd", Box::new(host), Box::new(NullRenderer));
    board
        .set_bounding_box(BoundingBox::new(-5.0, 5.0, 5.0, -5.0), false)
        .unwrap();
    let p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    let ev = |raw: RawEvent| raw;
    board.handle_raw(ev(RawEvent::Down {
        family: DeviceFamily::Mouse,
        pointer: PointerId(1),
        pos: Point::new(250.0, 250.0),
        modifiers: Modifiers::empty(),
        time: 1000,
    }));
    board.handle_raw(ev(RawEvent::Move {
        family: DeviceFamily::Mouse,
        pointer: PointerId(1),
        pos: Point::new(300.0, 250.0),
        modifiers: Modifiers::empty(),
        time: 1016,
    }));
    board.handle_raw(ev(RawEvent::Up {
        family: DeviceFamily::Mouse,
        pointer: PointerId(1),
        pos: Point::new(300.0, 250.0),
        time: 1032,
    }));
    assert!((board.registry().user_of(&p).unwrap().x - 1.0).abs() < 1e-9);

    // Pointer-family events are suppressed on this host.
    board.handle_raw(ev(down(2, 250.0, 250.0, 2000)));
    assert_eq!(board.debug_info().sessions, 0);
}

#[test]
fn container_restyle_between_gestures_is_seen_by_the_next_down() {
    let scale = Rc::new(Cell::new(1.0));
    let host = ScaledHost {
        scale: scale.clone(),
    };
    let mut board = Board::new("brd", Box::new(host), Box::new(NullRenderer));
    board
        .set_bounding_box(BoundingBox::new(-5.0, 5.0, 5.0, -5.0), false)
        .unwrap();
    let p = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 0.0)))
        .unwrap();

    // The page scales the container 2x after the board attached.
    scale.set(2.0);

    // Client (600, 500) is screen (300, 250) under the new transform:
    // right on the point.
    board.handle_raw(down(1, 600.0, 500.0, 1000));
    assert_eq!(board.mode(), BoardMode::Dragging);
    board.handle_raw(mv(1, 700.0, 500.0, 1016));
    board.handle_raw(up(1, 700.0, 500.0, 1032));
    assert!((board.registry().user_of(&p).unwrap().x - 2.0).abs() < 1e-9);
}

#[test]
fn pan_modifier_grabs_the_view_even_over_an_element() {
    let mut board = board();
    let p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    board.handle_raw(down_mod(1, 250.0, 250.0, Modifiers::SHIFT, 1000));
    assert_eq!(board.mode(), BoardMode::PanningOrigin);

    let before = board.get_bounding_box();
    board.handle_raw(mv(1, 300.0, 250.0, 1016));
    assert!(board.get_bounding_box().left < before.left);
    // The view moved; the point under the finger did not.
    assert_eq!(board.registry().user_of(&p).unwrap(), Point::ZERO);

    board.handle_raw(up(1, 300.0, 250.0, 1032));
    assert_eq!(board.mode(), BoardMode::Idle);
}

#[test]
fn plain_background_pan_honors_the_config_gate() {
    let mut board = board();
    let mut config = BoardConfig::default();
    config.one_finger_pan = false;
    board.set_config(config);

    let before = board.get_bounding_box();
    board.handle_raw(down(1, 150.0, 150.0, 1000));
    assert_eq!(board.mode(), BoardMode::Idle);
    board.handle_raw(mv(1, 200.0, 150.0, 1016));
    assert_eq!(board.get_bounding_box(), before);
    board.handle_raw(up(1, 200.0, 150.0, 1032));

    // The modifier route still pans.
    board.handle_raw(down_mod(1, 150.0, 150.0, Modifiers::SHIFT, 2000));
    assert_eq!(board.mode(), BoardMode::PanningOrigin);
    board.handle_raw(mv(1, 200.0, 150.0, 2016));
    assert!(board.get_bounding_box().left < before.left);
    board.handle_raw(up(1, 200.0, 150.0, 2032));
}

#[test]
fn selection_modifier_anchors_a_rubber_band() {
    let mut board = board();
    let inside = board
        .create("point", &[], &Attributes::at(Point::new(1.0, 1.0)))
        .unwrap();
    let mut config = BoardConfig::default();
    config.selection_modifier = Modifiers::CTRL;
    board.set_config(config);

    board.handle_raw(down_mod(1, 200.0, 300.0, Modifiers::CTRL, 1000));
    assert_eq!(board.mode(), BoardMode::Selecting);
    board.handle_raw(mv(1, 320.0, 180.0, 1016));
    board.handle_raw(up(1, 320.0, 180.0, 1030));

    assert_eq!(board.mode(), BoardMode::Idle);
    assert_eq!(board.selected(), [inside]);
}

#[test]
fn background_fingers_do_not_hijack_an_active_drag() {
    let mut board = board();
    let p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    board.handle_raw(down(1, 250.0, 250.0, 1000));
    assert_eq!(board.mode(), BoardMode::Dragging);
    // Two stray fingers land on the background mid-drag.
    board.handle_raw(down(2, 100.0, 100.0, 1001));
    board.handle_raw(down(3, 120.0, 100.0, 1002));
    assert_eq!(board.mode(), BoardMode::Dragging);

    let before = board.get_bounding_box();
    board.handle_raw(mv(1, 300.0, 250.0, 1016));
    // The drag proceeds and the view stays put.
    assert!((board.registry().user_of(&p).unwrap().x - 1.0).abs() < 1e-9);
    assert_eq!(board.get_bounding_box(), before);
}

#[test]
fn removing_many_objects_updates_once() {
    let (mut board, counters) = recorded_board();
    let a = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();
    let b = board
        .create("point", &[], &Attributes::at(Point::new(2.0, 0.0)))
        .unwrap();
    let circle = board.create("circle", &[&a, &b], &Attributes::default()).unwrap();
    let keep = board
        .create("point", &[], &Attributes::at(Point::new(4.0, 0.0)))
        .unwrap();

    let baseline = counters.borrow().passes;
    board.remove_objects([a.as_str(), b.as_str(), "never-existed"]);
    assert_eq!(counters.borrow().passes, baseline + 1);

    assert!(board.select(&a).is_none());
    assert!(board.select(&b).is_none());
    assert!(board.select(&circle).is_none());
    assert!(board.select(&keep).is_some());
    assert!(board.registry().positions_consistent());
}

#[test]
fn gesture_frames_render_low_and_settle_high() {
    let (mut board, counters) = recorded_board();
    let _p = board
        .create("point", &[], &Attributes::at(Point::ZERO))
        .unwrap();

    board.handle_raw(down(1, 250.0, 250.0, 1000));
    board.handle_raw(mv(1, 300.0, 250.0, 1016));
    assert_eq!(counters.borrow().last_quality, Some(UpdateQuality::Low));

    board.handle_raw(up(1, 300.0, 250.0, 1032));
    assert_eq!(counters.borrow().last_quality, Some(UpdateQuality::High));
}
