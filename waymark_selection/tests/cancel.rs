// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancel semantics: revert while held, clear only once committed.

use kurbo::{Point, Vec2};
use waymark_hierarchy::{Hierarchy, Shape};
use waymark_input::{Button, ButtonSet};
use waymark_selection::{CancelOutcome, Selection, SelectionError, Target};

fn v0() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(3.0, 0.0),
        Point::new(3.0, 2.0),
    ]
}

fn setup() -> (Hierarchy, Selection) {
    let h = Hierarchy::from_shapes([Shape::new("pond").with_vertices(v0())]);
    let mut sel = Selection::new();
    sel.select(Target::vertex("pond", 2, Point::new(3.0, 2.0)), &h)
        .unwrap();
    (h, sel)
}

#[test]
fn cancel_while_held_restores_snapshot_exactly() {
    let (mut h, mut sel) = setup();
    // Arbitrary edit, not only via drag.
    h.set_vertices("pond", vec![Point::new(9.0, 9.0)]).unwrap();
    assert_eq!(sel.snapshot(Button::Primary), Some(v0().as_slice()));

    assert_eq!(sel.cancel(ButtonSet::PRIMARY, &mut h), CancelOutcome::Reverted);
    assert_eq!(h.get("pond").unwrap().vertices, v0());
    assert!(sel.primary().is_none());
    assert!(sel.highlight().is_none());
}

#[test]
fn cancel_after_release_keeps_committed_edit() {
    let (mut h, mut sel) = setup();
    sel.drag(Button::Primary, Vec2::new(1.0, 0.0), &mut h).unwrap();

    let outcome = sel.cancel(ButtonSet::SECONDARY, &mut h);
    assert_eq!(outcome, CancelOutcome::Cleared);
    assert_eq!(h.get("pond").unwrap().vertices[2], Point::new(4.0, 2.0));
    assert!(sel.primary().is_none());
    // The highlight is left for the caller to clear.
    assert!(sel.is_highlighted("pond"));
}

#[test]
fn cancel_without_target_does_nothing() {
    let mut h = Hierarchy::new();
    let mut sel = Selection::new();
    assert_eq!(sel.cancel(ButtonSet::PRIMARY, &mut h), CancelOutcome::Nothing);
    assert_eq!(sel.revision(), 0);
}

#[test]
fn deselect_leaves_other_buttons() {
    let (h, mut sel) = setup();
    sel.engage(Button::Secondary, Target::shape("pond", Point::ZERO), &h)
        .unwrap();
    sel.deselect();
    assert!(sel.primary().is_none());
    assert!(sel.target(Button::Secondary).is_some());
}

#[test]
fn drag_on_deleted_shape_is_stale() {
    let (mut h, mut sel) = setup();
    h.delete("pond").unwrap();
    assert_eq!(
        sel.drag(Button::Primary, Vec2::new(1.0, 1.0), &mut h),
        Err(SelectionError::StaleTarget("pond".into()))
    );
    assert!(sel.primary().is_none());
}

#[test]
fn commit_moves_the_baseline() {
    let (mut h, mut sel) = setup();
    sel.drag(Button::Primary, Vec2::new(0.0, 1.0), &mut h).unwrap();
    assert!(sel.commit(Button::Primary, &h));
    sel.drag(Button::Primary, Vec2::new(0.0, 1.0), &mut h).unwrap();
    assert_eq!(h.get("pond").unwrap().vertices[2], Point::new(3.0, 4.0));
}
