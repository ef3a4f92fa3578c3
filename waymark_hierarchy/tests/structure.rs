// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural edits observed through the public API.

use kurbo::Point;
use waymark_hierarchy::{Hierarchy, HierarchyError, MAX_DEPTH, Shape, ShapeId};

fn id(s: &str) -> ShapeId {
    ShapeId::from(s)
}

/// all <- A <- B <- C
fn chain() -> Hierarchy {
    Hierarchy::from_shapes([
        Shape::new("A"),
        Shape::new("B").with_parent("A"),
        Shape::new("C").with_parent("B"),
    ])
}

fn square(name: &str) -> Shape {
    Shape::new(name).with_vertices([
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
}

#[test]
fn reparent_under_descendant_is_rejected_without_changes() {
    let mut h = chain();
    let rev = h.revision();
    let err = h.reparent("A", "C").unwrap_err();
    assert_eq!(
        err,
        HierarchyError::Cycle {
            child: id("A"),
            parent: id("C"),
        }
    );
    assert_eq!(h.parent_of("A"), Some(&id("all")));
    assert_eq!(h.children_of("all"), &[id("A")]);
    assert_eq!(h.revision(), rev);
}

#[test]
fn reparent_to_root_updates_both_lists_and_depths() {
    let mut h = chain();
    h.reparent("B", "all").unwrap();
    // A's list became empty and is gone.
    assert!(h.children_of("A").is_empty());
    assert!(h.children_of("all").contains(&id("B")));
    assert_eq!(h.depth("B"), Some(1));
    assert_eq!(h.depth("C"), Some(2));
    assert_eq!(h.ancestors("C"), vec![id("B"), id("all")]);
}

#[test]
fn reparent_to_missing_parent_is_rejected() {
    let mut h = chain();
    assert_eq!(
        h.reparent("C", "ghost"),
        Err(HierarchyError::MissingParent {
            child: id("C"),
            parent: id("ghost"),
        })
    );
    assert_eq!(h.parent_of("C"), Some(&id("B")));
}

#[test]
fn rename_rewrites_every_reference() {
    let mut h = chain();
    h.insert(Shape::new("D").with_connection("A")).unwrap();
    h.rename("A", "gate").unwrap();

    assert!(h.get("A").is_none());
    assert_eq!(h.get("gate").unwrap().id(), &id("gate"));
    assert_eq!(h.parent_of("B"), Some(&id("gate")));
    assert_eq!(h.children_of("gate"), &[id("B")]);
    assert!(h.children_of("A").is_empty());
    assert!(h.children_of("all").contains(&id("gate")));
    assert_eq!(h.get("D").unwrap().connections(), &[id("gate")]);
    assert_eq!(h.depth("gate"), Some(1));
    assert_eq!(h.depth("C"), Some(3));
    assert!(h.iter().all(|s| s.parent() != "A"));
}

#[test]
fn rename_onto_existing_or_root_changes_nothing() {
    let mut h = chain();
    assert_eq!(h.rename("C", "A"), Err(HierarchyError::DuplicateId(id("A"))));
    assert_eq!(h.rename("C", "all"), Err(HierarchyError::DuplicateId(id("all"))));
    assert_eq!(h.rename("all", "x"), Err(HierarchyError::RootIsImmutable));
    assert!(h.get("C").is_some());
    assert_eq!(h.children_of("B"), &[id("C")]);
}

#[test]
fn delete_orphans_children_until_repair() {
    let mut h = chain();
    h.insert(Shape::new("D").with_connection("B")).unwrap();
    let removed = h.delete("B").unwrap();
    assert_eq!(removed.id(), &id("B"));

    // C keeps its dangling parent but is shown at the top level.
    assert_eq!(h.parent_of("C"), Some(&id("B")));
    assert!(h.children_of("all").contains(&id("C")));
    assert_eq!(h.depth("C"), Some(1));
    assert_eq!(h.orphans(), vec![&id("C")]);
    // Connections to the deleted shape are dropped.
    assert!(h.get("D").unwrap().connections().is_empty());

    assert_eq!(h.repair_orphans(), vec![id("C")]);
    assert_eq!(h.parent_of("C"), Some(&id("all")));
    assert!(h.orphans().is_empty());
}

#[test]
fn delete_subtree_removes_descendants() {
    let mut h = chain();
    h.insert(Shape::new("E").with_connection("C")).unwrap();
    let removed: Vec<ShapeId> = h
        .delete_subtree("A")
        .unwrap()
        .into_iter()
        .map(|s| s.id().clone())
        .collect();
    assert_eq!(removed, vec![id("A"), id("B"), id("C")]);
    assert_eq!(h.len(), 1);
    assert_eq!(h.children_of("all"), &[id("E")]);
    assert!(h.get("E").unwrap().connections().is_empty());
}

#[test]
fn duplicate_copies_under_same_parent() {
    let mut h = chain();
    h.set_vertices("B", vec![Point::new(2.0, 2.0)]).unwrap();
    h.get_mut("B").unwrap().z = 4.0;
    h.connect("B", "C").unwrap();

    let copy = h.duplicate("B", None).unwrap();
    assert_eq!(copy, id("B 2"));
    let shape = h.get("B 2").unwrap();
    assert_eq!(shape.parent(), &id("A"));
    assert_eq!(shape.z, 4.0);
    assert_eq!(shape.vertices, vec![Point::new(2.0, 2.0)]);
    assert!(shape.connections().is_empty());
    assert_eq!(h.children_of("A"), &[id("B"), id("B 2")]);
    assert_eq!(h.depth("B 2"), Some(2));
}

#[test]
fn split_partitions_vertices() {
    let mut h = Hierarchy::new();
    h.insert(square("wall")).unwrap();
    let copy = h.duplicate("wall", Some(2)).unwrap();
    assert_eq!(
        h.get("wall").unwrap().vertices,
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
    );
    assert_eq!(
        h.get(copy.as_str()).unwrap().vertices,
        vec![Point::new(1.0, 1.0), Point::new(0.0, 1.0)]
    );
}

#[test]
fn split_at_ends_is_invalid() {
    let mut h = Hierarchy::new();
    h.insert(square("wall")).unwrap();
    for index in [0, 4, 9] {
        assert_eq!(
            h.duplicate("wall", Some(index)),
            Err(HierarchyError::InvalidSplit {
                id: id("wall"),
                index,
                len: 4,
            })
        );
    }
    assert_eq!(h.len(), 1);
}

#[test]
fn load_tolerates_bad_references() {
    let mut h = Hierarchy::new();
    let report = h.load([
        Shape::new("lost").with_parent("gone"),
        Shape::new("kept").with_connection("nobody"),
    ]);
    assert_eq!(report.missing_parents, vec![(id("lost"), id("gone"))]);
    assert_eq!(report.dangling_connections, vec![(id("kept"), id("nobody"))]);
    assert!(!report.is_clean());
    assert_eq!(h.children_of("all"), &[id("kept"), id("lost")]);
    assert_eq!(h.depth("lost"), Some(1));
}

#[test]
fn rename_adopts_orphans_waiting_on_new_name() {
    let mut h = Hierarchy::from_shapes([Shape::new("x"), Shape::new("kid").with_parent("y")]);
    h.rename("x", "y").unwrap();
    assert_eq!(h.children_of("y"), &[id("kid")]);
    assert_eq!(h.children_of("all"), &[id("y")]);
    assert_eq!(h.depth("kid"), Some(2));
}

#[test]
fn rename_refuses_to_adopt_its_own_ancestor() {
    let mut h = Hierarchy::new();
    h.insert(Shape::new("N")).unwrap();
    h.insert(Shape::new("O").with_parent("N")).unwrap();
    h.insert(Shape::new("X").with_parent("O")).unwrap();
    h.delete("N").unwrap();
    let rev = h.revision();

    // O dangles on "N"; naming its own child "N" would close O -> N -> O.
    assert_eq!(
        h.rename("X", "N"),
        Err(HierarchyError::Cycle {
            child: id("O"),
            parent: id("N"),
        })
    );
    assert!(h.contains("X"));
    assert_eq!(h.parent_of("O"), Some(&id("N")));
    assert_eq!(h.depth("O"), Some(1));
    assert_eq!(h.depth("X"), Some(2));
    assert_eq!(h.revision(), rev);
}

#[test]
fn rename_onto_own_dangling_parent_is_rejected() {
    let mut h = Hierarchy::from_shapes([Shape::new("lost").with_parent("gone")]);
    assert_eq!(
        h.rename("lost", "gone"),
        Err(HierarchyError::Cycle {
            child: id("lost"),
            parent: id("gone"),
        })
    );
    assert!(h.contains("lost"));
    assert!(!h.contains("gone"));
}

#[test]
fn insert_adopts_orphans_waiting_on_its_name() {
    let mut h = Hierarchy::from_shapes([Shape::new("kid").with_parent("hub")]);
    h.insert(Shape::new("hub")).unwrap();
    assert_eq!(h.children_of("all"), &[id("hub")]);
    assert_eq!(h.children_of("hub"), &[id("kid")]);
    assert_eq!(h.depth("kid"), Some(2));

    // An adoptee cannot become the new shape's ancestor.
    let mut h = Hierarchy::from_shapes([Shape::new("kid").with_parent("hub")]);
    assert!(matches!(
        h.insert(Shape::new("hub").with_parent("kid")),
        Err(HierarchyError::Cycle { .. })
    ));
    assert!(!h.contains("hub"));
}

#[test]
fn depth_bound_rejects_the_level_past_max_depth() {
    let mut h = Hierarchy::new();
    let mut parent = id("all");
    for level in 1..=MAX_DEPTH {
        let name = format!("s{level}");
        h.insert(Shape::new(name.as_str()).with_parent(parent.as_str()))
            .unwrap();
        parent = id(&name);
    }
    let deepest = format!("s{MAX_DEPTH}");
    let above = format!("s{}", MAX_DEPTH - 1);
    assert_eq!(h.depth(&deepest), Some(MAX_DEPTH));

    assert!(matches!(
        h.insert(Shape::new("past").with_parent(deepest.as_str())),
        Err(HierarchyError::Cycle { .. })
    ));
    assert!(!h.contains("past"));

    h.insert(Shape::new("t")).unwrap();
    h.insert(Shape::new("t2").with_parent("t")).unwrap();
    assert!(matches!(
        h.reparent("t", &deepest),
        Err(HierarchyError::Cycle { .. })
    ));
    // t fits one level up, but not with its child.
    assert!(matches!(
        h.reparent("t", &above),
        Err(HierarchyError::Cycle { .. })
    ));
    h.reparent("t2", &above).unwrap();
    assert_eq!(h.depth("t2"), Some(MAX_DEPTH));
    assert!(h.sync().cyclic.is_empty());
}

#[test]
fn load_reports_chains_past_max_depth() {
    let mut shapes = vec![Shape::new("s1")];
    for level in 2..=MAX_DEPTH + 2 {
        let parent = format!("s{}", level - 1);
        shapes.push(Shape::new(format!("s{level}")).with_parent(parent.as_str()));
    }
    let mut h = Hierarchy::new();
    let report = h.load(shapes);
    let past = format!("s{}", MAX_DEPTH + 1);
    let further = format!("s{}", MAX_DEPTH + 2);
    assert_eq!(report.cyclic, vec![id(&past), id(&further)]);
    assert_eq!(h.depth(&format!("s{MAX_DEPTH}")), Some(MAX_DEPTH));
    assert_eq!(h.depth(&past), None);
}

#[test]
fn connect_validates_and_deduplicates() {
    let mut h = chain();
    assert_eq!(h.connect("A", "C"), Ok(true));
    assert_eq!(h.connect("A", "C"), Ok(false));
    assert_eq!(
        h.connect("A", "ghost"),
        Err(HierarchyError::UnknownShape(id("ghost")))
    );
    assert!(h.disconnect("A", "C"));
    assert!(!h.disconnect("A", "C"));
}
