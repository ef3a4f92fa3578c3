// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core hierarchy: storage, reverse index, structural edits, queries.

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use smallvec::SmallVec;

use crate::error::HierarchyError;
use crate::report::SyncReport;
use crate::types::{ROOT_ID, Shape, ShapeId};

/// Upper bound on parent-chain walks.
///
/// Every ancestor walk stops after this many steps, so corrupted data with a
/// parent cycle cannot hang the editor.
pub const MAX_DEPTH: usize = 100;

type Children = SmallVec<[ShapeId; 4]>;

/// The shape hierarchy.
///
/// Shapes are keyed by [`ShapeId`]. Each shape stores its parent's identifier,
/// and the hierarchy keeps a reverse `contains` index from parent to children
/// so tree views do not have to scan every shape. Depths are memoized and
/// recomputed on structural edits only.
///
/// The synthetic root [`ROOT_ID`] is never stored as a shape. Shapes whose
/// parent is missing are listed under the root for display but keep their
/// stored parent until [`Hierarchy::repair_orphans`] runs.
///
/// ## Example
///
/// ```rust
/// use waymark_hierarchy::{Hierarchy, HierarchyError, Shape};
///
/// let mut h = Hierarchy::new();
/// h.insert(Shape::new("A")).unwrap();
/// h.insert(Shape::new("B").with_parent("A")).unwrap();
/// h.insert(Shape::new("C").with_parent("B")).unwrap();
///
/// // A cannot move under its own grandchild.
/// assert!(matches!(h.reparent("A", "C"), Err(HierarchyError::Cycle { .. })));
///
/// h.reparent("B", "all").unwrap();
/// assert_eq!(h.depth("B"), Some(1));
/// assert_eq!(h.depth("C"), Some(2));
/// assert!(h.children_of("A").is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    shapes: HashMap<ShapeId, Shape>,
    /// parent -> children; an entry exists only while its list is non-empty.
    contains: HashMap<ShapeId, Children>,
    depths: HashMap<ShapeId, usize>,
    revision: u64,
}

impl Hierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hierarchy from loaded shapes. See [`Hierarchy::load`].
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut h = Self::new();
        h.load(shapes);
        h
    }

    /// Replace every shape with `shapes` and rebuild all indices.
    ///
    /// Loading is tolerant: duplicate identifiers keep the last record, a shape
    /// named like the root is skipped, and bad references are reported rather
    /// than rejected.
    pub fn load(&mut self, shapes: impl IntoIterator<Item = Shape>) -> SyncReport {
        self.shapes.clear();
        for shape in shapes {
            if shape.id.is_root() {
                tracing::warn!("skipping shape that uses the reserved root id");
                continue;
            }
            if let Some(prev) = self.shapes.insert(shape.id.clone(), shape) {
                tracing::warn!(id = %prev.id, "duplicate shape id, keeping the later record");
            }
        }
        self.sync()
    }

    /// Rebuild the `contains` index and the depth memo from the parent fields.
    pub fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        self.contains.clear();

        let mut ids: Vec<&ShapeId> = self.shapes.keys().collect();
        ids.sort();
        for id in ids {
            let Some(shape) = self.shapes.get(id) else {
                continue;
            };
            let listed = if shape.parent.is_root() || self.shapes.contains_key(&shape.parent) {
                shape.parent.clone()
            } else {
                tracing::warn!(%id, parent = %shape.parent, "shape refers to a missing parent");
                report
                    .missing_parents
                    .push((id.clone(), shape.parent.clone()));
                ShapeId::root()
            };
            self.contains.entry(listed).or_default().push(id.clone());
            for to in &shape.connections {
                if !self.shapes.contains_key(to) {
                    tracing::warn!(from = %id, %to, "dangling connection");
                    report.dangling_connections.push((id.clone(), to.clone()));
                }
            }
        }

        report.cyclic = self.rebuild_depths();
        for id in &report.cyclic {
            tracing::warn!(%id, "parent chain never reaches the root");
        }
        self.revision += 1;
        report.revision = self.revision;
        tracing::debug!(
            shapes = self.shapes.len(),
            clean = report.is_clean(),
            revision = self.revision,
            "hierarchy synced"
        );
        report
    }

    /// Insert a new shape under its stored parent.
    ///
    /// Orphans whose dangling parent names the new shape are adopted by it.
    /// Rejected with [`HierarchyError::Cycle`] if the shape or an adopted
    /// subtree would end up deeper than [`MAX_DEPTH`], or an adoptee is an
    /// ancestor of the new shape.
    pub fn insert(&mut self, shape: Shape) -> Result<(), HierarchyError> {
        if shape.id.is_root() || self.shapes.contains_key(&shape.id) {
            return Err(HierarchyError::DuplicateId(shape.id));
        }
        if shape.parent == shape.id {
            return Err(HierarchyError::Cycle {
                child: shape.id.clone(),
                parent: shape.parent,
            });
        }
        if !self.resolves(shape.parent.as_str()) {
            return Err(HierarchyError::MissingParent {
                child: shape.id,
                parent: shape.parent,
            });
        }
        let Some(depth) = self
            .depth(shape.parent.as_str())
            .map(|d| d + 1)
            .filter(|&d| d <= MAX_DEPTH)
        else {
            tracing::debug!(id = %shape.id, parent = %shape.parent, "insert rejected: too deep");
            return Err(HierarchyError::Cycle {
                child: shape.id,
                parent: shape.parent,
            });
        };
        let adopted = self.waiting_on(&shape.id);
        for a in &adopted {
            if self.creates_cycle(a.as_str(), shape.parent.as_str())
                || depth + 1 + self.height(a.as_str()) > MAX_DEPTH
            {
                return Err(HierarchyError::Cycle {
                    child: a.clone(),
                    parent: shape.id,
                });
            }
        }

        let id = shape.id.clone();
        let parent = shape.parent.clone();
        self.shapes.insert(id.clone(), shape);
        self.link(&id, &parent);
        for a in &adopted {
            self.unlink(a, &ShapeId::root());
            self.link(a, &id);
        }
        if adopted.is_empty() {
            self.depths.insert(id.clone(), depth);
        } else {
            self.rebuild_depths();
        }
        self.revision += 1;
        tracing::debug!(%id, %parent, adopted = adopted.len(), "shape inserted");
        Ok(())
    }

    /// Move `child` under `new_parent`.
    ///
    /// Rejected with [`HierarchyError::Cycle`] if `new_parent` is `child` or one
    /// of its descendants, or if `child`'s subtree would end up deeper than
    /// [`MAX_DEPTH`]. Nothing changes when an error is returned.
    pub fn reparent(&mut self, child: &str, new_parent: &str) -> Result<(), HierarchyError> {
        if child == ROOT_ID {
            return Err(HierarchyError::RootIsImmutable);
        }
        let Some(shape) = self.shapes.get(child) else {
            return Err(HierarchyError::UnknownShape(child.into()));
        };
        if !self.resolves(new_parent) {
            return Err(HierarchyError::MissingParent {
                child: child.into(),
                parent: new_parent.into(),
            });
        }
        if !self.fits_under(child, new_parent) {
            tracing::debug!(child, new_parent, "reparent rejected: cycle or too deep");
            return Err(HierarchyError::Cycle {
                child: child.into(),
                parent: new_parent.into(),
            });
        }
        let child_id = shape.id.clone();
        let old_listing = self.listing_of(&shape.parent);
        let new_parent_id = ShapeId::new(new_parent);
        if shape.parent == new_parent_id {
            return Ok(());
        }

        self.unlink(&child_id, &old_listing);
        self.link(&child_id, &new_parent_id);
        if let Some(shape) = self.shapes.get_mut(child) {
            shape.parent = new_parent_id;
        }
        self.rebuild_depths();
        self.revision += 1;
        tracing::debug!(child, new_parent, "shape reparented");
        Ok(())
    }

    /// Rename `old` to `new`, rewriting every reference to it.
    ///
    /// Children's parent fields, the `contains` index, connections, and the
    /// depth memo all move to the new identifier in one step. Orphans whose
    /// dangling parent is `new` are adopted, unless that would close a cycle
    /// or exceed [`MAX_DEPTH`], in which case nothing changes and
    /// [`HierarchyError::Cycle`] is returned.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), HierarchyError> {
        if old == ROOT_ID {
            return Err(HierarchyError::RootIsImmutable);
        }
        if !self.shapes.contains_key(old) {
            return Err(HierarchyError::UnknownShape(old.into()));
        }
        if old == new {
            return Ok(());
        }
        if new == ROOT_ID || self.shapes.contains_key(new) {
            return Err(HierarchyError::DuplicateId(new.into()));
        }
        let new_id = ShapeId::new(new);
        if self.shapes.get(old).is_some_and(|s| s.parent == new_id) {
            return Err(HierarchyError::Cycle {
                child: old.into(),
                parent: new_id,
            });
        }
        let adopted = self.waiting_on(&new_id);
        if let Some(a) = adopted.iter().find(|a| !self.fits_under(a.as_str(), old)) {
            tracing::debug!(old, new, adoptee = %a, "rename rejected: adoption would cycle");
            return Err(HierarchyError::Cycle {
                child: a.clone(),
                parent: new_id,
            });
        }
        let Some(mut shape) = self.shapes.remove(old) else {
            return Err(HierarchyError::UnknownShape(old.into()));
        };

        // Entry in the parent's list, in place so sibling order is kept.
        let listing = self.listing_of(&shape.parent);
        if let Some(siblings) = self.contains.get_mut(&listing) {
            for sibling in siblings.iter_mut() {
                if sibling == old {
                    *sibling = new_id.clone();
                }
            }
        }

        // Orphans that dangled on the new name now resolve to this shape.
        for id in &adopted {
            self.unlink(id, &ShapeId::root());
        }

        let mut children = self.contains.remove(old).unwrap_or_default();
        children.extend(adopted);
        for s in self.shapes.values_mut() {
            if s.parent == old {
                s.parent = new_id.clone();
            }
            for c in s.connections.iter_mut() {
                if c == old {
                    *c = new_id.clone();
                }
            }
        }
        for c in shape.connections.iter_mut() {
            if c == old {
                *c = new_id.clone();
            }
        }
        if shape.parent == old {
            shape.parent = new_id.clone();
        }
        if !children.is_empty() {
            self.contains.insert(new_id.clone(), children);
        }

        shape.id = new_id.clone();
        self.shapes.insert(new_id, shape);
        self.rebuild_depths();
        self.revision += 1;
        tracing::debug!(old, new, "shape renamed");
        Ok(())
    }

    /// Delete a single shape.
    ///
    /// Children are not deleted. They keep their stored parent, which now
    /// dangles, and are listed under the root until
    /// [`Hierarchy::repair_orphans`] adopts them. Connections pointing at the
    /// deleted shape are dropped.
    pub fn delete(&mut self, id: &str) -> Result<Shape, HierarchyError> {
        if id == ROOT_ID {
            return Err(HierarchyError::RootIsImmutable);
        }
        let Some(shape) = self.shapes.remove(id) else {
            return Err(HierarchyError::UnknownShape(id.into()));
        };
        let listing = self.listing_of(&shape.parent);
        self.unlink(&shape.id, &listing);

        let orphans = self.contains.remove(id).unwrap_or_default();
        let orphan_count = orphans.len();
        if !orphans.is_empty() {
            self.contains
                .entry(ShapeId::root())
                .or_default()
                .extend(orphans);
        }
        for s in self.shapes.values_mut() {
            s.connections.retain(|c| c != id);
        }
        self.rebuild_depths();
        self.revision += 1;
        tracing::debug!(id, orphans = orphan_count, "shape deleted");
        Ok(shape)
    }

    /// Delete a shape together with all of its descendants.
    ///
    /// Returns the removed shapes, the requested one first.
    pub fn delete_subtree(&mut self, id: &str) -> Result<Vec<Shape>, HierarchyError> {
        if id == ROOT_ID {
            return Err(HierarchyError::RootIsImmutable);
        }
        let Some(shape) = self.shapes.get(id) else {
            return Err(HierarchyError::UnknownShape(id.into()));
        };
        let listing = self.listing_of(&shape.parent);
        let mut doomed = vec![shape.id.clone()];
        doomed.extend(self.descendants(id));
        let doomed_set: HashSet<&ShapeId> = doomed.iter().collect();

        self.unlink(&doomed[0], &listing);
        let mut removed = Vec::with_capacity(doomed.len());
        for d in &doomed {
            self.contains.remove(d);
            if let Some(s) = self.shapes.remove(d) {
                removed.push(s);
            }
        }
        for s in self.shapes.values_mut() {
            s.connections.retain(|c| !doomed_set.contains(c));
        }
        self.rebuild_depths();
        self.revision += 1;
        tracing::debug!(id, removed = removed.len(), "subtree deleted");
        Ok(removed)
    }

    /// Give every shape with a dangling parent the root as its parent.
    ///
    /// Returns the adopted identifiers in sorted order.
    pub fn repair_orphans(&mut self) -> Vec<ShapeId> {
        let mut adopted: Vec<ShapeId> = self.orphans().into_iter().cloned().collect();
        adopted.sort();
        for id in &adopted {
            if let Some(s) = self.shapes.get_mut(id) {
                s.parent = ShapeId::root();
            }
        }
        if !adopted.is_empty() {
            self.revision += 1;
            tracing::debug!(count = adopted.len(), "orphans adopted by the root");
        }
        adopted
    }

    /// Copy a shape under the same parent with a fresh identifier.
    ///
    /// With `split_at = Some(k)` the vertices are partitioned instead of
    /// copied: the original keeps `0..k` and the copy receives `k..`. `k` must
    /// satisfy `0 < k < len`. The copy keeps z and style but no connections.
    pub fn duplicate(
        &mut self,
        id: &str,
        split_at: Option<usize>,
    ) -> Result<ShapeId, HierarchyError> {
        let Some(original) = self.shapes.get(id) else {
            return Err(HierarchyError::UnknownShape(id.into()));
        };
        let len = original.vertices.len();
        if let Some(index) = split_at
            && (index == 0 || index >= len)
        {
            return Err(HierarchyError::InvalidSplit {
                id: id.into(),
                index,
                len,
            });
        }

        let new_id = self.fresh_id(id);
        let mut copy = Shape {
            id: new_id.clone(),
            parent: original.parent.clone(),
            connections: Vec::new(),
            z: original.z,
            vertices: original.vertices.clone(),
            style: original.style.clone(),
        };
        if let Some(index) = split_at
            && let Some(original) = self.shapes.get_mut(id)
        {
            copy.vertices = original.vertices.split_off(index);
        }

        let listing = self.listing_of(&copy.parent);
        let depth = self.depths.get(id).copied();
        self.shapes.insert(new_id.clone(), copy);
        self.link(&new_id, &listing);
        if let Some(d) = depth {
            self.depths.insert(new_id.clone(), d);
        }
        self.revision += 1;
        tracing::debug!(id, copy = %new_id, split = ?split_at, "shape duplicated");
        Ok(new_id)
    }

    /// The smallest unused identifier of the form `"<base> <n>"` with `n >= 2`.
    ///
    /// A trailing number on `base` is continued rather than appended to, so
    /// duplicating `"wall 2"` yields `"wall 3"`.
    pub fn fresh_id(&self, base: &str) -> ShapeId {
        let (stem, start) = match base.rsplit_once(' ') {
            Some((stem, n)) if !stem.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => {
                let start = n.parse::<u64>().map_or(2, |n| n.saturating_add(1).max(2));
                (stem, start)
            }
            _ => (base, 2),
        };
        let mut n = start;
        loop {
            let candidate = format!("{stem} {n}");
            if !self.shapes.contains_key(candidate.as_str()) && candidate != ROOT_ID {
                return ShapeId::new(candidate);
            }
            n += 1;
        }
    }

    /// Add a connection from `from` to `to`. Returns `false` if already present.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<bool, HierarchyError> {
        if !self.shapes.contains_key(to) {
            return Err(HierarchyError::UnknownShape(to.into()));
        }
        let Some(shape) = self.shapes.get_mut(from) else {
            return Err(HierarchyError::UnknownShape(from.into()));
        };
        if shape.connections.iter().any(|c| c == to) {
            return Ok(false);
        }
        shape.connections.push(to.into());
        Ok(true)
    }

    /// Remove the connection from `from` to `to`. Returns `true` if one existed.
    pub fn disconnect(&mut self, from: &str, to: &str) -> bool {
        let Some(shape) = self.shapes.get_mut(from) else {
            return false;
        };
        let before = shape.connections.len();
        shape.connections.retain(|c| c != to);
        shape.connections.len() != before
    }

    /// Replace a shape's vertices, returning the previous ones.
    pub fn set_vertices(
        &mut self,
        id: &str,
        vertices: Vec<Point>,
    ) -> Result<Vec<Point>, HierarchyError> {
        let shape = self.shape_mut(id)?;
        Ok(core::mem::replace(&mut shape.vertices, vertices))
    }

    /// Move one vertex, returning its previous position.
    pub fn set_vertex(&mut self, id: &str, index: usize, to: Point) -> Result<Point, HierarchyError> {
        let shape = self.shape_mut(id)?;
        match shape.vertices.get_mut(index) {
            Some(v) => Ok(core::mem::replace(v, to)),
            None => Err(HierarchyError::InvalidVertex {
                id: id.into(),
                index,
            }),
        }
    }

    /// Remove one vertex, returning it.
    pub fn remove_vertex(&mut self, id: &str, index: usize) -> Result<Point, HierarchyError> {
        let shape = self.shape_mut(id)?;
        if index >= shape.vertices.len() {
            return Err(HierarchyError::InvalidVertex {
                id: id.into(),
                index,
            });
        }
        Ok(shape.vertices.remove(index))
    }

    /// Get a shape.
    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Get a shape for editing its plain data (z, vertices, style).
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// `true` if a shape with this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Number of shapes, excluding the root.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` if there are no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate shapes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// All shapes cloned and sorted by identifier, for persistence.
    pub fn to_vec(&self) -> Vec<Shape> {
        let mut out: Vec<Shape> = self.shapes.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Children listed under `id`, or an empty slice.
    ///
    /// The root lists top-level shapes and shapes with a missing parent.
    pub fn children_of(&self, id: &str) -> &[ShapeId] {
        self.contains.get(id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// The stored parent of `id`.
    pub fn parent_of(&self, id: &str) -> Option<&ShapeId> {
        self.shapes.get(id).map(|s| &s.parent)
    }

    /// Memoized depth: 0 for the root, 1 for top-level shapes.
    ///
    /// `None` for unknown shapes and shapes on a parent cycle.
    pub fn depth(&self, id: &str) -> Option<usize> {
        if id == ROOT_ID {
            return Some(0);
        }
        self.depths.get(id).copied()
    }

    /// Ancestors of `id` from its parent up to and including the root.
    ///
    /// A dangling parent ends the walk at the root. The walk is bounded by
    /// [`MAX_DEPTH`].
    pub fn ancestors(&self, id: &str) -> Vec<ShapeId> {
        let mut out = Vec::new();
        let Some(mut cur) = self.shapes.get(id) else {
            return out;
        };
        for _ in 0..MAX_DEPTH {
            if cur.parent.is_root() {
                out.push(ShapeId::root());
                return out;
            }
            out.push(cur.parent.clone());
            match self.shapes.get(&cur.parent) {
                Some(next) => cur = next,
                None => {
                    out.push(ShapeId::root());
                    return out;
                }
            }
        }
        out
    }

    /// Descendants of `id` in breadth-first order, excluding `id`.
    pub fn descendants(&self, id: &str) -> Vec<ShapeId> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);
        let mut frontier: Vec<&str> = vec![id];
        while !frontier.is_empty() {
            for parent in core::mem::take(&mut frontier) {
                for child in self.children_of(parent) {
                    if seen.insert(child.as_str()) {
                        out.push(child.clone());
                        frontier.push(child.as_str());
                    }
                }
            }
        }
        out
    }

    /// `true` if `ancestor` is a proper ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    /// Shapes whose stored parent does not exist.
    pub fn orphans(&self) -> Vec<&ShapeId> {
        self.shapes
            .values()
            .filter(|s| !self.resolves(s.parent.as_str()))
            .map(|s| &s.id)
            .collect()
    }

    /// Counter bumped by every structural change (insert, load, reparent,
    /// rename, delete, duplicate, orphan repair).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn shape_mut(&mut self, id: &str) -> Result<&mut Shape, HierarchyError> {
        self.shapes
            .get_mut(id)
            .ok_or_else(|| HierarchyError::UnknownShape(id.into()))
    }

    fn resolves(&self, parent: &str) -> bool {
        parent == ROOT_ID || self.shapes.contains_key(parent)
    }

    /// The `contains` key a shape with this stored parent is listed under.
    fn listing_of(&self, parent: &ShapeId) -> ShapeId {
        if self.resolves(parent.as_str()) {
            parent.clone()
        } else {
            ShapeId::root()
        }
    }

    /// Shapes whose stored parent is `id`, which does not exist yet.
    fn waiting_on(&self, id: &ShapeId) -> Vec<ShapeId> {
        let mut out: Vec<ShapeId> = self
            .shapes
            .values()
            .filter(|s| s.parent == *id)
            .map(|s| s.id.clone())
            .collect();
        out.sort();
        out
    }

    /// Levels below `id`: 0 for a leaf.
    fn height(&self, id: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);
        let mut frontier: Vec<&str> = vec![id];
        let mut levels = 0;
        loop {
            let next: Vec<&str> = frontier
                .iter()
                .flat_map(|p| self.children_of(p))
                .map(ShapeId::as_str)
                .filter(|c| seen.insert(*c))
                .collect();
            if next.is_empty() {
                return levels;
            }
            levels += 1;
            frontier = next;
        }
    }

    /// `true` if `child`'s subtree can move under `parent` without closing a
    /// cycle or running past [`MAX_DEPTH`].
    fn fits_under(&self, child: &str, parent: &str) -> bool {
        !self.creates_cycle(child, parent)
            && self
                .depth(parent)
                .is_some_and(|d| d + 1 + self.height(child) <= MAX_DEPTH)
    }

    fn creates_cycle(&self, child: &str, new_parent: &str) -> bool {
        let mut cur = new_parent;
        for _ in 0..=MAX_DEPTH {
            if cur == child {
                return true;
            }
            if cur == ROOT_ID {
                return false;
            }
            match self.shapes.get(cur) {
                Some(s) => cur = s.parent.as_str(),
                None => return false,
            }
        }
        true
    }

    fn link(&mut self, id: &ShapeId, parent: &ShapeId) {
        self.contains
            .entry(parent.clone())
            .or_default()
            .push(id.clone());
    }

    fn unlink(&mut self, id: &ShapeId, parent: &ShapeId) {
        if let Some(children) = self.contains.get_mut(parent) {
            children.retain(|c| c != id);
            if children.is_empty() {
                self.contains.remove(parent);
            }
        }
    }

    /// Recompute every depth, sharing work along common ancestor chains.
    ///
    /// Returns shapes whose chain loops or runs deeper than [`MAX_DEPTH`],
    /// sorted. Those shapes get no depth.
    fn rebuild_depths(&mut self) -> Vec<ShapeId> {
        let shapes = &self.shapes;
        let depths = &mut self.depths;
        depths.clear();
        let mut cyclic = Vec::new();
        let mut chain: Vec<&ShapeId> = Vec::new();
        let mut on_chain: HashSet<&ShapeId> = HashSet::new();
        for id in shapes.keys() {
            if depths.contains_key(id) {
                continue;
            }
            chain.clear();
            on_chain.clear();
            let mut cur = id;
            let base = loop {
                if cur.is_root() {
                    break Some(0);
                }
                if let Some(&d) = depths.get(cur) {
                    break Some(d);
                }
                if !on_chain.insert(cur) {
                    break None;
                }
                match shapes.get(cur) {
                    Some(s) => {
                        chain.push(cur);
                        cur = &s.parent;
                    }
                    // Dangling parent: displayed at the top level.
                    None => break Some(0),
                }
            };
            match base {
                Some(base) => {
                    for (i, c) in chain.iter().rev().enumerate() {
                        depths.insert((*c).clone(), base + i + 1);
                    }
                }
                None => cyclic.push(id.clone()),
            }
        }
        depths.retain(|id, d| {
            if *d > MAX_DEPTH {
                cyclic.push(id.clone());
                return false;
            }
            true
        });
        cyclic.sort();
        cyclic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Hierarchy {
        let mut h = Hierarchy::new();
        h.insert(Shape::new("A")).unwrap();
        h.insert(Shape::new("B").with_parent("A")).unwrap();
        h.insert(Shape::new("C").with_parent("B")).unwrap();
        h
    }

    #[test]
    fn insert_links_and_memoizes_depth() {
        let h = abc();
        assert_eq!(h.children_of("all"), &[ShapeId::from("A")]);
        assert_eq!(h.children_of("A"), &[ShapeId::from("B")]);
        assert_eq!(h.depth("all"), Some(0));
        assert_eq!(h.depth("A"), Some(1));
        assert_eq!(h.depth("C"), Some(3));
    }

    #[test]
    fn insert_rejects_duplicates_and_missing_parents() {
        let mut h = abc();
        assert_eq!(
            h.insert(Shape::new("B")),
            Err(HierarchyError::DuplicateId("B".into()))
        );
        assert_eq!(
            h.insert(Shape::new("all")),
            Err(HierarchyError::DuplicateId("all".into()))
        );
        assert!(matches!(
            h.insert(Shape::new("D").with_parent("nowhere")),
            Err(HierarchyError::MissingParent { .. })
        ));
    }

    #[test]
    fn reparent_to_self_is_a_cycle() {
        let mut h = abc();
        let rev = h.revision();
        assert!(matches!(
            h.reparent("B", "B"),
            Err(HierarchyError::Cycle { .. })
        ));
        assert_eq!(h.revision(), rev);
    }

    #[test]
    fn reparent_root_is_rejected() {
        let mut h = abc();
        assert_eq!(h.reparent("all", "A"), Err(HierarchyError::RootIsImmutable));
    }

    #[test]
    fn cyclic_load_terminates_and_reports() {
        let mut h = Hierarchy::new();
        let report = h.load([
            Shape::new("x").with_parent("y"),
            Shape::new("y").with_parent("x"),
            Shape::new("z"),
        ]);
        assert_eq!(report.cyclic, vec![ShapeId::from("x"), ShapeId::from("y")]);
        assert_eq!(h.depth("x"), None);
        assert_eq!(h.depth("z"), Some(1));
        assert_eq!(h.ancestors("x").len(), MAX_DEPTH);
    }

    #[test]
    fn fresh_id_continues_trailing_numbers() {
        let mut h = Hierarchy::new();
        h.insert(Shape::new("wall")).unwrap();
        assert_eq!(h.fresh_id("wall"), ShapeId::from("wall 2"));
        h.insert(Shape::new("wall 2")).unwrap();
        assert_eq!(h.fresh_id("wall"), ShapeId::from("wall 3"));
        assert_eq!(h.fresh_id("wall 2"), ShapeId::from("wall 3"));
        assert_eq!(h.fresh_id("gate 0"), ShapeId::from("gate 2"));
    }

    #[test]
    fn descendants_are_breadth_first() {
        let mut h = abc();
        h.insert(Shape::new("B2").with_parent("A")).unwrap();
        assert_eq!(
            h.descendants("A"),
            vec![ShapeId::from("B"), ShapeId::from("B2"), ShapeId::from("C")]
        );
        assert!(h.is_ancestor("A", "C"));
        assert!(!h.is_ancestor("C", "A"));
    }

    #[test]
    fn vertex_edits_validate_indices() {
        let mut h = Hierarchy::new();
        h.insert(Shape::new("s").with_vertices([Point::ZERO, Point::new(1.0, 0.0)]))
            .unwrap();
        let rev = h.revision();
        assert_eq!(h.set_vertex("s", 1, Point::new(2.0, 0.0)), Ok(Point::new(1.0, 0.0)));
        assert!(matches!(
            h.remove_vertex("s", 5),
            Err(HierarchyError::InvalidVertex { index: 5, .. })
        ));
        assert_eq!(h.remove_vertex("s", 0), Ok(Point::ZERO));
        assert_eq!(h.get("s").unwrap().vertices, vec![Point::new(2.0, 0.0)]);
        // Geometry edits are not structural.
        assert_eq!(h.revision(), rev);
    }
}
