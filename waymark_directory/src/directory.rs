// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorted directory rows and their revision-keyed cache.

use waymark_hierarchy::{Hierarchy, ShapeId};

use crate::label::{ShortLabel, short_label};
use crate::natural::natural_cmp;

/// One row of the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The shape.
    pub id: ShapeId,
    /// Depth below the root; top-level shapes are 1.
    pub depth: usize,
    /// Display label.
    pub label: ShortLabel,
}

/// Compute the directory for `hierarchy` from scratch.
///
/// Rows are ordered by depth, then by [`natural_cmp`] on the identifier.
/// Shapes caught in a parent cycle have no depth and are listed at depth 1.
pub fn synchronize(hierarchy: &Hierarchy) -> Vec<DirectoryEntry> {
    let mut entries: Vec<DirectoryEntry> = hierarchy
        .iter()
        .map(|shape| DirectoryEntry {
            id: shape.id().clone(),
            depth: hierarchy.depth(shape.id().as_str()).unwrap_or(1),
            label: short_label(hierarchy, shape),
        })
        .collect();
    entries.sort_by(|a, b| {
        a.depth
            .cmp(&b.depth)
            .then_with(|| natural_cmp(a.id.as_str(), b.id.as_str()))
    });
    entries
}

/// Cached directory that recomputes when the hierarchy's revision moves.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
    revision: Option<u64>,
}

impl Directory {
    /// An empty cache that computes on the first refresh.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `hierarchy` changed structurally since the last refresh.
    pub fn is_stale(&self, hierarchy: &Hierarchy) -> bool {
        self.revision != Some(hierarchy.revision())
    }

    /// Recompute if stale. Returns `true` if the entries were rebuilt.
    pub fn refresh(&mut self, hierarchy: &Hierarchy) -> bool {
        if !self.is_stale(hierarchy) {
            return false;
        }
        self.entries = synchronize(hierarchy);
        self.revision = Some(hierarchy.revision());
        tracing::debug!(
            rows = self.entries.len(),
            revision = hierarchy.revision(),
            "directory recomputed"
        );
        true
    }

    /// Drop the cache so the next refresh recomputes.
    pub fn invalidate(&mut self) {
        self.revision = None;
    }

    /// The cached rows.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// The cached row for `id`.
    pub fn get(&self, id: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Position of `id` in the cached rows.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
