// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integrity report produced by a full index rebuild.

use crate::types::ShapeId;

/// What [`Hierarchy::sync`](crate::Hierarchy::sync) found while rebuilding.
///
/// Loading never fails on bad references; problems are reported here and
/// logged, and the affected shapes are shown at the top level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// `(shape, missing parent)` pairs. These shapes are listed under the root.
    pub missing_parents: Vec<(ShapeId, ShapeId)>,
    /// Shapes whose parent chain loops or runs deeper than
    /// [`MAX_DEPTH`](crate::MAX_DEPTH).
    pub cyclic: Vec<ShapeId>,
    /// Connections that point at shapes that do not exist, as `(from, to)`.
    pub dangling_connections: Vec<(ShapeId, ShapeId)>,
    /// Hierarchy revision after the rebuild.
    pub revision: u64,
}

impl SyncReport {
    /// `true` if every reference resolved.
    pub fn is_clean(&self) -> bool {
        self.missing_parents.is_empty()
            && self.cyclic.is_empty()
            && self.dangling_connections.is_empty()
    }
}
