// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by structural hierarchy operations.

use thiserror::Error;

use crate::types::ShapeId;

/// A rejected hierarchy mutation. The hierarchy is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The new parent is the shape itself or one of its descendants, or the
    /// parent chain exceeded [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("moving `{child}` under `{parent}` would create a cycle")]
    Cycle {
        /// Shape being moved.
        child: ShapeId,
        /// Requested parent.
        parent: ShapeId,
    },
    /// Another shape (or the root) already uses this identifier.
    #[error("a shape named `{0}` already exists")]
    DuplicateId(ShapeId),
    /// The requested parent does not exist.
    #[error("parent `{parent}` of `{child}` does not exist")]
    MissingParent {
        /// Shape being placed.
        child: ShapeId,
        /// Requested parent.
        parent: ShapeId,
    },
    /// No shape has this identifier.
    #[error("no shape named `{0}`")]
    UnknownShape(ShapeId),
    /// A split index outside `1..len`.
    #[error("cannot split `{id}` at vertex {index}: it has {len} vertices")]
    InvalidSplit {
        /// Shape being split.
        id: ShapeId,
        /// Requested split index.
        index: usize,
        /// Vertex count.
        len: usize,
    },
    /// A vertex index past the end of the vertex list.
    #[error("`{id}` has no vertex {index}")]
    InvalidVertex {
        /// Shape addressed.
        id: ShapeId,
        /// Requested vertex index.
        index: usize,
    },
    /// The synthetic root cannot be moved, renamed, or deleted.
    #[error("the root `all` cannot be modified")]
    RootIsImmutable,
}
