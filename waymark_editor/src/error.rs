// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons an intent is rejected.

use thiserror::Error;
use waymark_hierarchy::{HierarchyError, ShapeId};
use waymark_selection::SelectionError;

use crate::collaborators::PersistenceError;

/// Why an [`Intent`](crate::Intent) was rejected.
///
/// Rejections are never fatal: the intent is dropped, logged, and listed in
/// the [`FrameReport`](crate::FrameReport).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EditorError {
    /// A structural edit was refused by the hierarchy.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    /// A selection operation referred to a deleted shape.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// The intent named a shape that no longer exists.
    #[error("intent refers to deleted shape `{0}`")]
    StaleTarget(ShapeId),
    /// The persistence backend failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// The undo history is exhausted.
    #[error("nothing to undo")]
    NothingToUndo,
}
