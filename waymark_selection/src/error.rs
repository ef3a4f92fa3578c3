// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection errors.

use thiserror::Error;
use waymark_hierarchy::ShapeId;

/// Errors from selection bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The target's shape has been deleted.
    #[error("target `{0}` no longer exists")]
    StaleTarget(ShapeId),
}
