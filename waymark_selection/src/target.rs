// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Addressable selection targets.

use kurbo::Point;
use waymark_hierarchy::{Hierarchy, ShapeId};

/// An addressable selection unit: a shape, optionally one of its vertices, and
/// the world-space point where it was grabbed.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// The shape addressed.
    pub shape: ShapeId,
    /// The vertex addressed, or `None` for the whole shape.
    pub vertex: Option<usize>,
    /// Grab point in world space.
    pub point: Point,
}

impl Target {
    /// Target a whole shape.
    pub fn shape(shape: impl Into<ShapeId>, point: Point) -> Self {
        Self {
            shape: shape.into(),
            vertex: None,
            point,
        }
    }

    /// Target one vertex of a shape.
    pub fn vertex(shape: impl Into<ShapeId>, vertex: usize, point: Point) -> Self {
        Self {
            shape: shape.into(),
            vertex: Some(vertex),
            point,
        }
    }

    /// `true` if the shape (and the vertex, if any) still exists.
    pub fn is_live(&self, hierarchy: &Hierarchy) -> bool {
        match (hierarchy.get(self.shape.as_str()), self.vertex) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(shape), Some(v)) => v < shape.vertices.len(),
        }
    }
}
