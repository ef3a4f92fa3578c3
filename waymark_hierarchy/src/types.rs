// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy: shape identifiers and shape records.

use std::borrow::Borrow;
use std::fmt;

use kurbo::Point;

use crate::style::StyleBag;

/// Identifier of the synthetic root that contains every unparented shape.
pub const ROOT_ID: &str = "all";

/// Identifier of a shape.
///
/// Identifiers are user-visible names, unique across the hierarchy, and may be
/// changed with [`Hierarchy::rename`](crate::Hierarchy::rename). Parent and
/// connection edges are stored as identifiers, never as references.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ShapeId(String);

impl ShapeId {
    /// Wrap a name as an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The synthetic root identifier (`"all"`).
    pub fn root() -> Self {
        Self(ROOT_ID.into())
    }

    /// Returns `true` for the synthetic root.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShapeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ShapeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ShapeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An editable shape.
///
/// `id`, `parent`, and `connections` are structural and only change through
/// [`Hierarchy`](crate::Hierarchy) operations so that every reference stays
/// consistent. The remaining fields are plain data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub(crate) parent: ShapeId,
    pub(crate) connections: Vec<ShapeId>,
    /// Draw depth. Higher is drawn on top.
    pub z: f64,
    /// Ordered vertices in world space.
    pub vertices: Vec<Point>,
    /// Sparse style overrides on top of the editor template.
    pub style: StyleBag,
}

impl Shape {
    /// A shape with no vertices, parented to the root.
    pub fn new(id: impl Into<ShapeId>) -> Self {
        Self {
            id: id.into(),
            parent: ShapeId::root(),
            connections: Vec::new(),
            z: 0.0,
            vertices: Vec::new(),
            style: StyleBag::default(),
        }
    }

    /// Set the parent before insertion.
    pub fn with_parent(mut self, parent: impl Into<ShapeId>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Set the vertices.
    pub fn with_vertices(mut self, vertices: impl IntoIterator<Item = Point>) -> Self {
        self.vertices = vertices.into_iter().collect();
        self
    }

    /// Set the draw depth.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Set the style overrides.
    pub fn with_style(mut self, style: StyleBag) -> Self {
        self.style = style;
        self
    }

    /// Add a connection before insertion.
    pub fn with_connection(mut self, to: impl Into<ShapeId>) -> Self {
        self.connections.push(to.into());
        self
    }

    /// This shape's identifier.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The parent identifier as stored. It may dangle after a delete.
    pub fn parent(&self) -> &ShapeId {
        &self.parent
    }

    /// Identifiers of the shapes this one is connected to.
    pub fn connections(&self) -> &[ShapeId] {
        &self.connections
    }

    /// The vertex at `index`, if any.
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }
}
