// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Hierarchy: the shape tree behind the editor's directory and menus.
//!
//! ## Overview
//!
//! Shapes are named polygons and polylines. Each one stores the identifier of
//! its parent, and every shape without a real parent hangs off the synthetic
//! root `"all"` ([`ROOT_ID`]). Identifiers double as display names, so renames
//! are common and have to be atomic.
//!
//! [`Hierarchy`] owns all shapes and keeps three things consistent:
//!
//! - A reverse `contains` index (parent to children) for tree views.
//! - A memoized depth per shape, rebuilt on structural edits.
//! - A revision counter that caches such as the directory key off.
//!
//! Structural operations validate first and mutate second, so a rejected
//! [`Hierarchy::reparent`] or [`Hierarchy::rename`] leaves everything as it was.
//! Every parent-chain walk is bounded by [`MAX_DEPTH`], which keeps corrupted
//! input (for example a saved file with a parent cycle) from hanging the editor.
//!
//! Loading is tolerant. [`Hierarchy::load`] accepts missing parents, dangling
//! connections, and cycles, lists the affected shapes at the top level, and
//! returns a [`SyncReport`] describing what it found.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_hierarchy::{Hierarchy, Shape};
//!
//! let mut h = Hierarchy::new();
//! h.insert(Shape::new("room")).unwrap();
//! h.insert(
//!     Shape::new("room wall")
//!         .with_parent("room")
//!         .with_vertices([Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 3.0)]),
//! )
//! .unwrap();
//!
//! // Split the wall at its second vertex.
//! let copy = h.duplicate("room wall", Some(1)).unwrap();
//! assert_eq!(copy.as_str(), "room wall 2");
//! assert_eq!(h.get("room wall").unwrap().vertices.len(), 1);
//! assert_eq!(h.get("room wall 2").unwrap().vertices.len(), 2);
//!
//! h.rename("room", "hall").unwrap();
//! assert_eq!(h.parent_of("room wall").unwrap().as_str(), "hall");
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`Shape`], [`ShapeId`],
//!   [`StyleBag`], [`StyleValue`], and [`Template`].

mod error;
mod hierarchy;
mod report;
mod style;
mod types;

pub use error::HierarchyError;
pub use hierarchy::{Hierarchy, MAX_DEPTH};
pub use report::SyncReport;
pub use style::{StyleBag, StyleValue, Template};
pub use types::{ROOT_ID, Shape, ShapeId};
