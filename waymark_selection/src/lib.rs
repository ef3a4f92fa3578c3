// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Selection: drag targets and revert-on-cancel editing.
//!
//! A [`Target`] addresses a shape, optionally one vertex of it, and the point
//! where it was grabbed. [`Selection`] keeps one engaged target per pointer
//! button and, when a target is engaged, snapshots the shape's full vertex
//! list. Drags are applied relative to that snapshot, and an escape while the
//! button is still down puts the snapshot back verbatim.
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use waymark_hierarchy::{Hierarchy, Shape};
//! use waymark_input::{Button, ButtonSet};
//! use waymark_selection::{CancelOutcome, Selection, Target};
//!
//! let mut h = Hierarchy::from_shapes([
//!     Shape::new("gate").with_vertices([Point::new(0.0, 0.0), Point::new(4.0, 0.0)]),
//! ]);
//! let mut selection = Selection::new();
//! selection.select(Target::vertex("gate", 1, Point::new(4.0, 0.0)), &h).unwrap();
//!
//! // Drag while the primary button is held, then change our mind.
//! selection.drag(Button::Primary, Vec2::new(0.0, 3.0), &mut h).unwrap();
//! assert_eq!(h.get("gate").unwrap().vertices[1], Point::new(4.0, 3.0));
//!
//! let outcome = selection.cancel(ButtonSet::PRIMARY, &mut h);
//! assert_eq!(outcome, CancelOutcome::Reverted);
//! assert_eq!(h.get("gate").unwrap().vertices[1], Point::new(4.0, 0.0));
//! assert!(selection.primary().is_none());
//! ```
//!
//! Targets name shapes by identifier, so they can go stale when a shape is
//! deleted. Operations that need the shape report
//! [`SelectionError::StaleTarget`], and [`Selection::retain_live`] sweeps stale
//! targets after structural edits.

mod error;
mod selection;
mod target;

pub use error::SelectionError;
pub use selection::{CancelOutcome, Selection};
pub use target::Target;
