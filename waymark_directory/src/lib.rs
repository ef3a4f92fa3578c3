// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Directory: the flat, labelled listing behind the editor's tree view.
//!
//! [`synchronize`] turns a [`Hierarchy`](waymark_hierarchy::Hierarchy) into
//! rows of `(shape, depth, short label)`, ordered by depth and then by a
//! numeric-aware comparison of identifiers ([`natural_cmp`]), so `"wall 9"`
//! precedes `"wall 10"`.
//!
//! Identifiers in a map tend to repeat their parent's name (`"room"`,
//! `"room wall"`, `"room wall 2"`). The short label drops the closest
//! ancestor name that prefixes the identifier and marks how far up that
//! ancestor was; identifiers no ancestor prefixes get a bullet instead.
//!
//! ```rust
//! use waymark_directory::synchronize;
//! use waymark_hierarchy::{Hierarchy, Shape};
//!
//! let h = Hierarchy::from_shapes([
//!     Shape::new("room"),
//!     Shape::new("room wall").with_parent("room"),
//!     Shape::new("room wall 10").with_parent("room"),
//!     Shape::new("room wall 2").with_parent("room"),
//! ]);
//! let labels: Vec<String> = synchronize(&h).iter().map(|e| e.label.to_string()).collect();
//! assert_eq!(labels, ["\u{2022} room", "wall", "wall 2", "wall 10"]);
//! ```
//!
//! The listing is a pure function of the hierarchy. [`Directory`] caches it
//! and recomputes in full whenever the hierarchy's revision changes.

mod directory;
mod label;
mod natural;

pub use directory::{Directory, DirectoryEntry, synchronize};
pub use label::{ASCENSION_MARKER, BULLET_MARKER, ShortLabel, short_label};
pub use natural::natural_cmp;
