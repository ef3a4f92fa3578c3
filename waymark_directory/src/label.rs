// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Short display labels derived from ancestor identifiers.

use core::fmt;

use waymark_hierarchy::{Hierarchy, MAX_DEPTH, Shape};

/// Marker prepended once per ancestor skipped before the stripped prefix.
pub const ASCENSION_MARKER: char = '\u{2191}';

/// Marker prepended to labels that could not be shortened.
pub const BULLET_MARKER: char = '\u{2022}';

/// A shape identifier shortened for display under its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortLabel {
    /// The identifier with the matching ancestor prefix removed.
    pub text: String,
    /// Levels between the parent and the ancestor whose id was stripped.
    pub ascensions: usize,
    /// `true` if no ancestor prefixed the identifier.
    pub bulleted: bool,
}

impl fmt::Display for ShortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bulleted {
            return write!(f, "{BULLET_MARKER} {}", self.text);
        }
        for _ in 0..self.ascensions {
            write!(f, "{ASCENSION_MARKER}")?;
        }
        if self.ascensions > 0 {
            f.write_str(" ")?;
        }
        f.write_str(&self.text)
    }
}

/// Shorten `shape`'s identifier relative to its ancestors.
///
/// Starting at the parent, walk up until an ancestor's identifier is a
/// prefix of the shape's identifier, strip it, and record how
/// many ancestors were passed over. If none matches, the full identifier is
/// returned with the bullet flag set.
pub fn short_label(hierarchy: &Hierarchy, shape: &Shape) -> ShortLabel {
    let id = shape.id().as_str();
    let mut ancestor = shape.parent();
    for ascensions in 0..MAX_DEPTH {
        if ancestor.is_root() {
            break;
        }
        if let Some(rest) = strip_prefix(id, ancestor.as_str()) {
            return ShortLabel {
                text: rest.into(),
                ascensions,
                bulleted: false,
            };
        }
        match hierarchy.get(ancestor.as_str()) {
            Some(next) => ancestor = next.parent(),
            None => break,
        }
    }
    ShortLabel {
        text: id.into(),
        ascensions: 0,
        bulleted: true,
    }
}

/// `id` minus `prefix` and any separators after it, if text remains.
fn strip_prefix<'a>(id: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = id.strip_prefix(prefix)?;
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '/');
    (!rest.is_empty()).then_some(rest)
}
