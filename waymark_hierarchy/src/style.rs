// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse style bags layered over a shared template.
//!
//! Shapes only store the keys that differ from the editor template. Resolving a
//! key checks the shape's overrides first and falls back to the template.
//! Setting a key back to its template value drops the override, so saved scenes
//! stay small.

use std::collections::BTreeMap;
use std::fmt;

/// A single style value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StyleValue {
    /// Checkbox-style flag.
    Bool(bool),
    /// Numeric value such as a line width.
    Number(f64),
    /// Free text or a color string.
    Text(String),
}

impl StyleValue {
    /// The flag, if this is a [`StyleValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is a [`StyleValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text, if this is a [`StyleValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Default style values shared by every shape.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    defaults: BTreeMap<String, StyleValue>,
}

impl Template {
    /// An empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add or replace a default.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// The default for `key`.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.defaults.get(key)
    }

    /// All defaults in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Per-shape style overrides.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleBag {
    overrides: BTreeMap<String, StyleValue>,
}

impl StyleBag {
    /// An empty bag: every key resolves to the template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `key`: the override if present, otherwise the template default.
    pub fn resolve<'a>(&'a self, key: &str, template: &'a Template) -> Option<&'a StyleValue> {
        self.overrides.get(key).or_else(|| template.get(key))
    }

    /// Set `key` to `value`.
    ///
    /// If `value` equals the template default the override is removed instead.
    /// Returns `true` if the resolved value changed.
    pub fn set(&mut self, key: &str, value: StyleValue, template: &Template) -> bool {
        let before = self.resolve(key, template).cloned();
        if template.get(key) == Some(&value) {
            self.overrides.remove(key);
        } else {
            self.overrides.insert(key.into(), value);
        }
        before.as_ref() != self.resolve(key, template)
    }

    /// Drop the override for `key`, returning it.
    pub fn reset(&mut self, key: &str) -> Option<StyleValue> {
        self.overrides.remove(key)
    }

    /// The override for `key`, ignoring the template.
    pub fn get_override(&self, key: &str) -> Option<&StyleValue> {
        self.overrides.get(key)
    }

    /// Number of overridden keys.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// `true` if nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Overridden keys in key order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merged view of the template and the overrides.
    pub fn resolved<'a>(&'a self, template: &'a Template) -> BTreeMap<&'a str, &'a StyleValue> {
        let mut out: BTreeMap<&str, &StyleValue> = template.iter().collect();
        out.extend(self.overrides());
        out
    }
}
