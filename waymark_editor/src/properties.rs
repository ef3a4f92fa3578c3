// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property panel as data.
//!
//! Each [`PropertySpec`] describes one row: the widget kind, when it is
//! visible, how to read its current value from a shape, and which
//! [`Intent`] a new value turns into. Building the widgets is up to the host.

use waymark_hierarchy::{Shape, StyleValue, Template};

use crate::intent::Intent;

/// Widget kind of a property row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PropertyKind {
    /// A boolean toggle.
    Checkbox,
    /// A free text field.
    Text,
    /// A numeric field clamped to `[min, max]`.
    Number {
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
        /// Increment for spinners and drags.
        step: f64,
    },
    /// A push button without a value.
    Button,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Binding {
    Id,
    Z,
    Style,
    Jump,
    Delete,
    Duplicate,
}

/// One row of the property panel.
#[derive(Copy, Clone, Debug)]
pub struct PropertySpec {
    /// Style key, or a reserved name for `id`, `z`, and the buttons.
    pub key: &'static str,
    /// Row label.
    pub label: &'static str,
    /// Widget kind.
    pub kind: PropertyKind,
    /// Whether the row applies to a shape.
    pub visible: fn(&Shape, &Template) -> bool,
    binding: Binding,
}

fn always(_: &Shape, _: &Template) -> bool {
    true
}

fn when_closed(shape: &Shape, template: &Template) -> bool {
    shape
        .style
        .resolve("closed", template)
        .and_then(StyleValue::as_bool)
        .unwrap_or(false)
}

static SCHEMA: [PropertySpec; 9] = [
    PropertySpec {
        key: "id",
        label: "Name",
        kind: PropertyKind::Text,
        visible: always,
        binding: Binding::Id,
    },
    PropertySpec {
        key: "z",
        label: "Depth",
        kind: PropertyKind::Number {
            min: -1000.0,
            max: 1000.0,
            step: 1.0,
        },
        visible: always,
        binding: Binding::Z,
    },
    PropertySpec {
        key: "closed",
        label: "Closed",
        kind: PropertyKind::Checkbox,
        visible: always,
        binding: Binding::Style,
    },
    PropertySpec {
        key: "fill",
        label: "Fill",
        kind: PropertyKind::Text,
        visible: when_closed,
        binding: Binding::Style,
    },
    PropertySpec {
        key: "stroke",
        label: "Stroke",
        kind: PropertyKind::Text,
        visible: always,
        binding: Binding::Style,
    },
    PropertySpec {
        key: "width",
        label: "Line width",
        kind: PropertyKind::Number {
            min: 0.0,
            max: 64.0,
            step: 0.5,
        },
        visible: always,
        binding: Binding::Style,
    },
    PropertySpec {
        key: "jump",
        label: "Jump to",
        kind: PropertyKind::Button,
        visible: always,
        binding: Binding::Jump,
    },
    PropertySpec {
        key: "duplicate",
        label: "Duplicate",
        kind: PropertyKind::Button,
        visible: always,
        binding: Binding::Duplicate,
    },
    PropertySpec {
        key: "delete",
        label: "Delete",
        kind: PropertyKind::Button,
        visible: always,
        binding: Binding::Delete,
    },
];

/// The property rows, in panel order.
pub fn schema() -> &'static [PropertySpec] {
    &SCHEMA
}

/// The row for `key`.
pub fn property(key: &str) -> Option<&'static PropertySpec> {
    SCHEMA.iter().find(|p| p.key == key)
}

impl PropertySpec {
    /// Whether this row applies to `shape`.
    pub fn is_visible(&self, shape: &Shape, template: &Template) -> bool {
        (self.visible)(shape, template)
    }

    /// The value to show for `shape`. Buttons have none.
    pub fn value(&self, shape: &Shape, template: &Template) -> Option<StyleValue> {
        match self.binding {
            Binding::Id => Some(StyleValue::Text(shape.id().to_string())),
            Binding::Z => Some(StyleValue::Number(shape.z)),
            Binding::Style => shape.style.resolve(self.key, template).cloned(),
            Binding::Jump | Binding::Delete | Binding::Duplicate => None,
        }
    }

    /// The intent for entering `value` on `shape`, or activating a button.
    ///
    /// Returns `None` when the value has the wrong type for the widget or
    /// would not change anything. Numbers are clamped to the widget range.
    pub fn intent(&self, shape: &Shape, value: Option<StyleValue>) -> Option<Intent> {
        let id = shape.id().clone();
        match self.binding {
            Binding::Jump => return Some(Intent::JumpTo(id)),
            Binding::Delete => return Some(Intent::Delete(id)),
            Binding::Duplicate => return Some(Intent::Duplicate(id)),
            Binding::Id | Binding::Z | Binding::Style => {}
        }
        let value = self.coerce(value?)?;
        match self.binding {
            Binding::Id => {
                let to = value.as_text()?.trim();
                (!to.is_empty() && *shape.id() != to).then(|| Intent::Rename {
                    from: id,
                    to: to.into(),
                })
            }
            Binding::Z => {
                let z = value.as_number()?;
                #[allow(clippy::float_cmp, reason = "Only an exact repeat is a no-op.")]
                let same = z == shape.z;
                (!same).then_some(Intent::SetZ { shape: id, z })
            }
            _ => Some(Intent::SetStyle {
                shape: id,
                key: self.key.into(),
                value,
            }),
        }
    }

    fn coerce(&self, value: StyleValue) -> Option<StyleValue> {
        match (self.kind, value) {
            (PropertyKind::Checkbox, v @ StyleValue::Bool(_))
            | (PropertyKind::Text, v @ StyleValue::Text(_)) => Some(v),
            (PropertyKind::Number { min, max, .. }, StyleValue::Number(n)) if !n.is_nan() => {
                Some(StyleValue::Number(n.clamp(min, max)))
            }
            (PropertyKind::Number { min, max, .. }, StyleValue::Text(t)) => t
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| !n.is_nan())
                .map(|n| StyleValue::Number(n.clamp(min, max))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_template;

    #[test]
    fn fill_is_hidden_for_open_shapes() {
        let template = default_template();
        let mut shape = Shape::new("road");
        let fill = property("fill").unwrap();
        assert!(fill.is_visible(&shape, &template));
        shape.style.set("closed", false.into(), &template);
        assert!(!fill.is_visible(&shape, &template));
    }

    #[test]
    fn values_resolve_through_template() {
        let template = default_template();
        let shape = Shape::new("road").with_z(2.0);
        assert_eq!(
            property("width").unwrap().value(&shape, &template),
            Some(StyleValue::Number(2.0))
        );
        assert_eq!(
            property("z").unwrap().value(&shape, &template),
            Some(StyleValue::Number(2.0))
        );
        assert_eq!(property("delete").unwrap().value(&shape, &template), None);
    }

    #[test]
    fn numbers_clamp_and_parse() {
        let shape = Shape::new("road");
        let width = property("width").unwrap();
        assert_eq!(
            width.intent(&shape, Some(StyleValue::Number(500.0))),
            Some(Intent::SetStyle {
                shape: "road".into(),
                key: "width".into(),
                value: StyleValue::Number(64.0),
            })
        );
        assert_eq!(
            width.intent(&shape, Some(" 3.5 ".into())),
            Some(Intent::SetStyle {
                shape: "road".into(),
                key: "width".into(),
                value: StyleValue::Number(3.5),
            })
        );
        assert_eq!(width.intent(&shape, Some(true.into())), None);
    }

    #[test]
    fn rename_ignores_blank_and_unchanged() {
        let shape = Shape::new("road");
        let name = property("id").unwrap();
        assert_eq!(name.intent(&shape, Some("road".into())), None);
        assert_eq!(name.intent(&shape, Some("  ".into())), None);
        assert_eq!(
            name.intent(&shape, Some("lane".into())),
            Some(Intent::Rename {
                from: "road".into(),
                to: "lane".into(),
            })
        );
    }

    #[test]
    fn buttons_ignore_values() {
        let shape = Shape::new("road");
        assert_eq!(
            property("jump").unwrap().intent(&shape, None),
            Some(Intent::JumpTo("road".into()))
        );
        assert_eq!(
            property("duplicate").unwrap().intent(&shape, Some(1.0.into())),
            Some(Intent::Duplicate("road".into()))
        );
    }
}
