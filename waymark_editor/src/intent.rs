// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edits as values.

use waymark_hierarchy::{ShapeId, StyleValue};
use waymark_input::Button;
use waymark_radial::MenuIntent;
use waymark_selection::Target;

/// Every edit the editor can perform, as a value.
///
/// Layers, the radial menu, the property panel, and keyboard shortcuts all
/// produce intents. The editor context applies them one at a time after
/// dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Consume a click without doing anything.
    Noop,
    /// Close the radial menu.
    CloseMenu,
    /// Make a target the selection.
    Select(Target),
    /// Clear the selection.
    Deselect,
    /// Engage a target on a button without highlighting it.
    Engage(Button, Target),
    /// Open the radial menu on a target.
    OpenMenu(Target),
    /// Move `child` under `parent`.
    Reparent {
        /// Shape to move.
        child: ShapeId,
        /// New parent; the root moves it to the top level.
        parent: ShapeId,
    },
    /// Rename a shape and every reference to it.
    Rename {
        /// Current identifier.
        from: ShapeId,
        /// New identifier.
        to: ShapeId,
    },
    /// Add a connection.
    Connect {
        /// Shape holding the connection.
        from: ShapeId,
        /// Shape connected to.
        to: ShapeId,
    },
    /// Remove a connection.
    Disconnect {
        /// Shape holding the connection.
        from: ShapeId,
        /// Shape connected to.
        to: ShapeId,
    },
    /// Delete a shape. Its children become orphans.
    Delete(ShapeId),
    /// Delete one vertex.
    DeleteVertex {
        /// Shape owning the vertex.
        shape: ShapeId,
        /// Vertex index.
        vertex: usize,
    },
    /// Copy a shape next to itself.
    Duplicate(ShapeId),
    /// Cut a shape in two at a vertex.
    Split {
        /// Shape to split.
        shape: ShapeId,
        /// First vertex of the new copy.
        vertex: usize,
    },
    /// Set the draw order.
    SetZ {
        /// Shape to change.
        shape: ShapeId,
        /// New z value.
        z: f64,
    },
    /// Set one style key.
    SetStyle {
        /// Shape to change.
        shape: ShapeId,
        /// Style key.
        key: String,
        /// New value; the template default removes the override.
        value: StyleValue,
    },
    /// Step back one undo point.
    Undo,
    /// Restore the state the session started from.
    RevertAll,
    /// Save the map to a slot.
    Save(String),
    /// Replace the map with the one in a slot.
    Load(String),
    /// Center the camera on a shape.
    JumpTo(ShapeId),
}

impl MenuIntent for Intent {
    fn noop() -> Self {
        Self::Noop
    }

    fn close() -> Self {
        Self::CloseMenu
    }
}

impl Intent {
    /// The shape this intent requires to exist, if any.
    ///
    /// An intent whose subject has been deleted by the time it is applied is
    /// rejected as stale.
    pub fn subject(&self) -> Option<&ShapeId> {
        match self {
            Self::Select(t) | Self::Engage(_, t) | Self::OpenMenu(t) => Some(&t.shape),
            Self::Reparent { child: id, .. }
            | Self::Rename { from: id, .. }
            | Self::Connect { from: id, .. }
            | Self::Disconnect { from: id, .. }
            | Self::Delete(id)
            | Self::DeleteVertex { shape: id, .. }
            | Self::Duplicate(id)
            | Self::Split { shape: id, .. }
            | Self::SetZ { shape: id, .. }
            | Self::SetStyle { shape: id, .. }
            | Self::JumpTo(id) => Some(id),
            Self::Noop
            | Self::CloseMenu
            | Self::Deselect
            | Self::Undo
            | Self::RevertAll
            | Self::Save(_)
            | Self::Load(_) => None,
        }
    }

    /// `true` if a successful application changes the map and records an
    /// undo point.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::Reparent { .. }
                | Self::Rename { .. }
                | Self::Connect { .. }
                | Self::Disconnect { .. }
                | Self::Delete(_)
                | Self::DeleteVertex { .. }
                | Self::Duplicate(_)
                | Self::Split { .. }
                | Self::SetZ { .. }
                | Self::SetStyle { .. }
                | Self::RevertAll
                | Self::Load(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn subjects() {
        let t = Target::vertex("wall", 0, Point::ZERO);
        assert_eq!(Intent::OpenMenu(t).subject().map(ShapeId::as_str), Some("wall"));
        assert_eq!(Intent::Undo.subject(), None);
        assert!(Intent::Delete("wall".into()).is_edit());
        assert!(!Intent::Save("quick".into()).is_edit());
        assert!(!Intent::Undo.is_edit(), "undo restores, it does not record");
    }
}
