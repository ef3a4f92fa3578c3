// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor's default radial menu options.

use waymark_hierarchy::{Hierarchy, ShapeId};
use waymark_radial::MenuOption;
use waymark_selection::Target;

use crate::intent::Intent;

/// Radial option type used by the editor.
pub type EditorOption = MenuOption<Intent, Hierarchy>;

fn vertex_count(target: &Target, hierarchy: &Hierarchy) -> usize {
    hierarchy
        .get(target.shape.as_str())
        .map_or(0, |s| s.vertices.len())
}

fn split(target: &Target) -> Intent {
    Intent::Split {
        shape: target.shape.clone(),
        vertex: target.vertex.unwrap_or(0),
    }
}

fn can_split(target: &Target, hierarchy: &Hierarchy) -> bool {
    let len = vertex_count(target, hierarchy);
    target.vertex.is_some_and(|v| v > 0 && v + 1 < len)
}

fn duplicate(target: &Target) -> Intent {
    Intent::Duplicate(target.shape.clone())
}

fn delete_vertex(target: &Target) -> Intent {
    match target.vertex {
        Some(vertex) => Intent::DeleteVertex {
            shape: target.shape.clone(),
            vertex,
        },
        None => Intent::Noop,
    }
}

fn can_delete_vertex(target: &Target, hierarchy: &Hierarchy) -> bool {
    target.vertex.is_some() && vertex_count(target, hierarchy) > 1
}

fn delete_shape(target: &Target) -> Intent {
    Intent::Delete(target.shape.clone())
}

fn move_to_root(target: &Target) -> Intent {
    Intent::Reparent {
        child: target.shape.clone(),
        parent: ShapeId::root(),
    }
}

fn is_nested(target: &Target, hierarchy: &Hierarchy) -> bool {
    hierarchy
        .parent_of(target.shape.as_str())
        .is_some_and(|p| !p.is_root())
}

/// The editor's radial options, clockwise from the top.
///
/// | Option        | Enabled when                                   |
/// |---------------|------------------------------------------------|
/// | split here    | the vertex is neither the first nor the last   |
/// | duplicate     | always                                         |
/// | delete vertex | the shape keeps at least one vertex            |
/// | delete shape  | always                                         |
/// | move to root  | the shape has a parent other than the root     |
pub fn default_menu_options() -> Vec<EditorOption> {
    vec![
        MenuOption::new("split here", "scissors", 0xe0a030, split).enabled_when(can_split),
        MenuOption::new("duplicate", "copy", 0x4a90d9, duplicate),
        MenuOption::new("delete vertex", "vertex-minus", 0xd07030, delete_vertex)
            .enabled_when(can_delete_vertex),
        MenuOption::new("delete shape", "trash", 0xc03030, delete_shape),
        MenuOption::new("move to root", "arrow-up", 0x50a050, move_to_root)
            .enabled_when(is_nested),
    ]
}
