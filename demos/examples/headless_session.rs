// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted editing session without a window.
//!
//! Drags a wall vertex, opens the radial menu on it, splits the wall there,
//! and prints the directory after each step. Set `RUST_LOG=debug` to watch the
//! editor's own logging.
//!
//! Run:
//! - `cargo run -p waymark_demos --example headless_session`

use kurbo::Point;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waymark_directory::DirectoryEntry;
use waymark_editor::memory::{MemoryPersistence, PanZoomCamera, RecordingSurface, ScriptedInput};
use waymark_editor::{EditorConfig, EditorContext, FrameReport};
use waymark_hierarchy::Shape;
use waymark_input::{ButtonSet, RawInput};

type Editor = EditorContext<ScriptedInput, PanZoomCamera, MemoryPersistence, RecordingSurface>;

fn raw(at: Point, held: ButtonSet) -> RawInput {
    let mut r = RawInput::at(at);
    r.held = held;
    r
}

fn map() -> Vec<Shape> {
    vec![
        Shape::new("keep"),
        Shape::new("keep wall")
            .with_parent("keep")
            .with_vertices([
                Point::new(100.0, 100.0),
                Point::new(300.0, 100.0),
                Point::new(300.0, 250.0),
                Point::new(100.0, 250.0),
            ]),
        Shape::new("keep gate").with_parent("keep wall").with_vertices([
            Point::new(180.0, 250.0),
            Point::new(220.0, 250.0),
        ]),
        Shape::new("moat").with_z(-1.0).with_vertices([
            Point::new(60.0, 60.0),
            Point::new(340.0, 60.0),
            Point::new(340.0, 290.0),
            Point::new(60.0, 290.0),
        ]),
    ]
}

fn print_directory(title: &str, entries: &[DirectoryEntry]) {
    println!("-- {title}");
    for entry in entries {
        println!("{}{}", "  ".repeat(entry.depth.saturating_sub(1)), entry.label);
    }
}

fn run(editor: &mut Editor, frames: usize) -> Vec<FrameReport> {
    (0..frames)
        .map(|_| editor.frame())
        .filter(|r| !r.applied.is_empty() || !r.rejected.is_empty())
        .inspect(|r| tracing::info!(frame = r.frame, applied = ?r.applied, rejected = ?r.rejected))
        .collect()
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut editor = EditorContext::new(
        ScriptedInput::new(),
        PanZoomCamera::default(),
        MemoryPersistence::new(map()),
        RecordingSurface::default(),
        EditorConfig::default(),
    );
    print_directory("loaded", editor.directory().entries());

    // Drag the second wall vertex 40 px to the right.
    let corner = Point::new(300.0, 100.0);
    let moved = Point::new(340.0, 100.0);
    editor.device_mut().extend([
        raw(corner, ButtonSet::PRIMARY),
        raw(moved, ButtonSet::PRIMARY),
        raw(moved, ButtonSet::empty()),
    ]);
    run(&mut editor, 3);

    // Right-click the third vertex and let the menu ease in.
    let third = Point::new(300.0, 250.0);
    editor.device_mut().extend([
        raw(third, ButtonSet::SECONDARY),
        raw(third, ButtonSet::empty()),
    ]);
    run(&mut editor, 20);

    // Click "split here".
    let now = editor.input().frame();
    let split = editor
        .menu()
        .layout(now, editor.hierarchy())
        .into_iter()
        .find(|s| editor.menu().options()[s.index].name == "split here");
    if let Some(sector) = split {
        editor
            .device_mut()
            .push(raw(sector.anchor(third), ButtonSet::PRIMARY));
        run(&mut editor, 1);
    }
    print_directory("after split", editor.directory().entries());

    if let Some(copy) = editor.hierarchy().get("keep wall 2") {
        println!("keep wall 2 has {} vertices", copy.vertices.len());
    }
    println!(
        "undo points: {}, primitives drawn: {}",
        editor.persistence().history_len(),
        editor.surface().ops().len()
    );
}
