// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Editor: the frame loop that ties the waymark crates together.
//!
//! [`EditorContext`] owns the map, the selection, the radial menu, the
//! directory cache, and four collaborators it only talks to through traits:
//! an [`InputDevice`], a [`Camera`], a [`Persistence`] backend, and a
//! [`RenderSurface`]. Nothing is global. A host builds one context and calls
//! [`EditorContext::frame`] once per tick.
//!
//! Every edit is an [`Intent`] value. Layers offer intents while they draw,
//! the dispatcher fires at most one per button, and the context applies them
//! after the draw pass. An intent naming a shape that an earlier intent in the
//! same frame deleted is rejected with [`EditorError::StaleTarget`] instead of
//! touching anything.
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_editor::memory::{MemoryPersistence, PanZoomCamera, RecordingSurface, ScriptedInput};
//! use waymark_editor::{EditorConfig, EditorContext, Intent};
//! use waymark_hierarchy::Shape;
//! use waymark_input::{ButtonSet, RawInput};
//!
//! let map = vec![Shape::new("gate").with_vertices([Point::new(10.0, 10.0), Point::new(50.0, 10.0)])];
//! let mut input = ScriptedInput::new();
//! // Right-click the second vertex to open the radial menu.
//! let mut click = RawInput::at(Point::new(50.0, 10.0));
//! click.held = ButtonSet::SECONDARY;
//! input.push(click);
//!
//! let mut editor = EditorContext::new(
//!     input,
//!     PanZoomCamera::default(),
//!     MemoryPersistence::new(map),
//!     RecordingSurface::default(),
//!     EditorConfig::default(),
//! );
//! let report = editor.frame();
//! assert!(matches!(report.applied.as_slice(), [Intent::OpenMenu(_)]));
//! assert!(editor.menu().is_active());
//! ```
//!
//! [`memory`] has in-memory collaborators for tests and headless sessions.
//! [`properties`] describes the property panel as data.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`EditorConfig`].

pub mod collaborators;
mod config;
mod context;
mod error;
mod intent;
mod layer;
pub mod memory;
mod menu;
pub mod properties;

pub use collaborators::{Camera, InputDevice, Paint, Persistence, PersistenceError, RenderSurface};
pub use config::{EditorConfig, default_template};
pub use context::{EditorContext, FrameReport};
pub use error::EditorError;
pub use intent::Intent;
pub use layer::{BackgroundLayer, Layer, LayerFrame, ShapeLayer};
pub use menu::{EditorOption, default_menu_options};
