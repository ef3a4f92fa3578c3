// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces the editor core calls but does not implement.
//!
//! The core owns no window, no file format, and no renderer. Each frame it
//! polls an [`InputDevice`], converts coordinates through a [`Camera`], draws
//! through a [`RenderSurface`], and asks [`Persistence`] for snapshots. In-memory
//! implementations live in [`crate::memory`].

use kurbo::{Point, Rect, Vec2};
use thiserror::Error;
use waymark_hierarchy::Shape;
use waymark_input::RawInput;

/// Source of raw per-frame input.
pub trait InputDevice {
    /// Sample the device once. Called exactly once per frame.
    fn poll(&mut self) -> RawInput;
}

/// World/screen transforms and view movement.
///
/// The core only moves the view through these entry points.
pub trait Camera {
    /// Map a world-space point to screen space.
    fn world_to_screen(&self, world: Point) -> Point;
    /// Map a screen-space point to world space.
    fn screen_to_world(&self, screen: Point) -> Point;
    /// Move the view by a screen-space delta.
    fn pan(&mut self, screen_delta: Vec2);
    /// Scale the view by `factor`, keeping `screen` fixed.
    fn zoom_at(&mut self, screen: Point, factor: f64);
    /// Center the view on a world-space point.
    fn center_on(&mut self, world: Point);
}

/// Failure reported by a [`Persistence`] backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Nothing has been saved in this slot.
    #[error("no saved map in slot `{0}`")]
    MissingSlot(String),
    /// The backend could not read or write its storage.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Map storage and undo history.
///
/// The map format and the undo-log layout belong to the implementation.
pub trait Persistence {
    /// Read the map stored in `slot`.
    fn load(&mut self, slot: &str) -> Result<Vec<Shape>, PersistenceError>;
    /// Store `shapes` in `slot`.
    fn save(&mut self, slot: &str, shapes: &[Shape]) -> Result<(), PersistenceError>;
    /// Record an undo point after a successful edit.
    fn snapshot(&mut self, shapes: &[Shape]);
    /// Step back one undo point, returning the state to restore.
    fn undo(&mut self) -> Option<Vec<Shape>>;
    /// The state the session started from, for a full revert.
    fn initial_state(&self) -> Vec<Shape>;
}

/// Fill and stroke settings for one primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Paint {
    /// Fill color as `0xRRGGBB`.
    pub fill: Option<u32>,
    /// Stroke color as `0xRRGGBB`.
    pub stroke: Option<u32>,
    /// Stroke width in screen pixels.
    pub width: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(0x000000),
            width: 1.0,
            alpha: 1.0,
        }
    }
}

impl Paint {
    /// A filled primitive without stroke.
    pub fn fill(color: u32) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            ..Self::default()
        }
    }

    /// A stroked primitive without fill.
    pub fn stroke(color: u32, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            width,
            ..Self::default()
        }
    }

    /// Builder: set the opacity.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

/// Immediate-mode drawing primitives in screen space.
///
/// Every call declares and paints one primitive. [`RenderSurface::hit_last_path`]
/// tests a point against the most recent [`RenderSurface::path`].
pub trait RenderSurface {
    /// The visible screen area.
    fn viewport(&self) -> Rect;
    /// Paint a rectangle.
    fn rect(&mut self, rect: Rect, paint: &Paint);
    /// Paint a line segment.
    fn line(&mut self, from: Point, to: Point, paint: &Paint);
    /// Paint a polyline, or a polygon when `closed`.
    fn path(&mut self, points: &[Point], closed: bool, paint: &Paint);
    /// Paint a circle.
    fn circle(&mut self, center: Point, radius: f64, paint: &Paint);
    /// Paint an annular sector. Angles are clockwise from the top.
    fn arc(
        &mut self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        paint: &Paint,
    );
    /// Paint a named icon centered on `at`.
    fn icon(&mut self, name: &str, at: Point, size: f64);
    /// Paint text with its baseline starting at `at`.
    fn text(&mut self, text: &str, at: Point, paint: &Paint);
    /// `true` if `point` lies inside the last path (or on it, for open paths).
    fn hit_last_path(&self, point: Point) -> bool;
}
