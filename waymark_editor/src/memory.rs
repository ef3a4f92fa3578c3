// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborators for headless sessions, demos, and tests.

use std::collections::VecDeque;

use hashbrown::HashMap;
use kurbo::{Affine, BezPath, Line, ParamCurveNearest, Point, Rect, Shape as _, Vec2};
use waymark_hierarchy::Shape;
use waymark_input::RawInput;

use crate::collaborators::{Camera, InputDevice, Paint, Persistence, PersistenceError, RenderSurface};

/// Replays a queue of raw input snapshots.
///
/// Once the queue is empty the last snapshot repeats with its one-shot parts
/// (keydowns, scroll) cleared, like a device nobody is touching.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<RawInput>,
    last: RawInput,
}

impl ScriptedInput {
    /// An idle device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one snapshot.
    pub fn push(&mut self, raw: RawInput) {
        self.queue.push_back(raw);
    }

    /// Queue several snapshots.
    pub fn extend(&mut self, raws: impl IntoIterator<Item = RawInput>) {
        self.queue.extend(raws);
    }

    /// Snapshots not yet polled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl InputDevice for ScriptedInput {
    fn poll(&mut self) -> RawInput {
        match self.queue.pop_front() {
            Some(raw) => {
                self.last = raw.clone();
                raw
            }
            None => {
                self.last.keydowns.clear();
                self.last.scroll = 0.0;
                self.last.clone()
            }
        }
    }
}

/// A camera made of a screen offset and a uniform zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanZoomCamera {
    /// Screen position of the world origin.
    pub offset: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f64,
    /// Screen point [`Camera::center_on`] moves targets to.
    pub screen_center: Point,
}

impl Default for PanZoomCamera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            screen_center: Point::new(400.0, 300.0),
        }
    }
}

impl PanZoomCamera {
    /// Smallest zoom [`Camera::zoom_at`] will produce.
    pub const MIN_ZOOM: f64 = 0.05;
    /// Largest zoom [`Camera::zoom_at`] will produce.
    pub const MAX_ZOOM: f64 = 50.0;

    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }
}

impl Camera for PanZoomCamera {
    fn world_to_screen(&self, world: Point) -> Point {
        self.transform() * world
    }

    fn screen_to_world(&self, screen: Point) -> Point {
        self.transform().inverse() * screen
    }

    fn pan(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta;
    }

    fn zoom_at(&mut self, screen: Point, factor: f64) {
        let anchor = self.screen_to_world(screen);
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        self.offset = screen.to_vec2() - anchor.to_vec2() * self.zoom;
    }

    fn center_on(&mut self, world: Point) {
        self.offset = self.screen_center.to_vec2() - world.to_vec2() * self.zoom;
    }
}

/// Named save slots plus a bounded undo stack, all in memory.
#[derive(Clone, Debug)]
pub struct MemoryPersistence {
    initial: Vec<Shape>,
    slots: HashMap<String, Vec<Shape>>,
    /// Oldest first; the last entry is the current state.
    history: Vec<Vec<Shape>>,
    max_history: usize,
}

impl Default for MemoryPersistence {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryPersistence {
    /// Start a session from `initial`.
    pub fn new(initial: Vec<Shape>) -> Self {
        Self {
            history: vec![initial.clone()],
            initial,
            slots: HashMap::new(),
            max_history: 64,
        }
    }

    /// Builder: cap the number of undo points kept.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self
    }

    /// Number of undo points, including the current state.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The map saved in `slot`.
    pub fn slot(&self, slot: &str) -> Option<&[Shape]> {
        self.slots.get(slot).map(Vec::as_slice)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self, slot: &str) -> Result<Vec<Shape>, PersistenceError> {
        self.slots
            .get(slot)
            .cloned()
            .ok_or_else(|| PersistenceError::MissingSlot(slot.into()))
    }

    fn save(&mut self, slot: &str, shapes: &[Shape]) -> Result<(), PersistenceError> {
        self.slots.insert(slot.into(), shapes.to_vec());
        tracing::debug!(slot, shapes = shapes.len(), "map saved");
        Ok(())
    }

    fn snapshot(&mut self, shapes: &[Shape]) {
        self.history.push(shapes.to_vec());
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }

    fn undo(&mut self) -> Option<Vec<Shape>> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        self.history.last().cloned()
    }

    fn initial_state(&self) -> Vec<Shape> {
        self.initial.clone()
    }
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`RenderSurface::rect`].
    Rect(Rect),
    /// [`RenderSurface::line`].
    Line(Point, Point),
    /// [`RenderSurface::path`].
    Path {
        /// Vertices in screen space.
        points: Vec<Point>,
        /// Whether the path was closed.
        closed: bool,
    },
    /// [`RenderSurface::circle`].
    Circle {
        /// Center in screen space.
        center: Point,
        /// Radius in pixels.
        radius: f64,
    },
    /// [`RenderSurface::arc`].
    Arc {
        /// Center in screen space.
        center: Point,
        /// Inner radius.
        inner_radius: f64,
        /// Outer radius.
        outer_radius: f64,
    },
    /// [`RenderSurface::icon`].
    Icon(String, Point),
    /// [`RenderSurface::text`].
    Text(String, Point),
}

/// A surface that records primitives and answers path hit tests geometrically.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    viewport: Rect,
    ops: Vec<DrawOp>,
    last_path: Option<(Vec<Point>, bool)>,
    /// Pixel distance that counts as touching an open path.
    pub stroke_tolerance: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }
}

impl RecordingSurface {
    /// A surface covering `viewport`.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
            last_path: None,
            stroke_tolerance: 4.0,
        }
    }

    /// Primitives recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take and clear the recorded primitives.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        self.last_path = None;
        core::mem::take(&mut self.ops)
    }
}

impl RenderSurface for RecordingSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn rect(&mut self, rect: Rect, _paint: &Paint) {
        self.ops.push(DrawOp::Rect(rect));
    }

    fn line(&mut self, from: Point, to: Point, _paint: &Paint) {
        self.ops.push(DrawOp::Line(from, to));
    }

    fn path(&mut self, points: &[Point], closed: bool, _paint: &Paint) {
        self.last_path = Some((points.to_vec(), closed));
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            closed,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, _paint: &Paint) {
        self.ops.push(DrawOp::Circle { center, radius });
    }

    fn arc(
        &mut self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        _start_angle: f64,
        _end_angle: f64,
        _paint: &Paint,
    ) {
        self.ops.push(DrawOp::Arc {
            center,
            inner_radius,
            outer_radius,
        });
    }

    fn icon(&mut self, name: &str, at: Point, _size: f64) {
        self.ops.push(DrawOp::Icon(name.into(), at));
    }

    fn text(&mut self, text: &str, at: Point, _paint: &Paint) {
        self.ops.push(DrawOp::Text(text.into(), at));
    }

    fn hit_last_path(&self, point: Point) -> bool {
        let Some((points, closed)) = &self.last_path else {
            return false;
        };
        let Some((&first, rest)) = points.split_first() else {
            return false;
        };
        if *closed && points.len() >= 3 {
            let mut path = BezPath::new();
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
            path.close_path();
            return path.contains(point);
        }
        let tolerance_sq = self.stroke_tolerance * self.stroke_tolerance;
        points.windows(2).any(|w| {
            Line::new(w[0], w[1]).nearest(point, 1e-6).distance_sq <= tolerance_sq
        }) || (rest.is_empty() && first.distance_squared(point) <= tolerance_sq)
    }
}
