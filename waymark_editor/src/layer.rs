// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw layers.
//!
//! Every frame the editor draws its layers bottom to top. While drawing, a
//! layer hit-tests the pointer against what it just painted and offers an
//! [`Intent`] for each clicked button. Later layers overwrite earlier offers
//! unless they offer with [`OfferMode::KeepExisting`], so the topmost thing
//! under the pointer wins the click.

use core::fmt;

use kurbo::Point;
use waymark_directory::natural_cmp;
use waymark_dispatch::{DeferredActions, OfferMode};
use waymark_hierarchy::{Hierarchy, Shape, StyleValue, Template};
use waymark_input::{Button, InputState};
use waymark_selection::{Selection, Target};

use crate::collaborators::{Camera, Paint, RenderSurface};
use crate::config::{EditorConfig, parse_color};
use crate::intent::Intent;

/// Everything a layer sees while drawing one frame.
pub struct LayerFrame<'a> {
    /// This frame's input.
    pub input: &'a InputState,
    /// The map.
    pub hierarchy: &'a Hierarchy,
    /// Current selection.
    pub selection: &'a Selection,
    /// Style defaults.
    pub template: &'a Template,
    /// Editor settings.
    pub config: &'a EditorConfig,
    /// World/screen transforms.
    pub camera: &'a dyn Camera,
    /// Where to paint.
    pub surface: &'a mut dyn RenderSurface,
    /// Where to offer clicks.
    pub actions: &'a mut DeferredActions<Intent>,
}

impl fmt::Debug for LayerFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerFrame")
            .field("frame", &self.input.frame())
            .field("shapes", &self.hierarchy.len())
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl LayerFrame<'_> {
    /// The pointer in world space.
    pub fn pointer_world(&self) -> Point {
        self.camera.screen_to_world(self.input.pointer())
    }

    /// Offer `intent` for `button` if the button went down this frame.
    ///
    /// The intent is only built when it can be accepted.
    pub fn offer_with(
        &mut self,
        button: Button,
        mode: OfferMode,
        intent: impl FnOnce() -> Intent,
    ) -> bool {
        self.actions.is_armed(button) && self.actions.offer(button, intent(), mode)
    }
}

/// One stage of the draw pass.
pub trait Layer {
    /// Paint and offer this frame's clicks.
    fn draw(&mut self, frame: &mut LayerFrame<'_>);
}

/// The empty canvas under everything.
///
/// A primary click that nothing above claims deselects; a secondary click
/// closes the radial menu unless a layer above offers something else.
#[derive(Clone, Copy, Debug, Default)]
pub struct BackgroundLayer;

impl Layer for BackgroundLayer {
    fn draw(&mut self, frame: &mut LayerFrame<'_>) {
        let viewport = frame.surface.viewport();
        frame.surface.rect(viewport, &Paint::fill(0xf4f1ea));
        frame.offer_with(Button::Primary, OfferMode::Overwrite, || Intent::Deselect);
        frame.offer_with(Button::Secondary, OfferMode::KeepExisting, || {
            Intent::CloseMenu
        });
    }
}

const HIGHLIGHT: u32 = 0xffb000;

/// Shape bodies and their vertex handles, in draw order.
///
/// Shapes are painted by ascending `z`, ties broken by identifier. Clicking a
/// body selects the shape; clicking a vertex handle engages the vertex on the
/// primary button or opens the radial menu on the secondary button.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeLayer;

impl ShapeLayer {
    fn paint(shape: &Shape, template: &Template, highlighted: bool) -> (bool, Paint) {
        let style = |key: &str| shape.style.resolve(key, template);
        let closed = style("closed")
            .and_then(StyleValue::as_bool)
            .unwrap_or(false);
        let fill = closed
            .then(|| style("fill").and_then(StyleValue::as_text).and_then(parse_color))
            .flatten();
        let stroke = style("stroke")
            .and_then(StyleValue::as_text)
            .and_then(parse_color);
        let width = style("width")
            .and_then(StyleValue::as_number)
            .unwrap_or(1.0);
        let paint = if highlighted {
            Paint {
                fill,
                stroke: Some(HIGHLIGHT),
                width: width + 2.0,
                alpha: 1.0,
            }
        } else {
            Paint {
                fill,
                stroke,
                width,
                alpha: 1.0,
            }
        };
        (closed, paint)
    }
}

impl Layer for ShapeLayer {
    fn draw(&mut self, frame: &mut LayerFrame<'_>) {
        let (hierarchy, selection, template, camera) =
            (frame.hierarchy, frame.selection, frame.template, frame.camera);
        let mut order: Vec<&Shape> = hierarchy.iter().collect();
        order.sort_by(|a, b| {
            a.z.total_cmp(&b.z)
                .then_with(|| natural_cmp(a.id().as_str(), b.id().as_str()))
        });

        let pointer = frame.input.pointer();
        let world = frame.pointer_world();
        let radius = frame.config.vertex_radius;

        for shape in order {
            let highlighted = selection.is_highlighted(shape.id().as_str());
            let (closed, paint) = Self::paint(shape, template, highlighted);
            let points: Vec<Point> = shape
                .vertices
                .iter()
                .map(|&v| camera.world_to_screen(v))
                .collect();
            frame.surface.path(&points, closed, &paint);
            if frame.surface.hit_last_path(pointer) {
                frame.offer_with(Button::Primary, OfferMode::Overwrite, || {
                    Intent::Select(Target::shape(shape.id().clone(), world))
                });
            }

            let engaged = selection
                .primary()
                .filter(|t| t.shape == *shape.id())
                .and_then(|t| t.vertex);
            for (index, (&screen, &vertex)) in points.iter().zip(&shape.vertices).enumerate() {
                let handle = if engaged == Some(index) {
                    Paint::fill(HIGHLIGHT)
                } else {
                    Paint::stroke(paint.stroke.unwrap_or(0), 1.0)
                };
                frame.surface.circle(screen, radius, &handle);
                if screen.distance(pointer) > radius {
                    continue;
                }
                let target = || Target::vertex(shape.id().clone(), index, vertex);
                frame.offer_with(Button::Primary, OfferMode::Overwrite, || {
                    Intent::Engage(Button::Primary, target())
                });
                frame.offer_with(Button::Secondary, OfferMode::Overwrite, || {
                    Intent::OpenMenu(target())
                });
            }
        }
    }
}
