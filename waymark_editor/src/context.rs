// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor context and its frame loop.

use core::fmt;

use kurbo::{Point, Vec2};
use waymark_directory::Directory;
use waymark_dispatch::DeferredActions;
use waymark_hierarchy::{Hierarchy, Shape, ShapeId, Template};
use waymark_input::{Button, InputState, Key};
use waymark_radial::RadialMenu;
use waymark_selection::{CancelOutcome, Selection, Target};

use crate::collaborators::{Camera, InputDevice, Paint, Persistence, RenderSurface};
use crate::config::{EditorConfig, default_template};
use crate::error::EditorError;
use crate::intent::Intent;
use crate::layer::{BackgroundLayer, Layer, LayerFrame, ShapeLayer};
use crate::menu::default_menu_options;

/// What one call to [`EditorContext::frame`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Frame counter after the input update.
    pub frame: u64,
    /// Intents applied successfully, in application order.
    pub applied: Vec<Intent>,
    /// Intents that were rejected, with the reason.
    pub rejected: Vec<(Intent, EditorError)>,
    /// `true` if the directory was recomputed.
    pub directory_changed: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Drag {
    armed: bool,
    moved: bool,
}

/// All editor state plus its collaborators.
///
/// One context is built per session and driven by calling
/// [`EditorContext::frame`] once per tick. Each frame runs five phases:
///
/// 1. **Tick**: poll the device, then handle escape, camera movement, drags,
///    and button releases.
/// 2. **Draw**: background, shapes, caller layers, then the radial menu on
///    top. Each offers intents for this frame's clicks.
/// 3. **Dispatch**: the surviving intent per button fires.
/// 4. **Apply**: fired intents, then queued ones, are applied one at a time.
///    Intents naming a shape that no longer exists are rejected.
/// 5. **Resync**: stale targets are dropped and the directory is refreshed.
pub struct EditorContext<D, C, P, S> {
    device: D,
    camera: C,
    persistence: P,
    surface: S,
    config: EditorConfig,
    template: Template,
    input: InputState,
    actions: DeferredActions<Intent>,
    hierarchy: Hierarchy,
    selection: Selection,
    menu: RadialMenu<Intent, Hierarchy>,
    directory: Directory,
    background: BackgroundLayer,
    shapes: ShapeLayer,
    layers: Vec<Box<dyn Layer>>,
    queued: Vec<Intent>,
    drag: Drag,
}

impl<D, C, P, S> fmt::Debug for EditorContext<D, C, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("config", &self.config)
            .field("frame", &self.input.frame())
            .field("hierarchy", &self.hierarchy)
            .field("selection", &self.selection)
            .field("menu", &self.menu)
            .field("layers", &self.layers.len())
            .field("queued", &self.queued)
            .finish_non_exhaustive()
    }
}

impl<D, C, P, S> EditorContext<D, C, P, S>
where
    D: InputDevice,
    C: Camera,
    P: Persistence,
    S: RenderSurface,
{
    /// Start a session from the persistence backend's initial state.
    pub fn new(device: D, camera: C, persistence: P, surface: S, config: EditorConfig) -> Self {
        let mut hierarchy = Hierarchy::new();
        let report = hierarchy.load(persistence.initial_state());
        if !report.is_clean() {
            tracing::warn!(?report, "initial map has unresolved references");
        }
        let mut directory = Directory::new();
        directory.refresh(&hierarchy);
        Self {
            device,
            camera,
            persistence,
            surface,
            input: InputState::with_config(config.input),
            menu: RadialMenu::with_config(config.radial, default_menu_options()),
            config,
            template: default_template(),
            actions: DeferredActions::new(),
            hierarchy,
            selection: Selection::new(),
            directory,
            background: BackgroundLayer,
            shapes: ShapeLayer,
            layers: Vec::new(),
            queued: Vec::new(),
            drag: Drag::default(),
        }
    }

    /// Builder: replace the style template.
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Add a layer drawn above the shapes and below the radial menu.
    pub fn add_layer(&mut self, layer: impl Layer + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Queue an intent to be applied at the end of the next frame, after the
    /// fired ones. Property panels and shortcuts go through here.
    pub fn queue(&mut self, intent: Intent) {
        self.queued.push(intent);
    }

    /// Run one frame. See the type docs for the phases.
    pub fn frame(&mut self) -> FrameReport {
        let raw = self.device.poll();
        self.input.update(&raw);
        let now = self.input.frame();

        self.tick(now);

        self.actions.begin_frame(self.input.pressed());
        self.draw(now);

        let mut intents = Vec::new();
        self.actions.fire_all(|button, intent| {
            tracing::trace!(?button, ?intent, "intent fired");
            intents.push(intent);
        });
        intents.append(&mut self.queued);

        let mut report = FrameReport {
            frame: now,
            ..FrameReport::default()
        };
        for intent in intents {
            match self.apply_one(intent.clone()) {
                Ok(()) => report.applied.push(intent),
                Err(error) => {
                    tracing::warn!(?intent, %error, "intent rejected");
                    report.rejected.push((intent, error));
                }
            }
        }
        report.directory_changed = self.settle();
        report
    }

    /// Apply one intent immediately, outside the frame loop.
    pub fn apply(&mut self, intent: Intent) -> Result<(), EditorError> {
        let result = self.apply_one(intent);
        self.settle();
        result
    }

    fn tick(&mut self, now: u64) {
        if self.input.key_pressed(Key::Escape) {
            let outcome = self.selection.cancel(self.input.held(), &mut self.hierarchy);
            self.menu.deactivate(now);
            self.selection.unstick(Button::Secondary);
            if outcome == CancelOutcome::Reverted {
                self.drag = Drag::default();
            }
            tracing::debug!(?outcome, "escape");
        }

        if self.input.is_held(Button::Middle) && !self.input.just_pressed(Button::Middle) {
            self.camera.pan(self.input.pointer_motion());
        }
        let scroll = self.input.scroll();
        if scroll != 0.0 {
            self.camera
                .zoom_at(self.input.pointer(), self.config.zoom_step.powf(scroll));
        }

        if self.drag.armed
            && self.input.is_held(Button::Primary)
            && let Some(press) = self.input.press(Button::Primary)
        {
            let delta = self.camera.screen_to_world(self.input.pointer())
                - self.camera.screen_to_world(press.position);
            match self.selection.drag(Button::Primary, delta, &mut self.hierarchy) {
                Ok(moved) => self.drag.moved |= moved && delta != Vec2::ZERO,
                Err(error) => {
                    tracing::debug!(%error, "drag target vanished");
                    self.drag = Drag::default();
                }
            }
        }

        for button in self.input.released().buttons() {
            if button == Button::Primary && self.drag.armed {
                if self.drag.moved && self.selection.commit(Button::Primary, &self.hierarchy) {
                    self.persistence.snapshot(&self.hierarchy.to_vec());
                    tracing::debug!("drag committed");
                }
                self.drag = Drag::default();
            }
            self.selection.release(button);
        }

        if self.input.key_pressed(Key::Delete)
            && let Some(target) = self.selection.primary()
        {
            self.queued.push(match target.vertex {
                Some(vertex) => Intent::DeleteVertex {
                    shape: target.shape.clone(),
                    vertex,
                },
                None => Intent::Delete(target.shape.clone()),
            });
        }
    }

    fn draw(&mut self, now: u64) {
        let mut frame = LayerFrame {
            input: &self.input,
            hierarchy: &self.hierarchy,
            selection: &self.selection,
            template: &self.template,
            config: &self.config,
            camera: &self.camera,
            surface: &mut self.surface,
            actions: &mut self.actions,
        };
        self.background.draw(&mut frame);
        self.shapes.draw(&mut frame);
        for layer in &mut self.layers {
            layer.draw(&mut frame);
        }

        let Some(center) = self.menu_center() else {
            return;
        };
        let ratio = self.menu.ratio(now);
        for sector in self.menu.layout(now, &self.hierarchy) {
            let option = &self.menu.options()[sector.index];
            let alpha = if sector.enabled { ratio } else { 0.4 * ratio };
            let color = if sector.hovered { 0xffffff } else { option.color };
            self.surface.arc(
                center,
                sector.inner_radius,
                sector.outer_radius,
                sector.start_angle,
                sector.end_angle,
                &Paint::fill(color).with_alpha(alpha),
            );
            self.surface
                .icon(&option.icon, sector.anchor(center), 20.0 * ratio);
        }
        self.menu.offer(
            center,
            self.input.pointer(),
            now,
            &self.hierarchy,
            &mut self.actions,
        );
    }

    /// Screen position of the menu target, following its vertex if it moved.
    fn menu_center(&self) -> Option<Point> {
        let target = self.menu.target()?;
        let world = target
            .vertex
            .and_then(|v| self.hierarchy.get(target.shape.as_str())?.vertex(v))
            .unwrap_or(target.point);
        Some(self.camera.world_to_screen(world))
    }

    fn apply_one(&mut self, intent: Intent) -> Result<(), EditorError> {
        if let Some(id) = intent.subject()
            && !self.hierarchy.contains(id.as_str())
        {
            return Err(EditorError::StaleTarget(id.clone()));
        }
        let now = self.input.frame();
        let is_edit = intent.is_edit();
        match intent {
            Intent::Noop => {}
            Intent::CloseMenu => {
                self.menu.deactivate(now);
                self.selection.unstick(Button::Secondary);
            }
            Intent::Select(target) => {
                self.selection.select(target.clone(), &self.hierarchy)?;
                self.arm_drag();
                self.menu.retarget(target);
            }
            Intent::Deselect => self.selection.deselect(),
            Intent::Engage(button, target) => {
                self.selection.engage(button, target, &self.hierarchy)?;
                if button == Button::Primary {
                    self.arm_drag();
                }
            }
            Intent::OpenMenu(target) => {
                self.selection
                    .engage(Button::Secondary, target.clone(), &self.hierarchy)?;
                self.selection.stick(Button::Secondary);
                self.menu.activate(target, now, false);
            }
            Intent::Reparent { child, parent } => {
                self.hierarchy.reparent(child.as_str(), parent.as_str())?;
            }
            Intent::Rename { from, to } => {
                self.hierarchy.rename(from.as_str(), to.as_str())?;
                self.selection.rename(from.as_str(), &to);
                if let Some(target) = self.menu.target_mut()
                    && target.shape == from
                {
                    target.shape = to;
                }
            }
            Intent::Connect { from, to } => {
                self.hierarchy.connect(from.as_str(), to.as_str())?;
            }
            Intent::Disconnect { from, to } => {
                self.hierarchy.disconnect(from.as_str(), to.as_str());
            }
            Intent::Delete(id) => {
                self.hierarchy.delete(id.as_str())?;
            }
            Intent::DeleteVertex { shape, vertex } => {
                self.hierarchy.remove_vertex(shape.as_str(), vertex)?;
            }
            Intent::Duplicate(id) => {
                let copy = self.hierarchy.duplicate(id.as_str(), None)?;
                tracing::debug!(%id, %copy, "duplicated");
            }
            Intent::Split { shape, vertex } => {
                let copy = self.hierarchy.duplicate(shape.as_str(), Some(vertex))?;
                tracing::debug!(%shape, vertex, %copy, "split");
            }
            Intent::SetZ { shape, z } => {
                if let Some(s) = self.hierarchy.get_mut(shape.as_str()) {
                    s.z = z;
                }
            }
            Intent::SetStyle { shape, key, value } => {
                if let Some(s) = self.hierarchy.get_mut(shape.as_str()) {
                    s.style.set(&key, value, &self.template);
                }
            }
            Intent::Undo => {
                let shapes = self.persistence.undo().ok_or(EditorError::NothingToUndo)?;
                self.restore(shapes);
            }
            Intent::RevertAll => {
                let shapes = self.persistence.initial_state();
                self.restore(shapes);
            }
            Intent::Save(slot) => {
                self.persistence.save(&slot, &self.hierarchy.to_vec())?;
            }
            Intent::Load(slot) => {
                let shapes = self.persistence.load(&slot)?;
                self.restore(shapes);
            }
            Intent::JumpTo(id) => self.jump_to(&id),
        }
        if is_edit {
            self.persistence.snapshot(&self.hierarchy.to_vec());
        }
        Ok(())
    }

    /// Drags start only from a target engaged by this frame's primary press.
    fn arm_drag(&mut self) {
        if self.input.just_pressed(Button::Primary) {
            self.drag = Drag {
                armed: true,
                moved: false,
            };
        }
    }

    fn restore(&mut self, shapes: Vec<Shape>) {
        let report = self.hierarchy.load(shapes);
        if !report.is_clean() {
            tracing::warn!(?report, "restored map has unresolved references");
        }
        self.drag = Drag::default();
    }

    fn jump_to(&mut self, id: &ShapeId) {
        let Some(shape) = self.hierarchy.get(id.as_str()) else {
            return;
        };
        if shape.vertices.is_empty() {
            return;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Shapes have far fewer than 2^52 vertices."
        )]
        let n = shape.vertices.len() as f64;
        let sum = shape
            .vertices
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + v.to_vec2());
        self.camera.center_on((sum / n).to_point());
    }

    /// Drop stale targets and refresh the directory.
    fn settle(&mut self) -> bool {
        let now = self.input.frame();
        self.selection.retain_live(&self.hierarchy);
        let hierarchy = &self.hierarchy;
        self.menu.retain_target(now, |t| t.is_live(hierarchy));
        if self.selection.target(Button::Secondary).is_none() && self.menu.is_active() {
            self.menu.deactivate(now);
        }
        self.directory.refresh(&self.hierarchy)
    }

    /// The map.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// The selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The radial menu.
    pub fn menu(&self) -> &RadialMenu<Intent, Hierarchy> {
        &self.menu
    }

    /// The directory as of the last frame.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// This frame's input.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The style template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The input device.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// The persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the render surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The shape the primary target points at, for the property panel.
    pub fn selected_shape(&self) -> Option<&Shape> {
        let target: &Target = self.selection.primary()?;
        self.hierarchy.get(target.shape.as_str())
    }
}
