// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engaged targets per button, plus the highlighted shape.

use kurbo::{Point, Vec2};
use waymark_hierarchy::{Hierarchy, ShapeId};
use waymark_input::{Button, ButtonSet};

use crate::error::SelectionError;
use crate::target::Target;

#[derive(Clone, Debug)]
struct Engaged {
    target: Target,
    vertex_old: Vec<Point>,
    stuck: bool,
}

/// What [`Selection::cancel`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The primary button was still held: the snapshot was restored and the
    /// selection cleared.
    Reverted,
    /// The edit was already committed: only the primary slot was cleared.
    Cleared,
    /// There was no primary target.
    Nothing,
}

/// Selection and drag-target state.
///
/// Each pointer button owns at most one engaged [`Target`]. Engaging a target
/// snapshots its shape's vertices so a drag can be applied relative to the
/// snapshot and rolled back verbatim on cancel.
///
/// The primary slot is the selection: it persists after the button is released
/// and is cleared by [`Selection::deselect`] or [`Selection::cancel`]. The other
/// slots clear on release unless stuck, which is how a radial menu keeps its
/// target after the secondary click that opened it.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    slots: [Option<Engaged>; 3],
    highlight: Option<ShapeId>,
    revision: u64,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage `target` on `button`, snapshotting the shape's vertices.
    ///
    /// Replaces whatever `button` held before.
    pub fn engage(
        &mut self,
        button: Button,
        target: Target,
        hierarchy: &Hierarchy,
    ) -> Result<(), SelectionError> {
        let Some(shape) = hierarchy.get(target.shape.as_str()) else {
            return Err(SelectionError::StaleTarget(target.shape));
        };
        tracing::trace!(?button, shape = %target.shape, vertex = ?target.vertex, "target engaged");
        self.slots[button.index()] = Some(Engaged {
            vertex_old: shape.vertices.clone(),
            target,
            stuck: false,
        });
        self.bump_revision();
        Ok(())
    }

    /// Make `target` the selection: engage it on the primary button and
    /// move the highlight to its shape.
    pub fn select(&mut self, target: Target, hierarchy: &Hierarchy) -> Result<(), SelectionError> {
        let shape = target.shape.clone();
        self.engage(Button::Primary, target, hierarchy)?;
        self.highlight = Some(shape);
        Ok(())
    }

    /// Clear the highlight and the primary slot. Other buttons are untouched.
    pub fn deselect(&mut self) {
        let slot = self.slots[Button::Primary.index()].take();
        let highlight = self.highlight.take();
        if slot.is_some() || highlight.is_some() {
            self.bump_revision();
        }
    }

    /// Abort the current edit.
    ///
    /// If the primary button is still in `held`, the engaged shape's vertices
    /// are restored from the snapshot and the selection is cleared. Otherwise
    /// the edit has been committed and only the primary slot is cleared.
    pub fn cancel(&mut self, held: ButtonSet, hierarchy: &mut Hierarchy) -> CancelOutcome {
        let Some(engaged) = self.slots[Button::Primary.index()].as_ref() else {
            return CancelOutcome::Nothing;
        };
        if !held.has(Button::Primary) {
            self.slots[Button::Primary.index()] = None;
            self.bump_revision();
            return CancelOutcome::Cleared;
        }
        let shape = engaged.target.shape.clone();
        let snapshot = engaged.vertex_old.clone();
        if hierarchy.set_vertices(shape.as_str(), snapshot).is_err() {
            tracing::debug!(%shape, "cancel: shape gone, nothing to restore");
        } else {
            tracing::debug!(%shape, "cancel: vertices restored");
        }
        self.deselect();
        CancelOutcome::Reverted
    }

    /// Keep `button`'s target past its release.
    pub fn stick(&mut self, button: Button) -> bool {
        match self.slots[button.index()].as_mut() {
            Some(engaged) => {
                engaged.stuck = true;
                true
            }
            None => false,
        }
    }

    /// Called on `button`'s falling edge. Clears a non-primary slot unless it
    /// is stuck. Returns `true` if a slot was cleared.
    pub fn release(&mut self, button: Button) -> bool {
        if button == Button::Primary {
            return false;
        }
        let slot = &mut self.slots[button.index()];
        if slot.as_ref().is_some_and(|e| !e.stuck) {
            *slot = None;
            self.bump_revision();
            return true;
        }
        false
    }

    /// Clear `button`'s slot regardless of the stuck flag.
    pub fn unstick(&mut self, button: Button) -> Option<Target> {
        let engaged = self.slots[button.index()].take()?;
        self.bump_revision();
        Some(engaged.target)
    }

    /// Move the engaged vertex (or the whole shape) by `delta` relative to the
    /// snapshot taken at engage time.
    ///
    /// `delta` is the total pointer travel since the press, so calling this
    /// every frame with the current drag delta is idempotent. Returns `Ok(false)`
    /// if `button` has no target.
    pub fn drag(
        &mut self,
        button: Button,
        delta: Vec2,
        hierarchy: &mut Hierarchy,
    ) -> Result<bool, SelectionError> {
        let Some(engaged) = self.slots[button.index()].as_ref() else {
            return Ok(false);
        };
        let shape = engaged.target.shape.clone();
        if !hierarchy.contains(shape.as_str()) {
            self.slots[button.index()] = None;
            self.bump_revision();
            return Err(SelectionError::StaleTarget(shape));
        }
        let mut vertices = engaged.vertex_old.clone();
        match engaged.target.vertex {
            Some(i) => {
                if let Some(v) = vertices.get_mut(i) {
                    *v += delta;
                }
            }
            None => {
                for v in &mut vertices {
                    *v += delta;
                }
            }
        }
        hierarchy
            .set_vertices(shape.as_str(), vertices)
            .map_err(|_| SelectionError::StaleTarget(shape))?;
        Ok(true)
    }

    /// Clear targets whose shape was deleted and drop vertex indices that fell
    /// off the end. Returns the number of slots touched.
    pub fn retain_live(&mut self, hierarchy: &Hierarchy) -> usize {
        let mut touched = 0;
        for slot in &mut self.slots {
            let Some(engaged) = slot.as_mut() else {
                continue;
            };
            match hierarchy.get(engaged.target.shape.as_str()) {
                None => {
                    tracing::debug!(shape = %engaged.target.shape, "dropping stale target");
                    *slot = None;
                    touched += 1;
                }
                Some(shape) => {
                    if engaged.target.vertex.is_some_and(|v| v >= shape.vertices.len()) {
                        engaged.target.vertex = None;
                        touched += 1;
                    }
                }
            }
        }
        if self
            .highlight
            .as_ref()
            .is_some_and(|h| !hierarchy.contains(h.as_str()))
        {
            self.highlight = None;
            touched += 1;
        }
        if touched > 0 {
            self.bump_revision();
        }
        touched
    }

    /// Follow a shape rename in every slot and the highlight.
    pub fn rename(&mut self, old: &str, new: &ShapeId) {
        let mut changed = false;
        for engaged in self.slots.iter_mut().flatten() {
            if engaged.target.shape == old {
                engaged.target.shape = new.clone();
                changed = true;
            }
        }
        if let Some(h) = self.highlight.as_mut()
            && *h == old
        {
            *h = new.clone();
            changed = true;
        }
        if changed {
            self.bump_revision();
        }
    }

    /// Refresh the snapshot for `button` from the current vertices, making the
    /// current geometry the new baseline for drags and cancel.
    pub fn commit(&mut self, button: Button, hierarchy: &Hierarchy) -> bool {
        let Some(engaged) = self.slots[button.index()].as_mut() else {
            return false;
        };
        match hierarchy.get(engaged.target.shape.as_str()) {
            Some(shape) => {
                engaged.vertex_old.clone_from(&shape.vertices);
                true
            }
            None => false,
        }
    }

    /// The target engaged on `button`.
    pub fn target(&self, button: Button) -> Option<&Target> {
        self.slots[button.index()].as_ref().map(|e| &e.target)
    }

    /// The selection (primary target).
    pub fn primary(&self) -> Option<&Target> {
        self.target(Button::Primary)
    }

    /// The vertex snapshot taken when `button`'s target was engaged.
    pub fn snapshot(&self, button: Button) -> Option<&[Point]> {
        self.slots[button.index()]
            .as_ref()
            .map(|e| e.vertex_old.as_slice())
    }

    /// `true` if `button`'s target survives release.
    pub fn is_stuck(&self, button: Button) -> bool {
        self.slots[button.index()].as_ref().is_some_and(|e| e.stuck)
    }

    /// The highlighted shape.
    pub fn highlight(&self) -> Option<&ShapeId> {
        self.highlight.as_ref()
    }

    /// `true` if `shape` is highlighted.
    pub fn is_highlighted(&self, shape: &str) -> bool {
        self.highlight.as_ref().is_some_and(|h| h == shape)
    }

    /// Counter bumped whenever targets or the highlight change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
