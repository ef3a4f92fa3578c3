// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame edge detection over a polled input device.
//!
//! ## Usage
//!
//! 1) Once per frame, poll the device into a [`RawInput`].
//! 2) Call [`InputState::update`] with it before anything else reads input.
//! 3) Query edges ([`InputState::just_pressed`], [`InputState::just_released`]),
//!    held state, drag deltas, and the double-click flag for the rest of the frame.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use waymark_input::{Button, ButtonSet, InputState, RawInput};
//!
//! let mut input = InputState::default();
//!
//! let mut raw = RawInput::at(Point::new(10.0, 10.0));
//! raw.held = ButtonSet::PRIMARY;
//! input.update(&raw);
//! assert!(input.just_pressed(Button::Primary));
//!
//! // Still held next frame: no new edge.
//! raw.pointer = Point::new(14.0, 13.0);
//! input.update(&raw);
//! assert!(!input.just_pressed(Button::Primary));
//! assert!(input.is_held(Button::Primary));
//! assert_eq!(input.drag_delta(Button::Primary).x, 4.0);
//!
//! raw.held = ButtonSet::empty();
//! input.update(&raw);
//! assert!(input.just_released(Button::Primary));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::button::{Button, ButtonSet};

/// Keys the editor core reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Abort the edit in progress.
    Escape,
    /// Delete the selection.
    Delete,
    /// Confirm.
    Enter,
    /// Modifier used for additive gestures.
    Shift,
    /// Modifier used for shortcuts.
    Control,
    /// Any printable character.
    Character(char),
}

/// Raw device snapshot for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawInput {
    /// Buttons physically held down right now.
    pub held: ButtonSet,
    /// Pointer position in screen space.
    pub pointer: Point,
    /// Scroll delta accumulated since the previous poll (positive zooms in).
    pub scroll: f64,
    /// Keys physically held down right now.
    pub keys_held: SmallVec<[Key; 4]>,
    /// Keydown events delivered since the previous poll, in arrival order.
    pub keydowns: SmallVec<[Key; 4]>,
}

impl RawInput {
    /// An idle snapshot with the pointer at `pointer`.
    pub fn at(pointer: Point) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }
}

/// Tuning for derived input signals.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// Maximum frames between two primary presses for them to count as a double click.
    pub double_click_frames: u64,
    /// Maximum pointer travel between the two presses, or `None` for unlimited.
    pub double_click_distance: Option<f64>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_frames: 18,
            double_click_distance: Some(5.0),
        }
    }
}

/// Where and when a button went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Press {
    /// Pointer position at press time.
    pub position: Point,
    /// Frame counter at press time.
    pub frame: u64,
}

/// Edge-triggered input state for the primary, middle, and secondary buttons.
///
/// The state is total over all inputs: any sequence of [`RawInput`]s is valid,
/// and it never touches scene data.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    config: InputConfig,
    frame: u64,
    held: ButtonSet,
    prev_held: ButtonSet,
    pressed: ButtonSet,
    released: ButtonSet,
    pointer: Point,
    prev_pointer: Point,
    scroll: f64,
    presses: [Option<Press>; 3],
    drag: [Vec2; 3],
    last_primary_press: Option<Press>,
    double_click: bool,
    keys_held: SmallVec<[Key; 4]>,
    keydowns: SmallVec<[Key; 4]>,
}

impl InputState {
    /// Create an input state with a custom configuration.
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Consume one frame of raw input and recompute all edge flags.
    pub fn update(&mut self, raw: &RawInput) {
        self.frame += 1;
        self.prev_held = self.held;
        self.held = raw.held;
        self.pressed = self.held & !self.prev_held;
        self.released = self.prev_held & !self.held;
        self.prev_pointer = self.pointer;
        self.pointer = raw.pointer;
        self.scroll = raw.scroll;
        self.keys_held.clone_from(&raw.keys_held);
        self.keydowns.clone_from(&raw.keydowns);
        self.double_click = false;

        for button in Button::ALL {
            let i = button.index();
            if self.pressed.has(button) {
                let press = Press {
                    position: self.pointer,
                    frame: self.frame,
                };
                self.presses[i] = Some(press);
                self.drag[i] = Vec2::ZERO;
                if button == Button::Primary {
                    self.double_click = self.is_double(press);
                    self.last_primary_press = Some(press);
                }
            } else if self.held.has(button)
                && let Some(press) = self.presses[i]
            {
                self.drag[i] = self.pointer - press.position;
            }
        }

        if !self.pressed.is_empty() || !self.released.is_empty() {
            tracing::trace!(
                frame = self.frame,
                pressed = ?self.pressed,
                released = ?self.released,
                "input edges"
            );
        }
    }

    fn is_double(&self, press: Press) -> bool {
        let Some(last) = self.last_primary_press else {
            return false;
        };
        let in_time = press.frame.saturating_sub(last.frame) <= self.config.double_click_frames;
        let in_place = self
            .config
            .double_click_distance
            .is_none_or(|d| press.position.distance(last.position) <= d);
        in_time && in_place
    }

    /// Frame counter, incremented by every [`InputState::update`].
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// `true` while `button` is held.
    pub fn is_held(&self, button: Button) -> bool {
        self.held.has(button)
    }

    /// `true` if `button` was held during the previous frame.
    pub fn was_held(&self, button: Button) -> bool {
        self.prev_held.has(button)
    }

    /// `true` only on the frame `button` went down.
    pub fn just_pressed(&self, button: Button) -> bool {
        self.pressed.has(button)
    }

    /// `true` only on the frame `button` went up.
    pub fn just_released(&self, button: Button) -> bool {
        self.released.has(button)
    }

    /// Buttons currently held.
    pub fn held(&self) -> ButtonSet {
        self.held
    }

    /// Buttons whose rising edge fired this frame.
    pub fn pressed(&self) -> ButtonSet {
        self.pressed
    }

    /// Buttons whose falling edge fired this frame.
    pub fn released(&self) -> ButtonSet {
        self.released
    }

    /// `true` on the frame a primary press completes a double click.
    pub fn double_click(&self) -> bool {
        self.double_click
    }

    /// Pointer position in screen space.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Pointer movement since the previous frame.
    pub fn pointer_motion(&self) -> Vec2 {
        self.pointer - self.prev_pointer
    }

    /// Scroll delta for this frame.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Pointer offset since `button` was last pressed.
    ///
    /// Zero until the first press; kept after release until the next press.
    pub fn drag_delta(&self, button: Button) -> Vec2 {
        self.drag[button.index()]
    }

    /// The most recent press of `button`, if any.
    pub fn press(&self, button: Button) -> Option<Press> {
        self.presses[button.index()]
    }

    /// `true` while `key` is held.
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// `true` if a keydown for `key` arrived this frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keydowns.contains(&key)
    }

    /// Keydown events for this frame, in arrival order.
    pub fn keydowns(&self) -> &[Key] {
        &self.keydowns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(held: ButtonSet, x: f64, y: f64) -> RawInput {
        RawInput {
            held,
            ..RawInput::at(Point::new(x, y))
        }
    }

    #[test]
    fn rising_and_falling_edges_last_one_frame() {
        let mut input = InputState::default();
        input.update(&raw(ButtonSet::PRIMARY, 0.0, 0.0));
        assert!(input.just_pressed(Button::Primary));
        assert!(!input.was_held(Button::Primary));

        input.update(&raw(ButtonSet::PRIMARY, 0.0, 0.0));
        assert!(!input.just_pressed(Button::Primary));
        assert!(input.was_held(Button::Primary));
        assert!(input.is_held(Button::Primary));

        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        assert!(input.just_released(Button::Primary));
        assert!(!input.is_held(Button::Primary));

        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        assert!(!input.just_released(Button::Primary));
    }

    #[test]
    fn buttons_are_independent() {
        let mut input = InputState::default();
        input.update(&raw(ButtonSet::SECONDARY, 0.0, 0.0));
        input.update(&raw(ButtonSet::SECONDARY | ButtonSet::MIDDLE, 0.0, 0.0));
        assert!(input.just_pressed(Button::Middle));
        assert!(!input.just_pressed(Button::Secondary));
        assert!(!input.is_held(Button::Primary));
    }

    #[test]
    fn press_and_release_in_one_poll_gap_yields_both_edges_across_frames() {
        let mut input = InputState::default();
        input.update(&raw(ButtonSet::PRIMARY, 0.0, 0.0));
        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        assert!(input.just_released(Button::Primary));
        assert!(!input.just_pressed(Button::Primary));
    }

    #[test]
    fn drag_delta_measures_from_press_and_survives_release() {
        let mut input = InputState::default();
        input.update(&raw(ButtonSet::empty(), 5.0, 5.0));
        assert_eq!(input.drag_delta(Button::Primary), Vec2::ZERO);

        input.update(&raw(ButtonSet::PRIMARY, 10.0, 10.0));
        input.update(&raw(ButtonSet::PRIMARY, 13.0, 6.0));
        assert_eq!(input.drag_delta(Button::Primary), Vec2::new(3.0, -4.0));

        input.update(&raw(ButtonSet::empty(), 50.0, 50.0));
        assert_eq!(input.drag_delta(Button::Primary), Vec2::new(3.0, -4.0));

        input.update(&raw(ButtonSet::PRIMARY, 50.0, 50.0));
        assert_eq!(input.drag_delta(Button::Primary), Vec2::ZERO);
    }

    #[test]
    fn double_click_within_window() {
        let mut input = InputState::default();
        input.update(&raw(ButtonSet::PRIMARY, 10.0, 10.0));
        assert!(!input.double_click());
        input.update(&raw(ButtonSet::empty(), 10.0, 10.0));
        input.update(&raw(ButtonSet::PRIMARY, 12.0, 11.0));
        assert!(input.double_click());
        // Flag is an edge as well.
        input.update(&raw(ButtonSet::PRIMARY, 12.0, 11.0));
        assert!(!input.double_click());
    }

    #[test]
    fn double_click_rejected_when_slow_or_far() {
        let config = InputConfig {
            double_click_frames: 2,
            double_click_distance: Some(5.0),
        };
        let mut input = InputState::with_config(config);
        input.update(&raw(ButtonSet::PRIMARY, 0.0, 0.0));
        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        input.update(&raw(ButtonSet::PRIMARY, 0.0, 0.0));
        assert!(!input.double_click(), "three frames apart exceeds the window");

        input.update(&raw(ButtonSet::empty(), 0.0, 0.0));
        input.update(&raw(ButtonSet::PRIMARY, 30.0, 0.0));
        assert!(!input.double_click(), "30px apart exceeds the distance");
    }

    #[test]
    fn keys_are_reported_per_frame() {
        let mut input = InputState::default();
        let mut r = raw(ButtonSet::empty(), 0.0, 0.0);
        r.keys_held.push(Key::Shift);
        r.keydowns.push(Key::Escape);
        input.update(&r);
        assert!(input.key_held(Key::Shift));
        assert!(input.key_pressed(Key::Escape));

        r.keydowns.clear();
        input.update(&r);
        assert!(!input.key_pressed(Key::Escape));
        assert!(input.keydowns().is_empty());
    }

    #[test]
    fn scroll_is_not_accumulated() {
        let mut input = InputState::default();
        let mut r = raw(ButtonSet::empty(), 0.0, 0.0);
        r.scroll = 2.0;
        input.update(&r);
        assert_eq!(input.scroll(), 2.0);
        r.scroll = 0.0;
        input.update(&r);
        assert_eq!(input.scroll(), 0.0);
    }
}
