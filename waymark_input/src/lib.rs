// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Input: edge-triggered input state for a fixed-tick editor loop.
//!
//! An editor frame samples the input device exactly once. This crate turns that
//! sample into the signals the rest of the frame consumes:
//!
//! - **Edges**: [`InputState::just_pressed`] and [`InputState::just_released`] fire on
//!   exactly one frame per transition, independently for each [`Button`].
//! - **Held state**: [`InputState::is_held`] and the previous frame's snapshot
//!   [`InputState::was_held`].
//! - **Drag deltas**: [`InputState::drag_delta`] is the pointer offset since the
//!   button was pressed.
//! - **Double click**: [`InputState::double_click`], tuned by [`InputConfig`].
//! - **Keys**: held keys and keydown events for the frame.
//!
//! The state never touches scene data. Dispatching the resulting clicks is the
//! job of `waymark_dispatch`, which only accepts offers for buttons whose edge
//! fired this frame.
//!
//! ```
//! use kurbo::Point;
//! use waymark_input::{Button, ButtonSet, InputState, RawInput};
//!
//! let mut input = InputState::default();
//! input.update(&RawInput { held: ButtonSet::SECONDARY, ..RawInput::at(Point::ZERO) });
//! assert_eq!(input.pressed(), ButtonSet::SECONDARY);
//! assert!(input.just_pressed(Button::Secondary));
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`InputConfig`], [`RawInput`], and friends.

mod button;
mod state;

pub use button::{Button, ButtonSet};
pub use state::{InputConfig, InputState, Key, Press, RawInput};
