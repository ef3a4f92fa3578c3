// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Dispatch: at-most-once click dispatch for immediate-mode editors.
//!
//! ## Overview
//!
//! In an immediate-mode editor every visual layer draws itself and, while doing
//! so, decides whether it wants the click that happened this frame. Running the
//! effect right there would let two overlapping layers both act on one click.
//! Instead each layer *offers* an action to [`DeferredActions`]; after drawing,
//! [`DeferredActions::fire_all`] runs the one surviving offer per button.
//!
//! This models "topmost wins, but some layers defer to others" without an explicit
//! z-order list: layers are visited in draw order, overwriting offers replace
//! earlier ones, and [`OfferMode::KeepExisting`] offers only claim empty slots.
//!
//! ## Workflow
//!
//! 1) Tick: update `waymark_input::InputState`, then call
//!    [`DeferredActions::begin_frame`] with the buttons pressed this frame.
//! 2) Draw: each layer calls [`DeferredActions::offer`] for the clicks it handles.
//! 3) Dispatch: call [`DeferredActions::fire_all`] once. At most one action fires
//!    per button and every slot is empty afterwards.
//!
//! Actions are plain values, typically an editor intent enum, so the firing
//! point can validate them against the current scene before applying them.

mod slots;

pub use slots::{DeferredActions, OfferMode};
