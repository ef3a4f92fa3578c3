// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Radial: an animated radial context menu for a selected vertex.
//!
//! ## Overview
//!
//! [`RadialMenu`] is a small state machine:
//!
//! ```text
//! Inactive --activate--> Active --deactivate--> FadingOut --fade_frames--> Inactive
//! ```
//!
//! While visible it lays its options out as equal sectors of an annulus around
//! the bound [`Target`](waymark_selection::Target). The annulus radii are
//! scaled by an ease ratio, `min(1, elapsed^0.7 / k)`, which is inverted after
//! deactivation so the menu shrinks away while it stays hit-testable.
//!
//! Options never run directly. Each frame the menu is the topmost layer to call
//! [`RadialMenu::offer`], which places the hovered option's action (or a no-op
//! for a disabled option) into a `waymark_dispatch::DeferredActions` registry.
//! A click well outside the menu offers a close action instead.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_dispatch::DeferredActions;
//! use waymark_input::{Button, ButtonSet};
//! use waymark_radial::{MenuIntent, MenuOption, RadialMenu};
//! use waymark_selection::Target;
//!
//! #[derive(Debug, PartialEq)]
//! enum Action {
//!     Nothing,
//!     Close,
//!     Delete(String),
//! }
//!
//! impl MenuIntent for Action {
//!     fn noop() -> Self {
//!         Self::Nothing
//!     }
//!     fn close() -> Self {
//!         Self::Close
//!     }
//! }
//!
//! let mut menu: RadialMenu<Action, ()> = RadialMenu::new([MenuOption::new(
//!     "delete",
//!     "trash",
//!     0xcc3333,
//!     |t| Action::Delete(t.shape.to_string()),
//! )]);
//! menu.activate(Target::vertex("wall", 0, Point::ZERO), 0, false);
//!
//! let mut actions = DeferredActions::new();
//! actions.begin_frame(ButtonSet::PRIMARY);
//! let center = Point::new(200.0, 200.0);
//! menu.offer(center, Point::new(200.0, 150.0), 60, &(), &mut actions);
//!
//! let mut fired = Vec::new();
//! actions.fire_all(|_, a| fired.push(a));
//! assert_eq!(fired, vec![Action::Delete("wall".into())]);
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`RadialConfig`].

mod config;
mod menu;
mod option;

pub use config::RadialConfig;
pub use menu::{Phase, RadialMenu, SectorLayout};
pub use option::{MenuIntent, MenuOption};
