// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu options and the intents the menu emits on its own.

use core::fmt;

use waymark_selection::Target;

/// Actions the menu needs to produce on its own.
pub trait MenuIntent {
    /// An action that does nothing. Offered for disabled options so the click
    /// is still consumed.
    fn noop() -> Self;

    /// An action that closes the menu.
    fn close() -> Self;
}

/// One entry of a radial menu.
///
/// `A` is the action type offered to the dispatcher, `C` is whatever context
/// the enabled predicate inspects (usually the hierarchy).
pub struct MenuOption<A, C> {
    pub(crate) index: usize,
    /// Display name.
    pub name: String,
    /// Icon name, resolved by the render surface.
    pub icon: String,
    /// Sector color as `0xRRGGBB`.
    pub color: u32,
    /// Builds the action for the bound target.
    pub effect: fn(&Target) -> A,
    /// Whether the option applies to the bound target.
    pub enabled: fn(&Target, &C) -> bool,
}

fn always<C>(_: &Target, _: &C) -> bool {
    true
}

impl<A, C> MenuOption<A, C> {
    /// An always-enabled option.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: u32,
        effect: fn(&Target) -> A,
    ) -> Self {
        Self {
            index: 0,
            name: name.into(),
            icon: icon.into(),
            color,
            effect,
            enabled: always::<C>,
        }
    }

    /// Builder: set the enabled predicate.
    pub fn enabled_when(mut self, enabled: fn(&Target, &C) -> bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Position of this option in its menu, clockwise from the top.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<A, C> Clone for MenuOption<A, C> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            name: self.name.clone(),
            icon: self.icon.clone(),
            color: self.color,
            effect: self.effect,
            enabled: self.enabled,
        }
    }
}

impl<A, C> fmt::Debug for MenuOption<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("color", &format_args!("{:#08x}", self.color))
            .finish_non_exhaustive()
    }
}
