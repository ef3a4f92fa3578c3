// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer buttons and button sets.

/// One of the three pointer buttons tracked per frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    /// Left button: select, engage, and run menu options.
    Primary,
    /// Middle button: camera panning.
    Middle,
    /// Right button: open the contextual menu.
    Secondary,
}

impl Button {
    /// All buttons in slot order.
    pub const ALL: [Self; 3] = [Self::Primary, Self::Middle, Self::Secondary];

    /// Slot index of this button (`0..3`).
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
        }
    }

    /// The single-bit [`ButtonSet`] for this button.
    pub const fn bit(self) -> ButtonSet {
        match self {
            Self::Primary => ButtonSet::PRIMARY,
            Self::Middle => ButtonSet::MIDDLE,
            Self::Secondary => ButtonSet::SECONDARY,
        }
    }
}

bitflags::bitflags! {
    /// A set of pointer buttons, used for held state and edge masks.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ButtonSet: u8 {
        /// Primary (left) button.
        const PRIMARY   = 0b0000_0001;
        /// Middle button.
        const MIDDLE    = 0b0000_0010;
        /// Secondary (right) button.
        const SECONDARY = 0b0000_0100;
    }
}

impl ButtonSet {
    /// Returns `true` if `button` is in the set.
    pub fn has(self, button: Button) -> bool {
        self.contains(button.bit())
    }

    /// Iterate the buttons in the set, in slot order.
    pub fn buttons(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.has(*b))
    }
}

impl From<Button> for ButtonSet {
    fn from(button: Button) -> Self {
        button.bit()
    }
}
