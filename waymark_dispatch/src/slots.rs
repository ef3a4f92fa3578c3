// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred action slots: collect offers during the draw pass, fire once after it.
//!
//! ## Semantics
//!
//! - [`DeferredActions::begin_frame`] clears every slot and arms the buttons whose
//!   rising edge fired this frame.
//! - [`DeferredActions::offer`] is ignored for unarmed buttons. For armed buttons,
//!   [`OfferMode::Overwrite`] always replaces the slot, while
//!   [`OfferMode::KeepExisting`] only fills an empty slot.
//! - [`DeferredActions::fire_all`] hands each populated slot to the handler exactly
//!   once, then clears and disarms everything.
//!
//! Layers offer in draw order, so the topmost layer's unconditional offer wins. A
//! layer that should yield to whatever is already claimed offers with
//! [`OfferMode::KeepExisting`]. The asymmetry is intentional: the *last*
//! overwriting offer wins, but the *first* keep-existing offer wins an empty slot.
//!
//! ## Example
//!
//! ```
//! use waymark_dispatch::{DeferredActions, OfferMode};
//! use waymark_input::{Button, ButtonSet};
//!
//! let mut actions = DeferredActions::new();
//! actions.begin_frame(ButtonSet::PRIMARY);
//!
//! actions.offer(Button::Primary, "effect1", OfferMode::Overwrite);
//! actions.offer(Button::Primary, "effect2", OfferMode::Overwrite);
//! actions.offer(Button::Primary, "effect3", OfferMode::KeepExisting);
//!
//! let mut fired = Vec::new();
//! actions.fire_all(|button, action| fired.push((button, action)));
//! assert_eq!(fired, vec![(Button::Primary, "effect2")]);
//! assert!(actions.is_empty());
//! ```

use waymark_input::{Button, ButtonSet};

/// How an offer treats a slot that is already populated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OfferMode {
    /// Replace whatever is in the slot.
    #[default]
    Overwrite,
    /// Only populate the slot if nothing has claimed it yet.
    KeepExisting,
}

/// One deferred slot per pointer button.
#[derive(Clone, Debug)]
pub struct DeferredActions<A> {
    slots: [Option<A>; 3],
    armed: ButtonSet,
}

impl<A> Default for DeferredActions<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DeferredActions<A> {
    /// Create an empty, unarmed registry.
    pub fn new() -> Self {
        Self {
            slots: [None, None, None],
            armed: ButtonSet::empty(),
        }
    }

    /// Start a draw pass: clear all slots and arm the buttons in `pressed`.
    ///
    /// `pressed` is normally [`InputState::pressed`](waymark_input::InputState::pressed).
    pub fn begin_frame(&mut self, pressed: ButtonSet) {
        self.clear();
        self.armed = pressed;
    }

    /// Offer `action` for `button`.
    ///
    /// Returns `true` if the action now occupies the slot. Offers for buttons
    /// without a rising edge this frame are dropped.
    pub fn offer(&mut self, button: Button, action: A, mode: OfferMode) -> bool {
        if !self.armed.has(button) {
            return false;
        }
        let slot = &mut self.slots[button.index()];
        match mode {
            OfferMode::KeepExisting if slot.is_some() => {
                tracing::trace!(?button, "offer yields to existing slot");
                false
            }
            _ => {
                if slot.is_some() {
                    tracing::trace!(?button, "offer replaces existing slot");
                }
                *slot = Some(action);
                true
            }
        }
    }

    /// Shorthand for an overwriting offer on the primary button.
    pub fn offer_primary(&mut self, action: A) -> bool {
        self.offer(Button::Primary, action, OfferMode::Overwrite)
    }

    /// `true` if `button` can still receive offers this frame.
    pub fn is_armed(&self, button: Button) -> bool {
        self.armed.has(button)
    }

    /// `true` if `button`'s slot holds an action.
    pub fn is_populated(&self, button: Button) -> bool {
        self.slots[button.index()].is_some()
    }

    /// The action currently occupying `button`'s slot.
    pub fn peek(&self, button: Button) -> Option<&A> {
        self.slots[button.index()].as_ref()
    }

    /// `true` if no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Fire every populated slot exactly once, in button order, then reset.
    ///
    /// Returns the number of actions fired (at most one per button).
    pub fn fire_all(&mut self, mut handler: impl FnMut(Button, A)) -> usize {
        let mut fired = 0;
        for button in Button::ALL {
            if let Some(action) = self.slots[button.index()].take() {
                handler(button, action);
                fired += 1;
            }
        }
        self.armed = ButtonSet::empty();
        fired
    }

    /// Drop all offers without firing them. Armed buttons stay armed.
    pub fn clear(&mut self) {
        self.slots = [None, None, None];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired<A>(actions: &mut DeferredActions<A>) -> Vec<(Button, A)> {
        let mut out = Vec::new();
        actions.fire_all(|b, a| out.push((b, a)));
        out
    }

    #[test]
    fn unarmed_button_ignores_offers() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::empty());
        assert!(!actions.offer(Button::Primary, 1, OfferMode::Overwrite));
        assert!(!actions.is_populated(Button::Primary));
        assert!(fired(&mut actions).is_empty());
    }

    #[test]
    fn last_overwriting_offer_wins() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY);
        for i in 0..5 {
            actions.offer_primary(i);
        }
        assert_eq!(fired(&mut actions), vec![(Button::Primary, 4)]);
    }

    #[test]
    fn overwrite_then_keep_existing_fires_first() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY);
        assert!(actions.offer(Button::Primary, 'x', OfferMode::Overwrite));
        assert!(!actions.offer(Button::Primary, 'y', OfferMode::KeepExisting));
        assert_eq!(fired(&mut actions), vec![(Button::Primary, 'x')]);
    }

    #[test]
    fn keep_existing_then_overwrite_fires_second() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY);
        assert!(actions.offer(Button::Primary, 'y', OfferMode::KeepExisting));
        assert!(actions.offer(Button::Primary, 'x', OfferMode::Overwrite));
        assert_eq!(fired(&mut actions), vec![(Button::Primary, 'x')]);
    }

    #[test]
    fn first_keep_existing_offer_claims_empty_slot() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::SECONDARY);
        actions.offer(Button::Secondary, 1, OfferMode::KeepExisting);
        actions.offer(Button::Secondary, 2, OfferMode::KeepExisting);
        assert_eq!(fired(&mut actions), vec![(Button::Secondary, 1)]);
    }

    #[test]
    fn slots_are_independent_per_button() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY | ButtonSet::SECONDARY);
        actions.offer(Button::Secondary, "close", OfferMode::KeepExisting);
        actions.offer(Button::Primary, "select", OfferMode::Overwrite);
        actions.offer(Button::Middle, "pan", OfferMode::Overwrite);
        assert_eq!(
            fired(&mut actions),
            vec![(Button::Primary, "select"), (Button::Secondary, "close")]
        );
    }

    #[test]
    fn fire_all_clears_and_disarms() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY);
        actions.offer_primary(7);
        assert_eq!(actions.fire_all(|_, _| {}), 1);
        assert!(actions.is_empty());
        assert!(!actions.is_armed(Button::Primary));
        // A late offer after dispatch must not leak into the next frame.
        assert!(!actions.offer_primary(8));
        assert_eq!(actions.fire_all(|_, _| {}), 0);
    }

    #[test]
    fn begin_frame_discards_stale_offers() {
        let mut actions = DeferredActions::new();
        actions.begin_frame(ButtonSet::PRIMARY);
        actions.offer_primary(1);
        actions.begin_frame(ButtonSet::PRIMARY);
        assert!(actions.peek(Button::Primary).is_none());
    }
}
