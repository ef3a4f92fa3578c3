// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu state machine, easing, hit testing, and dispatch.

use core::f64::consts::TAU;
use core::fmt;

use kurbo::{Point, Vec2};
use waymark_dispatch::{DeferredActions, OfferMode};
use waymark_input::Button;
use waymark_selection::Target;

use crate::config::RadialConfig;
use crate::option::{MenuIntent, MenuOption};

/// Lifecycle phase of a [`RadialMenu`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Hidden; ignores the pointer.
    Inactive,
    /// Easing in or fully open.
    Active,
    /// Closing; still painted and hit-testable until the fade ends.
    FadingOut,
}

/// Geometry of one sector for painting.
///
/// Angles are in radians, clockwise from the top (screen space, y down).
#[derive(Clone, Debug, PartialEq)]
pub struct SectorLayout {
    /// Option index.
    pub index: usize,
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
    /// Eased inner radius.
    pub inner_radius: f64,
    /// Eased outer radius.
    pub outer_radius: f64,
    /// Whether the option's predicate allows it for the bound target.
    pub enabled: bool,
    /// Whether the pointer was over this sector at the last dispatch.
    pub hovered: bool,
}

impl SectorLayout {
    /// The middle of the annulus along the sector's bisector, for icons.
    pub fn anchor(&self, center: Point) -> Point {
        let mid = 0.5 * (self.start_angle + self.end_angle);
        let r = 0.5 * (self.inner_radius + self.outer_radius);
        center + Vec2::new(mid.sin(), -mid.cos()) * r
    }
}

/// A radial context menu bound to a [`Target`].
///
/// Options are laid out as equal angular sectors around the target, with
/// option 0 centered at the top and the rest following clockwise. Each sector
/// is an annulus whose radii scale with the ease ratio, so the menu grows in
/// on activation and shrinks out on deactivation.
///
/// The menu never runs an option itself. [`RadialMenu::offer`] hands the
/// hovered option's action to a [`DeferredActions`] registry, which fires at
/// most one action per button after every layer has drawn.
pub struct RadialMenu<A, C> {
    config: RadialConfig,
    options: Vec<MenuOption<A, C>>,
    active: bool,
    active_time: Option<u64>,
    target: Option<Target>,
    hovered: Option<usize>,
}

impl<A, C> fmt::Debug for RadialMenu<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadialMenu")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("active", &self.active)
            .field("active_time", &self.active_time)
            .field("target", &self.target)
            .field("hovered", &self.hovered)
            .finish()
    }
}

impl<A, C> RadialMenu<A, C> {
    /// Create an inactive menu with the default configuration.
    pub fn new(options: impl IntoIterator<Item = MenuOption<A, C>>) -> Self {
        Self::with_config(RadialConfig::default(), options)
    }

    /// Create an inactive menu.
    pub fn with_config(
        config: RadialConfig,
        options: impl IntoIterator<Item = MenuOption<A, C>>,
    ) -> Self {
        let options = options
            .into_iter()
            .enumerate()
            .map(|(index, mut option)| {
                option.index = index;
                option
            })
            .collect();
        Self {
            config,
            options,
            active: false,
            active_time: None,
            target: None,
            hovered: None,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    /// The options in sector order.
    pub fn options(&self) -> &[MenuOption<A, C>] {
        &self.options
    }

    /// Open the menu on `target` at frame `now`.
    ///
    /// The target is always replaced. The animation restarts unless the menu is
    /// already active and `reanimate` is `false`.
    pub fn activate(&mut self, target: Target, now: u64, reanimate: bool) {
        if !self.active || reanimate {
            self.active_time = Some(now);
        }
        tracing::debug!(shape = %target.shape, vertex = ?target.vertex, now, "radial menu activated");
        self.active = true;
        self.target = Some(target);
    }

    /// Start closing at frame `now`. No effect if already closed.
    pub fn deactivate(&mut self, now: u64) {
        if self.active {
            self.active = false;
            self.active_time = Some(now);
            self.hovered = None;
            tracing::debug!(now, "radial menu deactivated");
        }
    }

    /// Rebind an active menu to a new target. Returns `false` if inactive.
    pub fn retarget(&mut self, target: Target) -> bool {
        if self.active {
            self.target = Some(target);
            true
        } else {
            false
        }
    }

    /// Drop the target if `keep` rejects it, closing the menu at `now`.
    pub fn retain_target(&mut self, now: u64, keep: impl FnOnce(&Target) -> bool) {
        if self.target.as_ref().is_some_and(|t| !keep(t)) {
            self.deactivate(now);
            self.target = None;
        }
    }

    /// `true` between activation and deactivation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The bound target.
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Mutable access to the bound target, for renames.
    pub fn target_mut(&mut self) -> Option<&mut Target> {
        self.target.as_mut()
    }

    /// The option hovered at the last [`RadialMenu::offer`].
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Frame of the last activation or deactivation.
    pub fn active_time(&self) -> Option<u64> {
        self.active_time
    }

    /// Lifecycle phase at frame `now`.
    pub fn phase(&self, now: u64) -> Phase {
        match (self.active, self.active_time) {
            (true, _) => Phase::Active,
            (false, Some(t)) if now.saturating_sub(t) < self.config.fade_frames => {
                Phase::FadingOut
            }
            _ => Phase::Inactive,
        }
    }

    /// `true` while the menu paints and hit-tests.
    pub fn is_visible(&self, now: u64) -> bool {
        self.phase(now) != Phase::Inactive && self.target.is_some()
    }

    /// Ease ratio at frame `now`: grows toward 1 while active, `1 - ease`
    /// while fading, 0 when inactive.
    pub fn ratio(&self, now: u64) -> f64 {
        let Some(t) = self.active_time else {
            return 0.0;
        };
        let eased = self.config.ease(now.saturating_sub(t));
        match self.phase(now) {
            Phase::Active => eased,
            Phase::FadingOut => 1.0 - eased,
            Phase::Inactive => 0.0,
        }
    }

    /// Angular width of one sector.
    pub fn sweep(&self) -> f64 {
        if self.options.is_empty() {
            TAU
        } else {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Menus have a handful of options."
            )]
            let n = self.options.len() as f64;
            TAU / n
        }
    }

    /// The option under `pointer` at frame `now`, with the menu centered on
    /// `center` (both in screen space).
    pub fn hit_test(&self, center: Point, pointer: Point, now: u64) -> Option<usize> {
        if !self.is_visible(now) || self.options.is_empty() {
            return None;
        }
        let ratio = self.ratio(now);
        let d = pointer - center;
        let r = d.hypot();
        if r < self.config.inner_radius * ratio || r > self.config.outer_radius * ratio {
            return None;
        }
        let sweep = self.sweep();
        // Clockwise from the top, shifted so sector 0 is centered on the top.
        let angle = d.x.atan2(-d.y).rem_euclid(TAU);
        let shifted = (angle + 0.5 * sweep).rem_euclid(TAU);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "`shifted / sweep` lies in [0, option count)."
        )]
        let index = (shifted / sweep) as usize;
        Some(index.min(self.options.len() - 1))
    }

    /// Sector geometry at frame `now` for painting. Empty when invisible.
    pub fn layout(&self, now: u64, context: &C) -> Vec<SectorLayout> {
        let Some(target) = self.target.as_ref().filter(|_| self.is_visible(now)) else {
            return Vec::new();
        };
        let ratio = self.ratio(now);
        let sweep = self.sweep();
        self.options
            .iter()
            .map(|option| {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Menus have a handful of options."
                )]
                let start = (option.index as f64 * sweep - 0.5 * sweep).rem_euclid(TAU);
                SectorLayout {
                    index: option.index,
                    start_angle: start,
                    end_angle: start + sweep,
                    inner_radius: self.config.inner_radius * ratio,
                    outer_radius: self.config.outer_radius * ratio,
                    enabled: (option.enabled)(target, context),
                    hovered: self.hovered == Some(option.index),
                }
            })
            .collect()
    }
}

impl<A: MenuIntent, C> RadialMenu<A, C> {
    /// Hit-test and offer this frame's click to `actions`.
    ///
    /// - Over an option: its action, or [`MenuIntent::noop`] when disabled, is
    ///   offered to the primary button, overwriting lower layers.
    /// - While active and farther than the close radius:
    ///   [`MenuIntent::close`] is offered to the primary button (overwriting)
    ///   and the secondary button (keeping any existing offer).
    ///
    /// Returns the hovered option. Call after every layer below the menu has
    /// offered, so the menu wins the primary click.
    pub fn offer(
        &mut self,
        center: Point,
        pointer: Point,
        now: u64,
        context: &C,
        actions: &mut DeferredActions<A>,
    ) -> Option<usize> {
        self.hovered = self.hit_test(center, pointer, now);
        let target = self.target.as_ref()?;
        if !self.is_visible(now) {
            return None;
        }
        if let Some(index) = self.hovered {
            if actions.is_armed(Button::Primary) {
                let option = &self.options[index];
                let action = if (option.enabled)(target, context) {
                    (option.effect)(target)
                } else {
                    tracing::trace!(option = %option.name, "disabled option clicked");
                    A::noop()
                };
                actions.offer(Button::Primary, action, OfferMode::Overwrite);
            }
        } else if self.active && (pointer - center).hypot() > self.config.close_radius {
            if actions.is_armed(Button::Primary) {
                actions.offer(Button::Primary, A::close(), OfferMode::Overwrite);
            }
            if actions.is_armed(Button::Secondary) {
                actions.offer(Button::Secondary, A::close(), OfferMode::KeepExisting);
            }
        }
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Act {
        Noop,
        Close,
        Pick(usize),
    }

    impl MenuIntent for Act {
        fn noop() -> Self {
            Self::Noop
        }
        fn close() -> Self {
            Self::Close
        }
    }

    fn four() -> RadialMenu<Act, ()> {
        RadialMenu::new([
            MenuOption::new("up", "arrow-up", 0xff0000, |_| Act::Pick(0)),
            MenuOption::new("right", "arrow-right", 0x00ff00, |_| Act::Pick(1)),
            MenuOption::new("down", "arrow-down", 0x0000ff, |_| Act::Pick(2)),
            MenuOption::new("left", "arrow-left", 0xffffff, |_| Act::Pick(3)),
        ])
    }

    fn target() -> Target {
        Target::vertex("wall", 0, Point::ZERO)
    }

    #[test]
    fn state_machine_and_fade() {
        let mut menu = four();
        assert_eq!(menu.phase(0), Phase::Inactive);
        menu.activate(target(), 10, false);
        assert_eq!(menu.phase(11), Phase::Active);
        menu.deactivate(40);
        assert_eq!(menu.phase(40), Phase::FadingOut);
        assert_eq!(menu.phase(54), Phase::FadingOut);
        assert_eq!(menu.phase(55), Phase::Inactive);
        assert_eq!(menu.ratio(55), 0.0);
    }

    #[test]
    fn reactivation_keeps_timestamp_unless_forced() {
        let mut menu = four();
        menu.activate(target(), 5, false);
        menu.activate(Target::shape("gate", Point::ZERO), 9, false);
        assert_eq!(menu.active_time(), Some(5));
        assert_eq!(menu.target().unwrap().shape.as_str(), "gate");
        menu.activate(target(), 12, true);
        assert_eq!(menu.active_time(), Some(12));
    }

    #[test]
    fn ratio_eases_in_and_inverts_on_close() {
        let mut menu = four();
        menu.activate(target(), 0, false);
        assert_eq!(menu.ratio(0), 0.0);
        let early = menu.ratio(3);
        assert!(early > 0.0 && early < 1.0, "ratio {early} not easing");
        assert_eq!(menu.ratio(100), 1.0);
        menu.deactivate(100);
        assert_eq!(menu.ratio(100), 1.0);
        assert!(menu.ratio(103) < 1.0);
    }

    #[test]
    fn sectors_start_at_top_and_run_clockwise() {
        let mut menu = four();
        menu.activate(target(), 0, false);
        let c = Point::new(100.0, 100.0);
        let now = 1000;
        assert_eq!(menu.hit_test(c, c + Vec2::new(0.0, -50.0), now), Some(0));
        assert_eq!(menu.hit_test(c, c + Vec2::new(50.0, 0.0), now), Some(1));
        assert_eq!(menu.hit_test(c, c + Vec2::new(0.0, 50.0), now), Some(2));
        assert_eq!(menu.hit_test(c, c + Vec2::new(-50.0, 0.0), now), Some(3));
        // Slightly left of top is still sector 0.
        assert_eq!(menu.hit_test(c, c + Vec2::new(-5.0, -50.0), now), Some(0));
        // Inside the hole and outside the ring.
        assert_eq!(menu.hit_test(c, c + Vec2::new(0.0, -10.0), now), None);
        assert_eq!(menu.hit_test(c, c + Vec2::new(0.0, -80.0), now), None);
    }

    #[test]
    fn radii_scale_with_ratio() {
        let mut menu = four();
        menu.activate(target(), 0, false);
        let c = Point::ZERO;
        let p = Point::new(0.0, -70.0);
        // Not yet grown to 70 px.
        assert_eq!(menu.hit_test(c, p, 2), None);
        assert_eq!(menu.hit_test(c, p, 1000), Some(0));
    }

    #[test]
    fn layout_is_empty_when_hidden() {
        let menu = four();
        assert!(menu.layout(0, &()).is_empty());
    }

    #[test]
    fn layout_anchors_follow_sectors() {
        let mut menu = four();
        menu.activate(target(), 0, false);
        let sectors = menu.layout(1000, &());
        assert_eq!(sectors.len(), 4);
        let top = sectors[0].anchor(Point::ZERO);
        assert!(top.x.abs() < 1e-9 && (top.y + 48.0).abs() < 1e-9, "{top:?}");
        let right = sectors[1].anchor(Point::ZERO);
        assert!((right.x - 48.0).abs() < 1e-9 && right.y.abs() < 1e-9, "{right:?}");
    }
}
