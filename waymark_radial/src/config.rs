// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial menu timing and geometry.

/// Timing and geometry of the radial menu.
///
/// Radii are in screen pixels at full ease; times are in frames.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialConfig {
    /// Divisor `k` in `min(1, elapsed^exponent / k)`.
    pub ease_k: f64,
    /// Exponent applied to the elapsed frame count.
    pub ease_exponent: f64,
    /// Frames the menu stays visible and hit-testable after deactivation.
    pub fade_frames: u64,
    /// Inner radius of every sector annulus.
    pub inner_radius: f64,
    /// Outer radius of every sector annulus.
    pub outer_radius: f64,
    /// Clicks farther than this from the center close the menu. Not eased.
    pub close_radius: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            ease_k: 6.0,
            ease_exponent: 0.7,
            fade_frames: 15,
            inner_radius: 24.0,
            outer_radius: 72.0,
            close_radius: 96.0,
        }
    }
}

impl RadialConfig {
    /// Builder: set the annulus radii.
    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    /// Builder: set the close radius.
    pub fn with_close_radius(mut self, radius: f64) -> Self {
        self.close_radius = radius;
        self
    }

    /// Builder: set the fade-out length in frames.
    pub fn with_fade_frames(mut self, frames: u64) -> Self {
        self.fade_frames = frames;
        self
    }

    /// Ease-in progress after `elapsed` frames, in `[0, 1]`.
    pub fn ease(&self, elapsed: u64) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Frame counts stay far below 2^52."
        )]
        let e = elapsed as f64;
        (e.powf(self.ease_exponent) / self.ease_k).clamp(0.0, 1.0)
    }
}
