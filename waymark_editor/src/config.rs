// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor settings and the default style template.

use waymark_hierarchy::Template;
use waymark_input::InputConfig;
use waymark_radial::RadialConfig;

/// Settings for an [`EditorContext`](crate::EditorContext).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Double-click tuning.
    pub input: InputConfig,
    /// Radial menu timing and geometry.
    pub radial: RadialConfig,
    /// Screen-space radius of vertex handles, for painting and hit testing.
    pub vertex_radius: f64,
    /// Zoom factor per unit of scroll.
    pub zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            radial: RadialConfig::default(),
            vertex_radius: 6.0,
            zoom_step: 1.1,
        }
    }
}

impl EditorConfig {
    /// Builder: set the input configuration.
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Builder: set the radial menu configuration.
    pub fn with_radial(mut self, radial: RadialConfig) -> Self {
        self.radial = radial;
        self
    }

    /// Builder: set the vertex handle radius.
    pub fn with_vertex_radius(mut self, radius: f64) -> Self {
        self.vertex_radius = radius;
        self
    }

    /// Builder: set the zoom step.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom_step = step;
        self
    }
}

/// Style defaults every shape starts from.
pub fn default_template() -> Template {
    Template::new()
        .with("closed", true)
        .with("fill", "#5b7fa6")
        .with("stroke", "#1d2b3a")
        .with("width", 2.0)
}

/// Parse a `#rrggbb` color.
pub(crate) fn parse_color(text: &str) -> Option<u32> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(parse_color("#5b7fa6"), Some(0x5b7fa6));
        assert_eq!(parse_color("5b7fa6"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }
}
