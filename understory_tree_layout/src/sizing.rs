// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level spacing and canvas sizing.

use kurbo::{Insets, Size};

/// Shortest responsive link length; anything shorter crowds labels or pushes nodes off screen.
pub const MIN_LINK_LENGTH: f64 = 175.0;

/// Link length derived from the available width and the number of hierarchy levels:
/// `max(MIN_LINK_LENGTH, 2 * available_width / depth_count)`.
///
/// A `depth_count` of zero is treated as one.
pub fn responsive_link_length(available_width: f64, depth_count: usize) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "Level counts are tiny compared to f64 precision."
    )]
    let levels = depth_count.max(1) as f64;
    (2.0 * (available_width / levels)).max(MIN_LINK_LENGTH)
}

/// Spacing between consecutive depths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkLength {
    /// Host-supplied spacing. Never changed by a resize.
    Fixed(f64),
    /// Recomputed from the viewport with [`responsive_link_length`] whenever it changes.
    Responsive,
}

impl LinkLength {
    /// Choose the policy from an optional host value.
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::Responsive, Self::Fixed)
    }

    /// Returns true if the spacing follows the viewport.
    pub fn is_responsive(self) -> bool {
        matches!(self, Self::Responsive)
    }

    /// Spacing to use for the given available width and level count.
    pub fn resolve(self, available_width: f64, depth_count: usize) -> f64 {
        match self {
            Self::Fixed(length) => length,
            Self::Responsive => responsive_link_length(available_width, depth_count),
        }
    }
}

/// Size left for drawing once `margin` is taken off `viewport`, clamped at zero.
pub fn inner_size(viewport: Size, margin: Insets) -> Size {
    Size::new(
        (viewport.width - margin.x0 - margin.x1).max(0.0),
        (viewport.height - margin.y0 - margin.y1).max(0.0),
    )
}
