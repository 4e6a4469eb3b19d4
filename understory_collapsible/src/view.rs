// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View transform: zoom state and click recentering.

use kurbo::{Affine, Point, Size, Vec2};

/// Smallest accepted zoom factor.
pub const MIN_SCALE: f64 = 1.0 / 5.0;
/// Largest accepted zoom factor.
pub const MAX_SCALE: f64 = 5.0;

/// The pan/zoom transform currently applied to the canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomState {
    enabled: bool,
    transform: Affine,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ZoomState {
    /// Identity transform; `enabled` controls whether external zoom input is accepted.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            transform: Affine::IDENTITY,
        }
    }

    /// Whether external zoom input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current zoom factor `k`.
    pub fn scale(&self) -> f64 {
        self.transform.as_coeffs()[0]
    }

    /// Current translation.
    pub fn translation(&self) -> Vec2 {
        self.transform.translation()
    }

    /// Accept a `translate(t) * scale(k)` transform from the zoom handler.
    ///
    /// `k` is clamped to [`MIN_SCALE`]..=[`MAX_SCALE`]. Returns false, leaving the state alone,
    /// when zooming is disabled or the input is not finite.
    pub fn set(&mut self, translation: Vec2, scale: f64) -> bool {
        if !self.enabled || !scale.is_finite() || !translation.is_finite() {
            return false;
        }
        let k = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.transform = Affine::translate(translation) * Affine::scale(k);
        true
    }

    /// Replace the transform without checks, for recentering driven by the widget itself.
    pub(crate) fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }
}

/// Transform that puts `focus` at `(width / 6, height / 2)` of `viewport` while keeping zoom `k`.
pub fn recenter(focus: Point, viewport: Size, k: f64) -> Affine {
    let anchor = Vec2::new(viewport.width / 6.0, viewport.height / 2.0);
    Affine::translate(anchor - focus.to_vec2() * k) * Affine::scale(k)
}
