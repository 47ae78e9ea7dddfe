// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation for momentum scrolling.
//!
//! Raw per-event velocities are noisy: touch digitizers report at uneven
//! intervals and the final few samples before a release are often tiny. The
//! [`VelocityEstimator`] keeps an exponentially smoothed estimate,
//!
//! ```text
//! smoothed = alpha * instant + (1 - alpha) * smoothed
//! ```
//!
//! so that a release after a quick flick carries the flick's speed into
//! inertia instead of the last jitter.

use kurbo::Vec2;

/// Exponentially smoothed velocity, in view units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityEstimator {
    velocity: Vec2,
    smoothing: f64,
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SMOOTHING)
    }
}

impl VelocityEstimator {
    /// Weight given to each new sample.
    pub const DEFAULT_SMOOTHING: f64 = 0.2;

    /// Samples closer together than this are treated as this far apart.
    pub const MIN_SAMPLE_INTERVAL: f64 = 0.001;

    /// Creates an estimator at rest.
    ///
    /// `smoothing` is clamped to `[0, 1]`; a non-finite value falls back to
    /// [`Self::DEFAULT_SMOOTHING`].
    #[must_use]
    pub fn new(smoothing: f64) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_SMOOTHING
        };
        Self {
            velocity: Vec2::ZERO,
            smoothing,
        }
    }

    /// Returns the smoothing factor.
    #[must_use]
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Forgets all history; the estimate returns to zero.
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Folds in a movement of `delta` over `dt` seconds and returns the new estimate.
    ///
    /// `dt` is floored at [`Self::MIN_SAMPLE_INTERVAL`]. Non-finite samples are
    /// ignored.
    pub fn add_sample(&mut self, delta: Vec2, dt: f64) -> Vec2 {
        if !delta.is_finite() || dt.is_nan() {
            return self.velocity;
        }
        let instant = delta / dt.max(Self::MIN_SAMPLE_INTERVAL);
        self.velocity = instant * self.smoothing + self.velocity * (1.0 - self.smoothing);
        self.velocity
    }

    /// Current estimate.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Magnitude of the current estimate.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Returns `true` if the estimate is exactly at rest.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.velocity == Vec2::ZERO
    }
}
