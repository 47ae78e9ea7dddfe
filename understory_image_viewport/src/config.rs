// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tunables for an [`ImageViewport`](crate::ImageViewport).
///
/// The defaults describe a lightbox: the fitted image can be zoomed up to
/// five times, a double tap jumps to 2x, and a fling coasts for well under a
/// second.
///
/// ```rust
/// use understory_image_viewport::ViewportConfig;
///
/// let config = ViewportConfig::default()
///     .with_scale_limits(1.0, 8.0)
///     .with_double_tap_scale(3.0);
/// assert_eq!(config.max_scale, 8.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Smallest scale; the image exactly fits the container here.
    pub min_scale: f64,
    /// Largest scale.
    pub max_scale: f64,
    /// Scale change per unit of wheel `delta_y` (negated, so scrolling up zooms in).
    pub wheel_sensitivity: f64,
    /// Two pointer-downs closer than this form a double tap.
    pub double_tap_window_ms: u64,
    /// Scale a double tap zooms in to.
    pub double_tap_scale: f64,
    /// Weight of each new sample in the velocity estimate.
    pub velocity_smoothing: f64,
    /// Exponential decay rate of inertia, per second.
    pub inertia_decay: f64,
    /// Inertia stops once the speed falls below this, in pixels per second.
    pub inertia_stop_speed: f64,
    /// Floor for the pinch baseline distance, in pixels.
    pub min_pinch_distance: f64,
    /// Longest frame interval fed into one inertia step.
    pub max_frame_dt_ms: u64,
    /// A release this long after the last pan movement does not fling.
    pub fling_window_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 5.0,
            wheel_sensitivity: 0.0015,
            double_tap_window_ms: 300,
            double_tap_scale: 2.0,
            velocity_smoothing: 0.2,
            inertia_decay: 4.0,
            inertia_stop_speed: 20.0,
            min_pinch_distance: 1.0,
            max_frame_dt_ms: 100,
            fling_window_ms: 100,
        }
    }
}

impl ViewportConfig {
    /// Sets the scale range.
    ///
    /// The range is normalized so that `min_scale <= max_scale`, and the
    /// minimum is floored at a small positive value so extents stay defined.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale.max(f64::EPSILON);
        self.max_scale = max_scale.max(self.min_scale);
        self
    }

    /// Sets the wheel sensitivity.
    #[must_use]
    pub fn with_wheel_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_sensitivity = sensitivity;
        self
    }

    /// Sets the double-tap window.
    #[must_use]
    pub fn with_double_tap_window_ms(mut self, window_ms: u64) -> Self {
        self.double_tap_window_ms = window_ms;
        self
    }

    /// Sets the scale a double tap zooms in to.
    #[must_use]
    pub fn with_double_tap_scale(mut self, scale: f64) -> Self {
        self.double_tap_scale = scale;
        self
    }

    /// Sets the velocity smoothing factor (clamped to `[0, 1]` when used).
    #[must_use]
    pub fn with_velocity_smoothing(mut self, smoothing: f64) -> Self {
        self.velocity_smoothing = smoothing;
        self
    }

    /// Sets the inertia decay rate and stop speed.
    #[must_use]
    pub fn with_inertia(mut self, decay: f64, stop_speed: f64) -> Self {
        self.inertia_decay = decay.max(0.0);
        self.inertia_stop_speed = stop_speed.max(0.0);
        self
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    ///
    /// Never panics, even if the public fields were set to an inverted range;
    /// the maximum wins in that case.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}
