// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum after a pan is released.
//!
//! Each step decays the velocity exponentially, moves the offset by
//! `velocity * dt`, and commits through [`ViewportState::commit`]. An axis
//! whose proposed offset was clamped loses its velocity, so the image stops
//! dead at the edge without bouncing. The simulation ends once the speed
//! drops below the configured threshold.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

use crate::config::ViewportConfig;
use crate::gesture::millis_to_seconds;
use crate::viewport::ViewportState;

const FALLBACK_DECAY: f64 = 4.0;

/// Outcome of one [`InertiaSimulator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InertiaStep {
    /// The simulator wants another frame.
    Running,
    /// The simulator has come to rest.
    Stopped,
}

/// Frame-by-frame momentum decay for a released pan.
#[derive(Clone, Debug, PartialEq)]
pub struct InertiaSimulator {
    velocity: Vec2,
    last_time_ms: u64,
    decay: f64,
    stop_speed: f64,
    max_dt_ms: u64,
}

impl InertiaSimulator {
    /// Starts coasting at `velocity` (pixels per second) from `start_ms`.
    ///
    /// A non-finite velocity starts a simulator that is already stopped.
    /// A decay rate that is not finite and positive falls back to `4.0` so
    /// the simulation always terminates.
    #[must_use]
    pub fn new(velocity: Vec2, start_ms: u64, config: &ViewportConfig) -> Self {
        let velocity = if velocity.x.is_finite() && velocity.y.is_finite() {
            velocity
        } else {
            Vec2::ZERO
        };
        let decay = if config.inertia_decay.is_finite() && config.inertia_decay > 0.0 {
            config.inertia_decay
        } else {
            FALLBACK_DECAY
        };
        let stop_speed = if config.inertia_stop_speed.is_finite() {
            config.inertia_stop_speed.max(0.0)
        } else {
            0.0
        };
        Self {
            velocity,
            last_time_ms: start_ms,
            decay,
            stop_speed,
            max_dt_ms: config.max_frame_dt_ms.max(1),
        }
    }

    /// Current velocity in pixels per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` until the simulator stops or is cancelled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Stops immediately. Stopping a stopped simulator does nothing.
    pub fn cancel(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Advances the simulation to `now_ms` and applies it to `viewport`.
    ///
    /// The frame interval is clamped to `[1 ms, max_frame_dt_ms]`, so a
    /// stalled frame loop cannot throw the image across the container.
    pub fn step(&mut self, viewport: &mut ViewportState, now_ms: u64) -> InertiaStep {
        if !self.is_running() {
            return InertiaStep::Stopped;
        }

        let elapsed = now_ms
            .saturating_sub(self.last_time_ms)
            .clamp(1, self.max_dt_ms);
        self.last_time_ms = self.last_time_ms.max(now_ms);
        let dt = millis_to_seconds(elapsed);

        self.velocity *= (-self.decay * dt).exp();

        let proposed = viewport.offset() + self.velocity * dt;
        viewport.commit(viewport.scale(), proposed);
        let committed = viewport.offset();
        if committed.x != proposed.x {
            self.velocity.x = 0.0;
        }
        if committed.y != proposed.y {
            self.velocity.y = 0.0;
        }

        log::trace!(
            "inertia: offset ({:.1}, {:.1}) velocity ({:.1}, {:.1})",
            committed.x,
            committed.y,
            self.velocity.x,
            self.velocity.y
        );

        if self.velocity.length() < self.stop_speed {
            self.velocity = Vec2::ZERO;
        }
        if self.is_running() {
            InertiaStep::Running
        } else {
            InertiaStep::Stopped
        }
    }
}
