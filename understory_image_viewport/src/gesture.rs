// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classification.
//!
//! The current gesture is a single sum type whose variants carry the data
//! that only makes sense in that state: a [`PinchSession`] exists only while
//! pinching, a [`PanSession`] only while panning, and an
//! [`InertiaSimulator`] only while coasting.
//!
//! Transitions are driven by the pointer count and the viewport scale:
//!
//! ```text
//! Idle        --down-->                 SingleDown
//! SingleDown  --move, zoomed-->         Panning
//! SingleDown  --second down-->          Pinching
//! Panning     --second down-->          Pinching
//! Pinching    --one pointer up-->       SingleDown
//! any         --last up, at rest-->     Idle
//! any         --last up, zoomed, moving--> Inertia
//! Inertia     --down-->                 SingleDown (inertia cancelled)
//! Inertia     --speed below threshold-> Idle
//! ```

use kurbo::{Point, Vec2};

use crate::inertia::InertiaSimulator;

/// Baseline captured when a second pointer lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    /// Distance between the two pointers at the start of the pinch.
    pub initial_distance: f64,
    /// Scale at the start of the pinch.
    pub initial_scale: f64,
    /// Pan offset at the start of the pinch.
    pub initial_offset: Vec2,
}

impl PinchSession {
    /// Captures a pinch baseline.
    #[must_use]
    pub fn new(initial_distance: f64, initial_scale: f64, initial_offset: Vec2) -> Self {
        Self {
            initial_distance,
            initial_scale,
            initial_offset,
        }
    }

    /// Ratio of `distance` to the baseline, with the baseline floored at `min_distance`.
    ///
    /// A non-finite `distance` yields `1.0`.
    #[must_use]
    pub fn ratio(&self, distance: f64, min_distance: f64) -> f64 {
        if !distance.is_finite() {
            return 1.0;
        }
        let baseline = if self.initial_distance.is_finite() {
            self.initial_distance.max(min_distance)
        } else {
            min_distance
        };
        distance / baseline.max(f64::MIN_POSITIVE)
    }

    /// Unclamped scale for the pointers being `distance` apart.
    #[must_use]
    pub fn scale_for(&self, distance: f64, min_distance: f64) -> f64 {
        self.initial_scale * self.ratio(distance, min_distance)
    }
}

/// Last sample of a single-pointer pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
    /// Last pointer position fed into the pan.
    pub last: Point,
    /// Timestamp of that position.
    pub last_time_ms: u64,
}

impl PanSession {
    /// Moves the session to `position` at `time_ms`.
    ///
    /// Returns the delta since the previous sample and the elapsed time in
    /// seconds. A clock going backwards yields zero elapsed time.
    pub fn advance(&mut self, position: Point, time_ms: u64) -> (Vec2, f64) {
        let delta = position - self.last;
        let dt = millis_to_seconds(time_ms.saturating_sub(self.last_time_ms));
        self.last = position;
        self.last_time_ms = self.last_time_ms.max(time_ms);
        (delta, dt)
    }
}

/// The active gesture and its session data.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No pointer is down and nothing is animating.
    #[default]
    Idle,
    /// One pointer is down but has not panned.
    ///
    /// This is also the state after a pinch loses one of its pointers, and
    /// while a pointer moves over an unzoomed image.
    SingleDown {
        /// Position and time the pan would start from.
        anchor: PanSession,
    },
    /// One pointer is panning a zoomed image.
    Panning(PanSession),
    /// Two pointers are pinching.
    Pinching(PinchSession),
    /// No pointer is down and the pan is coasting to a stop.
    Inertia(InertiaSimulator),
}

impl Gesture {
    /// The payload-free kind of this gesture.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::SingleDown { .. } => GestureKind::SingleDown,
            Self::Panning(_) => GestureKind::Panning,
            Self::Pinching(_) => GestureKind::Pinching,
            Self::Inertia(_) => GestureKind::Inertia,
        }
    }
}

/// Discriminant of [`Gesture`], for inspection and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// See [`Gesture::Idle`].
    Idle,
    /// See [`Gesture::SingleDown`].
    SingleDown,
    /// See [`Gesture::Panning`].
    Panning,
    /// See [`Gesture::Pinching`].
    Pinching,
    /// See [`Gesture::Inertia`].
    Inertia,
}

pub(crate) fn millis_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
