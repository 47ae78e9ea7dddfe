// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-tap recognition from pointer-down timestamps.
//!
//! Timestamps are plain `u64` milliseconds from any monotonic host clock.
//! Two downs closer together than the window form a double tap; the pair is
//! then consumed so that a third quick down starts a new sequence instead of
//! toggling a second time.
//!
//! Callers decide which downs count as taps. A gesture recognizer will
//! usually feed only downs that start a fresh gesture (no other pointer
//! pressed) and call [`DoubleTapState::reset`] when a second finger lands.

/// Classification of a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    /// First down of a potential sequence.
    Single,
    /// Second down within the window of the previous one.
    Double,
}

/// Remembers the last tap so the next one can be classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoubleTapState {
    window_ms: u64,
    last_down_ms: Option<u64>,
}

impl Default for DoubleTapState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW_MS)
    }
}

impl DoubleTapState {
    /// Default window between the two downs of a double tap.
    pub const DEFAULT_WINDOW_MS: u64 = 300;

    /// Creates a recognizer with the given window.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_down_ms: None,
        }
    }

    /// Classifies a pointer-down at `time_ms`.
    ///
    /// A timestamp earlier than the previous down (a clock going backwards)
    /// is never paired.
    pub fn on_down(&mut self, time_ms: u64) -> TapKind {
        match self.last_down_ms {
            Some(last) if time_ms >= last && time_ms - last < self.window_ms => {
                self.last_down_ms = None;
                TapKind::Double
            }
            _ => {
                self.last_down_ms = Some(time_ms);
                TapKind::Single
            }
        }
    }

    /// Forgets the pending tap.
    pub fn reset(&mut self) {
        self.last_down_ms = None;
    }

    /// Returns `true` if a single tap is waiting for its partner.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_down_ms.is_some()
    }
}
