// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active pointer tracking: which contacts are down and where they were last seen.
//!
//! ## Usage
//!
//! 1) Call [`PointerTracker::register`] on pointer-down.
//! 2) Call [`PointerTracker::update`] on pointer-move; unknown ids are ignored.
//! 3) Call [`PointerTracker::remove`] on pointer-up or cancel.
//! 4) Query [`PointerTracker::count`] to decide between pan and pinch, and
//!    [`PointerTracker::distance`] to measure a pinch.
//!
//! The tracker holds at most [`MAX_POINTERS`] contacts. Further presses are
//! refused rather than evicting an existing contact, so a stray third finger
//! cannot disturb a pinch in progress.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::pointers::PointerTracker;
//!
//! let mut pointers = PointerTracker::new();
//! pointers.register(7_u64, Point::new(10.0, 20.0));
//!
//! // Moves of unknown pointers are no-ops.
//! assert!(!pointers.update(9, Point::new(0.0, 0.0)));
//! assert!(pointers.update(7, Point::new(15.0, 25.0)));
//! assert_eq!(pointers.position(7), Some(Point::new(15.0, 25.0)));
//!
//! assert_eq!(pointers.remove(7), Some(Point::new(15.0, 25.0)));
//! assert!(pointers.is_empty());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Maximum number of simultaneous pointers tracked.
pub const MAX_POINTERS: usize = 2;

/// Last known position of one pressed pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPosition<K> {
    /// Host-supplied pointer identifier.
    pub id: K,
    /// Last reported position, in view coordinates.
    pub position: Point,
}

/// The set of currently pressed pointers, in press order.
#[derive(Clone, Debug)]
pub struct PointerTracker<K> {
    pointers: SmallVec<[PointerPosition<K>; MAX_POINTERS]>,
}

impl<K> Default for PointerTracker<K> {
    fn default() -> Self {
        Self {
            pointers: SmallVec::new(),
        }
    }
}

impl<K: Copy + PartialEq> PointerTracker<K> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pressed pointer at `position`.
    ///
    /// Pressing an id that is already tracked just moves it. Returns `false`
    /// if the pointer was refused because [`MAX_POINTERS`] are already down.
    pub fn register(&mut self, id: K, position: Point) -> bool {
        if self.update(id, position) {
            return true;
        }
        if self.pointers.len() >= MAX_POINTERS {
            return false;
        }
        self.pointers.push(PointerPosition { id, position });
        true
    }

    /// Moves a tracked pointer. Returns `false` (and does nothing) if `id` is unknown.
    pub fn update(&mut self, id: K, position: Point) -> bool {
        match self.pointers.iter_mut().find(|p| p.id == id) {
            Some(pointer) => {
                pointer.position = position;
                true
            }
            None => false,
        }
    }

    /// Forgets a pointer, returning its last known position.
    pub fn remove(&mut self, id: K) -> Option<Point> {
        let index = self.pointers.iter().position(|p| p.id == id)?;
        Some(self.pointers.remove(index).position)
    }

    /// Forgets every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// Number of pressed pointers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` when no pointer is pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Returns `true` if `id` is currently pressed.
    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.pointers.iter().any(|p| p.id == id)
    }

    /// Last known position of `id`.
    #[must_use]
    pub fn position(&self, id: K) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }

    /// All pressed pointers, oldest press first.
    #[must_use]
    pub fn positions(&self) -> &[PointerPosition<K>] {
        &self.pointers
    }

    /// Positions of the two pressed pointers, if exactly two are down.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.pointers.as_slice() {
            [a, b] => Some((a.position, b.position)),
            _ => None,
        }
    }

    /// Distance between the two pressed pointers, if exactly two are down.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        self.pair().map(|(a, b)| a.distance(b))
    }
}
