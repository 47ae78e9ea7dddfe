// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: small state holders for multi-pointer gestures.
//!
//! This crate provides the bookkeeping that touch and mouse gesture
//! recognizers need across many input events, without interpreting what the
//! gesture means:
//!
//! - [`pointers`]: Track the set of currently pressed pointers and their last
//!   known positions, capped at two simultaneous contacts.
//! - [`velocity`]: Smooth per-move pointer deltas into a velocity vector that
//!   can seed momentum scrolling.
//! - [`tap`]: Recognize double taps from pointer-down timestamps.
//!
//! Pointer identifiers are generic. Hosts can use raw integers, platform
//! touch identifiers, or the pointer ids of an event crate such as
//! `ui-events`, as long as they are `Copy + PartialEq`.
//!
//! ## Pinch distance
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::pointers::PointerTracker;
//!
//! let mut pointers = PointerTracker::new();
//! assert!(pointers.register(1_u32, Point::new(100.0, 100.0)));
//! assert!(pointers.register(2, Point::new(160.0, 180.0)));
//!
//! // Two contacts 100px apart.
//! let distance = pointers.distance().unwrap();
//! assert!((distance - 100.0).abs() < 1e-9);
//!
//! // A third contact is refused.
//! assert!(!pointers.register(3, Point::new(0.0, 0.0)));
//! assert_eq!(pointers.count(), 2);
//! ```
//!
//! ## Fling velocity
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_gesture::velocity::VelocityEstimator;
//!
//! let mut velocity = VelocityEstimator::default();
//!
//! // 10px in 10ms is 1000px/s; with the default smoothing factor of 0.2
//! // the estimate moves a fifth of the way there.
//! let estimate = velocity.add_sample(Vec2::new(10.0, 0.0), 0.010);
//! assert!((estimate.x - 200.0).abs() < 1e-9);
//! ```
//!
//! ## Double taps
//!
//! ```rust
//! use understory_gesture::tap::{DoubleTapState, TapKind};
//!
//! let mut taps = DoubleTapState::new(300);
//! assert_eq!(taps.on_down(1_000), TapKind::Single);
//! assert_eq!(taps.on_down(1_200), TapKind::Double);
//! // The pair is consumed, so a third quick tap starts over.
//! assert_eq!(taps.on_down(1_250), TapKind::Single);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod pointers;
pub mod tap;
pub mod velocity;
