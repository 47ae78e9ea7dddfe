// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Image Viewport: pan and zoom for a single fitted image.
//!
//! This crate is a headless controller for a full-screen image viewer. The
//! image is fitted and centered in its container at scale `1.0`; the user
//! can then zoom with a pinch, a double tap, a double click, or the mouse
//! wheel, and drag the zoomed image around. A pan that is released while
//! moving keeps coasting and decelerates to a stop.
//!
//! - [`ImageViewport`]: The controller. Feed it pointer, wheel, and frame
//!   events; read back a [`ViewTransform`].
//! - [`ViewportState`]: The authoritative scale and offset. All changes go
//!   through [`ViewportState::commit`], which keeps the offset inside the
//!   [`Bounds`] for the current scale.
//! - [`Gesture`]: The gesture state machine. Session data lives inside the
//!   variant that needs it.
//! - [`InertiaSimulator`]: Exponentially decaying momentum with a hard stop at
//!   the image edges.
//! - [`ViewportConfig`]: Scale limits, sensitivities, and timing constants.
//!
//! With the `ui_events_adapter` feature, `ImageViewport<Option<PointerId>>`
//! can consume `ui_events::pointer::PointerEvent` directly.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_image_viewport::{GestureKind, ImageViewport};
//!
//! let mut viewer = ImageViewport::<u32>::new(Size::new(800.0, 600.0));
//! viewer.set_natural_size(Some(Size::new(1600.0, 1200.0)));
//!
//! // Scrolling up zooms in.
//! viewer.wheel(-1000.0);
//! assert_eq!(viewer.zoom_percent(), 250);
//!
//! // Drag the zoomed image; the offset stops at the image edge.
//! viewer.pointer_down(1, Point::new(100.0, 100.0), 0);
//! viewer.pointer_move(1, Point::new(900.0, 900.0), 16);
//! assert_eq!(viewer.gesture_kind(), GestureKind::Panning);
//! assert_eq!(viewer.offset(), Vec2::new(600.0, 450.0));
//!
//! // Releasing mid-drag starts inertia, which the host drives frame by frame.
//! viewer.pointer_up(1, 20);
//! assert_eq!(viewer.gesture_kind(), GestureKind::Inertia);
//! let mut now = 20;
//! while viewer.take_frame_request() {
//!     now += 16;
//!     viewer.frame(now);
//! }
//! assert_eq!(viewer.gesture_kind(), GestureKind::Idle);
//!
//! // The transform is ready for a renderer or a CSS `transform` property.
//! assert_eq!(
//!     viewer.transform().to_string(),
//!     "translate(600px, 450px) scale(2.5)",
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod bounds;
mod config;
mod controller;
mod gesture;
mod inertia;
#[cfg(feature = "ui_events_adapter")]
mod ui_events_adapter;
mod viewport;

pub use bounds::{Bounds, fit_size};
pub use config::ViewportConfig;
pub use controller::{ImageViewport, ImageViewportDebugInfo};
pub use gesture::{Gesture, GestureKind, PanSession, PinchSession};
pub use inertia::{InertiaSimulator, InertiaStep};
pub use viewport::{ViewTransform, ViewportState};
