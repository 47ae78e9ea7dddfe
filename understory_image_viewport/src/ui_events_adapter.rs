// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feeding `ui-events` pointer events into an [`ImageViewport`].

use ui_events::ScrollDelta;
use ui_events::pointer::{PointerEvent, PointerGesture, PointerId, PointerScrollEvent};

use crate::controller::ImageViewport;

/// Pixels per scrolled line.
const LINE_HEIGHT: f64 = 20.0;

const NANOS_PER_MILLI: u64 = 1_000_000;

impl ImageViewport<Option<PointerId>> {
    /// Dispatches a `ui-events` pointer event to the matching handler.
    ///
    /// Event timestamps are converted from nanoseconds to milliseconds.
    /// Scroll deltas are converted to pixels: lines are
    /// 20px and pages are the container height. Trackpad pinch gestures
    /// become [`trackpad_pinch`](Self::trackpad_pinch) steps.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down(e) => self.pointer_down(
                e.pointer.pointer_id,
                e.state.logical_point(),
                e.state.time / NANOS_PER_MILLI,
            ),
            PointerEvent::Move(e) => self.pointer_move(
                e.pointer.pointer_id,
                e.current.logical_point(),
                e.current.time / NANOS_PER_MILLI,
            ),
            PointerEvent::Up(e) => {
                self.pointer_up(e.pointer.pointer_id, e.state.time / NANOS_PER_MILLI)
            }
            PointerEvent::Cancel(info) => self.pointer_cancel(info.pointer_id),
            PointerEvent::Scroll(e) => {
                let delta_y = self.scroll_pixels(e);
                self.wheel(delta_y)
            }
            PointerEvent::Gesture(e) => {
                let PointerGesture::Pinch(delta) = &e.gesture else {
                    return false;
                };
                self.trackpad_pinch(f64::from(*delta))
            }
            PointerEvent::Enter(_) | PointerEvent::Leave(_) => false,
        }
    }

    fn scroll_pixels(&self, event: &PointerScrollEvent) -> f64 {
        match &event.delta {
            ScrollDelta::PixelDelta(pos) => pos.to_logical(event.state.scale_factor).y,
            ScrollDelta::LineDelta(_, y) => f64::from(*y) * LINE_HEIGHT,
            ScrollDelta::PageDelta(_, y) => {
                f64::from(*y) * self.viewport().bounds().container().height
            }
        }
    }
}
