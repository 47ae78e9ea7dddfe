// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event-driven controller that ties the pieces together.

use kurbo::{Affine, Point, Size, Vec2};
use understory_gesture::pointers::PointerTracker;
use understory_gesture::tap::{DoubleTapState, TapKind};
use understory_gesture::velocity::VelocityEstimator;

use crate::bounds::Bounds;
use crate::config::ViewportConfig;
use crate::gesture::{Gesture, GestureKind, PanSession, PinchSession};
use crate::inertia::{InertiaSimulator, InertiaStep};
use crate::viewport::{ViewTransform, ViewportState};

/// Pan/zoom controller for one image viewer.
///
/// `K` is the pointer identifier type used by the host.
///
/// Input handlers return `true` when the event was consumed. Events are
/// ignored while the viewer is closed, for unknown pointer ids, for a third
/// simultaneous pointer, and when they carry non-finite coordinates.
///
/// After dispatching input the host calls
/// [`take_frame_request`](Self::take_frame_request); when it returns `true`
/// the host schedules one animation frame and calls [`frame`](Self::frame)
/// from it.
#[derive(Clone, Debug)]
pub struct ImageViewport<K> {
    config: ViewportConfig,
    viewport: ViewportState,
    pointers: PointerTracker<K>,
    gesture: Gesture,
    velocity: VelocityEstimator,
    taps: DoubleTapState,
    image: Option<usize>,
    last_event_ms: u64,
}

impl<K: Copy + PartialEq> ImageViewport<K> {
    /// Creates a viewer, open on image `0`, with the default configuration.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self::with_config(container, ViewportConfig::default())
    }

    /// Creates a viewer, open on image `0`, with `config`.
    #[must_use]
    pub fn with_config(container: Size, config: ViewportConfig) -> Self {
        let config = config.with_scale_limits(config.min_scale, config.max_scale);
        Self {
            viewport: ViewportState::new(&config, Bounds::new(container, None)),
            pointers: PointerTracker::new(),
            gesture: Gesture::Idle,
            velocity: VelocityEstimator::new(config.velocity_smoothing),
            taps: DoubleTapState::new(config.double_tap_window_ms),
            image: Some(0),
            last_event_ms: 0,
            config,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The underlying zoom and pan state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Returns `true` while the viewer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    /// Index of the displayed image, if open.
    #[must_use]
    pub fn image_index(&self) -> Option<usize> {
        self.image
    }

    /// Opens the viewer on `image_index` with a fresh, fitted state.
    ///
    /// The natural size of the new image is unknown until
    /// [`set_natural_size`](Self::set_natural_size) is called.
    pub fn open(&mut self, image_index: usize) {
        log::debug!("image viewport: open image {image_index}");
        self.reset_session();
        self.image = Some(image_index);
    }

    /// Switches the open viewer to another image.
    ///
    /// Showing the image that is already displayed does nothing. Returns
    /// `true` if the image changed.
    pub fn show_image(&mut self, image_index: usize) -> bool {
        match self.image {
            Some(current) if current != image_index => {
                log::debug!("image viewport: show image {image_index} (was {current})");
                self.reset_session();
                self.image = Some(image_index);
                true
            }
            _ => false,
        }
    }

    /// Closes the viewer, cancelling any gesture or inertia.
    pub fn close(&mut self) {
        if self.image.take().is_some() {
            log::debug!("image viewport: close");
            self.reset_session();
        }
    }

    /// Updates the container size; the current state is re-clamped.
    pub fn set_container_size(&mut self, container: Size) {
        self.viewport.set_container_size(container);
    }

    /// Sets or clears the natural size of the displayed image.
    pub fn set_natural_size(&mut self, natural: Option<Size>) {
        self.viewport.set_natural_size(natural);
    }

    /// Handles a pointer press.
    pub fn pointer_down(&mut self, id: K, position: Point, time_ms: u64) -> bool {
        if !self.is_open() || !position.is_finite() {
            return false;
        }
        let fresh = self.pointers.is_empty();
        if !self.pointers.register(id, position) {
            return false;
        }
        self.touch(time_ms);

        if matches!(self.gesture, Gesture::Inertia(_)) {
            log::debug!("image viewport: inertia cancelled by pointer down");
        }

        match self.pointers.count() {
            1 => {
                self.velocity.reset();
                self.set_gesture(Gesture::SingleDown {
                    anchor: PanSession {
                        last: position,
                        last_time_ms: time_ms,
                    },
                });
                if fresh && self.taps.on_down(time_ms) == TapKind::Double {
                    self.toggle_zoom();
                }
            }
            _ => {
                self.taps.reset();
                self.velocity.reset();
                if let Some(distance) = self.pointers.distance() {
                    self.set_gesture(Gesture::Pinching(PinchSession::new(
                        distance,
                        self.viewport.scale(),
                        self.viewport.offset(),
                    )));
                }
            }
        }
        true
    }

    /// Handles a pointer move.
    pub fn pointer_move(&mut self, id: K, position: Point, time_ms: u64) -> bool {
        if !self.is_open() || !position.is_finite() {
            return false;
        }
        if !self.pointers.update(id, position) {
            return false;
        }
        self.touch(time_ms);

        let next = match &self.gesture {
            Gesture::SingleDown { anchor } | Gesture::Panning(anchor) => {
                let mut pan = *anchor;
                if self.viewport.is_zoomed() {
                    self.pan(&mut pan, position, time_ms);
                    Gesture::Panning(pan)
                } else {
                    pan.advance(position, time_ms);
                    Gesture::SingleDown { anchor: pan }
                }
            }
            Gesture::Pinching(pinch) => {
                let pinch = *pinch;
                self.pinch(&pinch);
                return true;
            }
            Gesture::Idle | Gesture::Inertia(_) => return true,
        };
        self.set_gesture(next);
        true
    }

    /// Handles a pointer release.
    ///
    /// Releasing the last pointer of a zoomed pan that was still moving
    /// starts inertia. A pointer held still for longer than
    /// [`fling_window_ms`](ViewportConfig::fling_window_ms) before release
    /// does not fling.
    pub fn pointer_up(&mut self, id: K, time_ms: u64) -> bool {
        if !self.is_open() || self.pointers.remove(id).is_none() {
            return false;
        }
        self.touch(time_ms);
        let held = match &self.gesture {
            Gesture::Panning(pan) => {
                time_ms.saturating_sub(pan.last_time_ms) > self.config.fling_window_ms
            }
            _ => false,
        };
        self.after_release(!held);
        true
    }

    /// Handles a pointer cancellation.
    ///
    /// Behaves like [`pointer_up`](Self::pointer_up) but never starts inertia.
    pub fn pointer_cancel(&mut self, id: K) -> bool {
        if !self.is_open() || self.pointers.remove(id).is_none() {
            return false;
        }
        self.after_release(false);
        true
    }

    /// Handles a wheel event; negative `delta_y` zooms in.
    ///
    /// The zoom is applied immediately and does not stop inertia.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        if !self.is_open() || !delta_y.is_finite() {
            return false;
        }
        let scale = self
            .config
            .clamp_scale(self.viewport.scale() - delta_y * self.config.wheel_sensitivity);
        self.viewport.commit(scale, self.viewport.offset());
        true
    }

    /// Handles a relative trackpad pinch, where `delta` is the fractional
    /// change in scale (`0.1` zooms in by ten percent).
    pub fn trackpad_pinch(&mut self, delta: f64) -> bool {
        if !self.is_open() || !delta.is_finite() {
            return false;
        }
        let scale = self
            .config
            .clamp_scale(self.viewport.scale() * (1.0 + delta).max(0.0));
        self.viewport.commit(scale, self.viewport.offset());
        true
    }

    /// Toggles zoom as a double tap would, for hosts with a native
    /// double-click event.
    pub fn double_click(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        if matches!(self.gesture, Gesture::Inertia(_)) {
            self.set_gesture(Gesture::Idle);
        }
        self.toggle_zoom();
        true
    }

    /// Runs one animation frame at `now_ms` and returns the transform to render.
    pub fn frame(&mut self, now_ms: u64) -> ViewTransform {
        self.viewport.begin_frame();
        let step = match &mut self.gesture {
            Gesture::Inertia(sim) => sim.step(&mut self.viewport, now_ms),
            _ => return self.viewport.transform(),
        };
        match step {
            InertiaStep::Running => self.viewport.request_frame(),
            InertiaStep::Stopped => self.set_gesture(Gesture::Idle),
        }
        self.viewport.transform()
    }

    /// Returns `true` once per needed animation frame.
    pub fn take_frame_request(&mut self) -> bool {
        self.viewport.take_frame_request()
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    /// Current transform as an affine map about the container center.
    #[must_use]
    pub fn affine(&self) -> Affine {
        let container = self.viewport.bounds().container();
        self.transform()
            .to_affine_about(Point::new(container.width / 2.0, container.height / 2.0))
    }

    /// Zoom level as a rounded percentage.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    /// Returns `true` when zoomed in past the minimum scale.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.viewport.is_zoomed()
    }

    /// Current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    /// Current pan offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.viewport.offset()
    }

    /// The active gesture.
    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Kind of the active gesture.
    #[must_use]
    pub fn gesture_kind(&self) -> GestureKind {
        self.gesture.kind()
    }

    /// Current velocity: the inertia velocity while coasting, otherwise the
    /// pan estimate.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        match &self.gesture {
            Gesture::Inertia(sim) => sim.velocity(),
            _ => self.velocity.velocity(),
        }
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.count()
    }

    /// Snapshot of the controller for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ImageViewportDebugInfo {
        ImageViewportDebugInfo {
            image: self.image,
            container: self.viewport.bounds().container(),
            natural: self.viewport.bounds().natural(),
            scale: self.viewport.scale(),
            offset: self.viewport.offset(),
            extents: self.viewport.extents(),
            gesture: self.gesture.kind(),
            pointer_count: self.pointers.count(),
            velocity: self.velocity(),
            frame_pending: self.viewport.has_pending_frame(),
            tap_pending: self.taps.is_pending(),
        }
    }

    fn touch(&mut self, time_ms: u64) {
        self.last_event_ms = self.last_event_ms.max(time_ms);
    }

    fn pan(&mut self, pan: &mut PanSession, position: Point, time_ms: u64) {
        let (delta, dt) = pan.advance(position, time_ms);
        let proposed = self.viewport.offset() + delta;
        self.viewport.commit(self.viewport.scale(), proposed);
        self.velocity.add_sample(delta, dt);
    }

    fn pinch(&mut self, pinch: &PinchSession) {
        let Some(distance) = self.pointers.distance() else {
            return;
        };
        let scale = self
            .config
            .clamp_scale(pinch.scale_for(distance, self.config.min_pinch_distance));
        self.viewport.commit(scale, pinch.initial_offset);
    }

    fn after_release(&mut self, fling: bool) {
        match self.pointers.positions().first() {
            None => {
                let velocity = self.velocity.velocity();
                let speed = self.velocity.speed();
                let moving = !self.velocity.is_zero();
                self.velocity.reset();
                if fling && moving && self.viewport.is_zoomed() {
                    log::debug!(
                        "image viewport: inertia from ({:.1}, {:.1}), {speed:.1} px/s",
                        velocity.x,
                        velocity.y
                    );
                    let sim = InertiaSimulator::new(velocity, self.last_event_ms, &self.config);
                    self.set_gesture(Gesture::Inertia(sim));
                    self.viewport.request_frame();
                } else {
                    self.set_gesture(Gesture::Idle);
                }
            }
            Some(remaining) => {
                // A pinch lost a pointer; the remaining one restarts as a pan.
                let anchor = PanSession {
                    last: remaining.position,
                    last_time_ms: self.last_event_ms,
                };
                self.velocity.reset();
                self.set_gesture(Gesture::SingleDown { anchor });
            }
        }
    }

    fn toggle_zoom(&mut self) {
        self.velocity.reset();
        if self.viewport.is_zoomed() {
            log::debug!("image viewport: zoom out");
            self.viewport.reset();
        } else {
            log::debug!("image viewport: zoom in");
            let scale = self.config.clamp_scale(self.config.double_tap_scale);
            self.viewport.commit(scale, self.viewport.offset());
        }
    }

    fn set_gesture(&mut self, next: Gesture) {
        let (from, to) = (self.gesture.kind(), next.kind());
        if from != to {
            log::debug!("image viewport: gesture {from:?} -> {to:?}");
        }
        self.gesture = next;
    }

    fn reset_session(&mut self) {
        self.pointers.clear();
        self.set_gesture(Gesture::Idle);
        self.velocity.reset();
        self.taps.reset();
        self.viewport.set_natural_size(None);
        self.viewport.reset();
        self.viewport.request_frame();
    }
}

/// Debug snapshot of an [`ImageViewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageViewportDebugInfo {
    /// Index of the displayed image, if open.
    pub image: Option<usize>,
    /// Container size.
    pub container: Size,
    /// Natural image size, if known.
    pub natural: Option<Size>,
    /// Current zoom factor.
    pub scale: f64,
    /// Current pan offset.
    pub offset: Vec2,
    /// Pan extents at the current scale.
    pub extents: Vec2,
    /// Kind of the active gesture.
    pub gesture: GestureKind,
    /// Number of pointers down.
    pub pointer_count: usize,
    /// Pan or inertia velocity in pixels per second.
    pub velocity: Vec2,
    /// Whether a frame is needed or already requested.
    pub frame_pending: bool,
    /// Whether a first tap is waiting for its partner.
    pub tap_pending: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::ImageViewport;
    use crate::gesture::GestureKind;

    fn viewer() -> ImageViewport<u32> {
        let mut viewer = ImageViewport::new(Size::new(800.0, 600.0));
        viewer.set_natural_size(Some(Size::new(1600.0, 1200.0)));
        viewer
    }

    #[test]
    fn single_pointer_at_rest_does_not_pan() {
        let mut v = viewer();
        v.pointer_down(1, Point::new(100.0, 100.0), 0);
        v.pointer_move(1, Point::new(300.0, 250.0), 16);

        assert_eq!(v.gesture_kind(), GestureKind::SingleDown);
        assert_eq!(v.offset(), Vec2::ZERO);
    }

    #[test]
    fn zoomed_move_pans_and_clamps() {
        let mut v = viewer();
        v.double_click();
        assert_eq!(v.scale(), 2.0);

        v.pointer_down(1, Point::new(100.0, 100.0), 1_000);
        v.pointer_move(1, Point::new(600.0, 600.0), 1_016);

        assert_eq!(v.gesture_kind(), GestureKind::Panning);
        assert_eq!(v.offset(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn third_pointer_is_ignored() {
        let mut v = viewer();
        assert!(v.pointer_down(1, Point::new(100.0, 100.0), 0));
        assert!(v.pointer_down(2, Point::new(200.0, 100.0), 5));
        assert!(!v.pointer_down(3, Point::new(300.0, 100.0), 10));
        assert_eq!(v.pointer_count(), 2);
        assert!(!v.pointer_move(3, Point::new(310.0, 100.0), 20));
        assert_eq!(v.gesture_kind(), GestureKind::Pinching);
    }

    #[test]
    fn pinch_losing_a_pointer_returns_to_single_down() {
        let mut v = viewer();
        v.pointer_down(1, Point::new(300.0, 300.0), 0);
        v.pointer_down(2, Point::new(400.0, 300.0), 10);
        v.pointer_move(2, Point::new(500.0, 300.0), 20);
        assert_eq!(v.scale(), 2.0);

        v.pointer_up(2, 30);

        assert_eq!(v.gesture_kind(), GestureKind::SingleDown);
        assert_eq!(v.pointer_count(), 1);
    }

    #[test]
    fn cancel_never_starts_inertia() {
        let mut v = viewer();
        v.double_click();
        v.pointer_down(1, Point::new(100.0, 100.0), 1_000);
        v.pointer_move(1, Point::new(120.0, 100.0), 1_016);
        v.pointer_move(1, Point::new(140.0, 100.0), 1_032);

        assert!(v.pointer_cancel(1));

        assert_eq!(v.gesture_kind(), GestureKind::Idle);
        assert!(!v.pointer_cancel(1));
    }

    #[test]
    fn closed_viewer_ignores_input() {
        let mut v = viewer();
        v.close();
        assert!(!v.is_open());
        assert!(!v.pointer_down(1, Point::ZERO, 0));
        assert!(!v.wheel(-1000.0));
        assert!(!v.double_click());
        assert_eq!(v.scale(), 1.0);

        v.open(3);
        assert_eq!(v.image_index(), Some(3));
        assert!(v.wheel(-1000.0));
    }

    #[test]
    fn showing_another_image_resets_state() {
        let mut v = viewer();
        v.double_click();
        assert!(v.is_zoomed());

        assert!(!v.show_image(0));
        assert!(v.is_zoomed());

        assert!(v.show_image(1));
        assert!(!v.is_zoomed());
        assert_eq!(v.offset(), Vec2::ZERO);
        assert_eq!(v.viewport().bounds().natural(), None);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut v = viewer();
        assert!(!v.pointer_down(1, Point::new(f64::NAN, 0.0), 0));
        assert!(!v.wheel(f64::INFINITY));
        assert!(!v.trackpad_pinch(f64::NAN));
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.pointer_count(), 0);
    }

    #[test]
    fn trackpad_pinch_scales_relatively() {
        let mut v = viewer();
        v.trackpad_pinch(0.5);
        assert_eq!(v.scale(), 1.5);
        v.trackpad_pinch(-0.5);
        assert_eq!(v.scale(), 1.0);
        v.trackpad_pinch(-5.0);
        assert_eq!(v.scale(), 1.0);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut v = viewer();
        v.double_click();
        v.pointer_down(7, Point::new(10.0, 10.0), 0);

        let info = v.debug_info();
        assert_eq!(info.image, Some(0));
        assert_eq!(info.scale, 2.0);
        assert_eq!(info.extents, Vec2::new(400.0, 300.0));
        assert_eq!(info.gesture, GestureKind::SingleDown);
        assert_eq!(info.pointer_count, 1);
        assert_eq!(info.natural, Some(Size::new(1600.0, 1200.0)));
        assert!(info.tap_pending);
    }

    #[test]
    fn affine_is_about_container_center() {
        let mut v = viewer();
        v.double_click();
        let affine = v.affine();
        assert_eq!(affine * Point::new(400.0, 300.0), Point::new(400.0, 300.0));
        assert_eq!(affine * Point::new(0.0, 0.0), Point::new(-400.0, -300.0));
    }
}
