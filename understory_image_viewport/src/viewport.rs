// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The committed scale and offset, and the frame request that follows a change.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Size, Vec2};

use crate::bounds::Bounds;
use crate::config::ViewportConfig;

/// Transform handed to the renderer.
///
/// The image is laid out fitted and centered in its container; the renderer
/// then scales it by `scale` about the container center and moves it by
/// `translate`. In CSS terms this is
/// `transform: translate(Xpx, Ypx) scale(S)` with a centered
/// `transform-origin`, which is also what the [`fmt::Display`] impl prints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Uniform zoom factor relative to the fitted size.
    pub scale: f64,
    /// Pan offset in container pixels.
    pub translate: Vec2,
}

impl ViewTransform {
    /// The untransformed, fitted image.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    /// Returns the transform as an affine map about `center`, in container coordinates.
    #[must_use]
    pub fn to_affine_about(&self, center: Point) -> Affine {
        Affine::translate(center.to_vec2() + self.translate)
            * Affine::scale(self.scale)
            * Affine::translate(-center.to_vec2())
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum FrameState {
    #[default]
    Clean,
    /// Something changed and the host has not been asked for a frame yet.
    Dirty,
    /// The host has been asked for a frame that has not run yet.
    Requested,
}

/// The authoritative zoom and pan of one displayed image.
///
/// Every change goes through [`ViewportState::commit`], which clamps the
/// scale to the configured limits and the offset to the [`Bounds`] extents
/// for that scale. The pan invariant `|offset| <= extents(scale)` therefore
/// holds after every call, including geometry changes.
///
/// Changes are coalesced into at most one outstanding frame request; see
/// [`ViewportState::take_frame_request`].
#[derive(Clone, Debug)]
pub struct ViewportState {
    scale: f64,
    offset: Vec2,
    min_scale: f64,
    max_scale: f64,
    bounds: Bounds,
    frame: FrameState,
}

impl ViewportState {
    /// Creates a viewport at minimum scale, centered, for `bounds`.
    #[must_use]
    pub fn new(config: &ViewportConfig, bounds: Bounds) -> Self {
        let min_scale = config.min_scale;
        let max_scale = config.max_scale.max(min_scale);
        Self {
            scale: min_scale,
            offset: Vec2::ZERO,
            min_scale,
            max_scale,
            bounds,
            frame: FrameState::Dirty,
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pan offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Geometry used for clamping.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Pan extents at the current scale.
    #[must_use]
    pub fn extents(&self) -> Vec2 {
        self.bounds.extents(self.scale)
    }

    /// Returns `true` when zoomed in past the minimum scale.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > self.min_scale
    }

    /// Current transform for rendering.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.scale,
            translate: self.offset,
        }
    }

    /// Zoom level as a whole percentage (`scale * 100`, rounded).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scale is clamped to a small positive range"
    )]
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Replaces the state with `scale` and `offset`, after clamping both.
    ///
    /// A non-finite `scale` or `offset` component keeps the current value.
    /// Returns `true` if the state changed; a change marks a frame as needed.
    pub fn commit(&mut self, scale: f64, offset: Vec2) -> bool {
        let scale = if scale.is_finite() {
            scale.max(self.min_scale).min(self.max_scale)
        } else {
            self.scale
        };
        let proposed = Vec2::new(
            if offset.x.is_finite() {
                offset.x
            } else {
                self.offset.x
            },
            if offset.y.is_finite() {
                offset.y
            } else {
                self.offset.y
            },
        );
        let offset = self.bounds.clamp_offset(proposed, scale);
        if scale == self.scale && offset == self.offset {
            return false;
        }
        self.scale = scale;
        self.offset = offset;
        self.mark_dirty();
        true
    }

    /// Returns to minimum scale, centered.
    pub fn reset(&mut self) -> bool {
        self.commit(self.min_scale, Vec2::ZERO)
    }

    /// Updates the container size and re-clamps the current state.
    pub fn set_container_size(&mut self, container: Size) -> bool {
        if self.bounds.container() == container {
            return false;
        }
        self.bounds.set_container(container);
        self.reclamp()
    }

    /// Updates the natural image size and re-clamps the current state.
    pub fn set_natural_size(&mut self, natural: Option<Size>) -> bool {
        if self.bounds.natural() == natural {
            return false;
        }
        self.bounds.set_natural(natural);
        self.reclamp()
    }

    /// Marks that a frame is needed even though the state did not change.
    pub fn request_frame(&mut self) {
        self.mark_dirty();
    }

    /// Returns `true` once per needed frame.
    ///
    /// Hosts call this after dispatching input; when it returns `true` they
    /// schedule one animation frame and later call
    /// [`ViewportState::begin_frame`]. While that frame is outstanding,
    /// further commits do not produce another request.
    pub fn take_frame_request(&mut self) -> bool {
        if self.frame == FrameState::Dirty {
            self.frame = FrameState::Requested;
            true
        } else {
            false
        }
    }

    /// Returns `true` if a frame is needed or already requested.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.frame != FrameState::Clean
    }

    /// Acknowledges that the scheduled frame is running.
    pub fn begin_frame(&mut self) {
        self.frame = FrameState::Clean;
    }

    fn reclamp(&mut self) -> bool {
        let offset = self.bounds.clamp_offset(self.offset, self.scale);
        if offset == self.offset {
            // Geometry changed, so the rendered layout did too.
            self.mark_dirty();
            return false;
        }
        self.offset = offset;
        self.mark_dirty();
        true
    }

    fn mark_dirty(&mut self) {
        if self.frame == FrameState::Clean {
            log::trace!("viewport: frame requested");
            self.frame = FrameState::Dirty;
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{ViewTransform, ViewportState};
    use crate::bounds::Bounds;
    use crate::config::ViewportConfig;

    fn landscape() -> ViewportState {
        ViewportState::new(
            &ViewportConfig::default(),
            Bounds::new(Size::new(800.0, 600.0), Some(Size::new(1600.0, 1200.0))),
        )
    }

    #[test]
    fn starts_fitted_and_centered() {
        let vp = landscape();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), Vec2::ZERO);
        assert!(!vp.is_zoomed());
        assert_eq!(vp.zoom_percent(), 100);
        assert_eq!(vp.transform(), ViewTransform::IDENTITY);
    }

    #[test]
    fn commit_clamps_scale_and_offset() {
        let mut vp = landscape();
        assert!(vp.commit(9.0, Vec2::new(-1e9, 1e9)));
        assert_eq!(vp.scale(), 5.0);
        // 4000x3000 in 800x600.
        assert_eq!(vp.offset(), Vec2::new(-1600.0, 1200.0));

        assert!(vp.commit(0.25, Vec2::new(10.0, 10.0)));
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), Vec2::ZERO);
    }

    #[test]
    fn commit_reports_unchanged_state() {
        let mut vp = landscape();
        assert!(!vp.commit(1.0, Vec2::new(50.0, 50.0)));
        assert!(vp.commit(2.0, Vec2::ZERO));
        assert!(!vp.commit(2.0, Vec2::ZERO));
    }

    #[test]
    fn non_finite_proposals_keep_current_values() {
        let mut vp = landscape();
        vp.commit(2.0, Vec2::new(100.0, 50.0));

        vp.commit(f64::NAN, Vec2::new(f64::NAN, 20.0));

        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.offset(), Vec2::new(100.0, 20.0));
    }

    #[test]
    fn shrinking_container_reclamps() {
        let mut vp = landscape();
        vp.commit(2.0, Vec2::new(400.0, 300.0));

        // A taller container of the same width: base stays 800x600 but the
        // vertical overflow shrinks to (1200 - 1000) / 2.
        assert!(vp.set_container_size(Size::new(800.0, 1000.0)));
        assert_eq!(vp.offset(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn unknown_natural_size_pins_to_center() {
        let mut vp = landscape();
        vp.commit(3.0, Vec2::new(200.0, 200.0));

        assert!(vp.set_natural_size(None));
        assert_eq!(vp.offset(), Vec2::ZERO);
        // Scale is kept; only panning is disallowed.
        assert_eq!(vp.scale(), 3.0);

        vp.commit(3.0, Vec2::new(200.0, 200.0));
        assert_eq!(vp.offset(), Vec2::ZERO);
    }

    #[test]
    fn frame_requests_are_coalesced() {
        let mut vp = landscape();
        // The initial state needs a first paint.
        assert!(vp.take_frame_request());
        assert!(!vp.take_frame_request());
        vp.begin_frame();
        assert!(!vp.has_pending_frame());

        vp.commit(2.0, Vec2::ZERO);
        vp.commit(2.0, Vec2::new(10.0, 0.0));
        vp.commit(2.5, Vec2::new(20.0, 0.0));
        assert!(vp.take_frame_request());
        assert!(!vp.take_frame_request());

        // Commits while the frame is outstanding ride along with it.
        vp.commit(3.0, Vec2::ZERO);
        assert!(!vp.take_frame_request());
        assert!(vp.has_pending_frame());

        vp.begin_frame();
        vp.commit(3.5, Vec2::ZERO);
        assert!(vp.take_frame_request());
    }

    #[test]
    fn unchanged_commit_does_not_request_frame() {
        let mut vp = landscape();
        vp.take_frame_request();
        vp.begin_frame();

        vp.commit(1.0, Vec2::ZERO);

        assert!(!vp.take_frame_request());
    }

    #[test]
    fn zoom_percent_rounds() {
        let mut vp = landscape();
        vp.commit(2.504, Vec2::ZERO);
        assert_eq!(vp.zoom_percent(), 250);
        vp.commit(2.506, Vec2::ZERO);
        assert_eq!(vp.zoom_percent(), 251);
    }

    #[test]
    fn affine_about_center_keeps_center_fixed_without_pan() {
        let transform = ViewTransform {
            scale: 2.0,
            translate: Vec2::ZERO,
        };
        let center = Point::new(400.0, 300.0);
        let affine = transform.to_affine_about(center);
        assert_eq!(affine * center, center);
        assert_eq!(affine * Point::new(500.0, 300.0), Point::new(600.0, 300.0));

        let panned = ViewTransform {
            scale: 2.0,
            translate: Vec2::new(10.0, -5.0),
        };
        assert_eq!(
            panned.to_affine_about(center) * center,
            Point::new(410.0, 295.0)
        );
    }
}
