// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting an image into its container and limiting the pan offset.

use kurbo::{Size, Vec2};

/// Geometry that limits how far a zoomed image may be panned.
///
/// The image is first fitted inside the container preserving its aspect
/// ratio (letterboxed or pillarboxed), centered, at scale `1.0`. At scale `s`
/// the fitted size grows by `s` about the container center, and the pan
/// offset on each axis is limited to half the overflow:
///
/// ```text
/// extent_x = max(0, (base_width  * s - container_width)  / 2)
/// extent_y = max(0, (base_height * s - container_height) / 2)
/// ```
///
/// Until both the container and the natural image size are known (finite
/// and positive), every extent is zero and every offset clamps to the
/// center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    container: Size,
    natural: Option<Size>,
}

impl Bounds {
    /// Creates bounds for a container and an optional natural image size.
    #[must_use]
    pub fn new(container: Size, natural: Option<Size>) -> Self {
        Self { container, natural }
    }

    /// Returns the container size.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Sets the measured container size.
    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    /// Returns the natural image size, if known.
    #[must_use]
    pub fn natural(&self) -> Option<Size> {
        self.natural
    }

    /// Sets or clears the natural image size.
    pub fn set_natural(&mut self, natural: Option<Size>) {
        self.natural = natural;
    }

    /// Returns `true` if both sizes are usable.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        is_usable(self.container) && self.natural.is_some_and(is_usable)
    }

    /// Size of the image fitted into the container at scale `1.0`.
    ///
    /// Returns [`Size::ZERO`] when the geometry is not measured.
    #[must_use]
    pub fn base_size(&self) -> Size {
        match self.natural {
            Some(natural) if self.is_measured() => fit_size(self.container, natural),
            _ => Size::ZERO,
        }
    }

    /// Maximum absolute pan offset on each axis at `scale`.
    #[must_use]
    pub fn extents(&self, scale: f64) -> Vec2 {
        let base = self.base_size();
        if base == Size::ZERO || !scale.is_finite() {
            return Vec2::ZERO;
        }
        Vec2::new(
            ((base.width * scale - self.container.width) / 2.0).max(0.0),
            ((base.height * scale - self.container.height) / 2.0).max(0.0),
        )
    }

    /// Clamps `offset` into `[-extent, extent]` on each axis at `scale`.
    ///
    /// `NaN` components clamp to `0.0`. Clamping is idempotent.
    #[must_use]
    pub fn clamp_offset(&self, offset: Vec2, scale: f64) -> Vec2 {
        let extents = self.extents(scale);
        Vec2::new(
            clamp_axis(offset.x, extents.x),
            clamp_axis(offset.y, extents.y),
        )
    }
}

/// Largest size with the aspect ratio of `natural` that fits inside `container`.
#[must_use]
pub fn fit_size(container: Size, natural: Size) -> Size {
    let sx = container.width / natural.width.max(f64::MIN_POSITIVE);
    let sy = container.height / natural.height.max(f64::MIN_POSITIVE);
    let fit = sx.min(sy);
    Size::new(natural.width * fit, natural.height * fit)
}

fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

fn clamp_axis(value: f64, extent: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-extent, extent)
    }
}
