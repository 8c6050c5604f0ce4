use crate::complex::Complex;
use crate::constants::{IM_MAX, IM_MIN, RE_MAX, RE_MIN};
use crate::error::CoreError;

/// A rectangle of the complex plane stretched over a rectangle of pixels.
///
/// Each axis is scaled independently, so the pixel aspect ratio is whatever
/// the canvas happens to be. `(0, 0)` is the top-left pixel and maps to
/// `(re_min, im_min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,

    /// Canvas width in pixels.
    pub width: f64,

    /// Canvas height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport with explicit bounds.
    pub fn new(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        width: f64,
        height: f64,
    ) -> crate::Result<Self> {
        let bounds = [re_min, re_max, im_min, im_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be finite, got {bounds:?}"),
            });
        }
        if re_min >= re_max || im_min >= im_max {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "empty region re [{re_min}, {re_max}] im [{im_min}, {im_max}]"
                ),
            });
        }
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be positive and finite, got {width}×{height}"),
            });
        }
        Ok(Self {
            re_min,
            re_max,
            im_min,
            im_max,
            width,
            height,
        })
    }

    /// The fixed region `[-2.5, 1] × [-1, 1]` over a canvas of the given size.
    pub fn standard(width: f64, height: f64) -> crate::Result<Self> {
        Self::new(RE_MIN, RE_MAX, IM_MIN, IM_MAX, width, height)
    }

    /// Same plane region, different canvas size.
    pub fn with_size(&self, width: f64, height: f64) -> crate::Result<Self> {
        Self::new(self.re_min, self.re_max, self.im_min, self.im_max, width, height)
    }

    /// Map a (possibly fractional, possibly off-canvas) pixel to the plane.
    #[inline]
    pub fn to_plane(&self, px: f64, py: f64) -> Complex {
        Complex::new(
            self.re_min + px / self.width * (self.re_max - self.re_min),
            self.im_min + py / self.height * (self.im_max - self.im_min),
        )
    }

    /// Inverse of [`to_plane`](Self::to_plane).
    #[inline]
    pub fn to_pixel(&self, point: Complex) -> (f64, f64) {
        (
            (point.re - self.re_min) * self.width / (self.re_max - self.re_min),
            (point.im - self.im_min) * self.height / (self.im_max - self.im_min),
        )
    }
}
