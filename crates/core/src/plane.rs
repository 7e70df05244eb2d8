//! Saturation/lightness plane rasterization for a fixed hue.
//!
//! Pixel `(x, y)` of a `width x height` plane has saturation `x / width` and
//! lightness `1 - y / height`: saturation grows left to right, lightness falls
//! from 1 at the top row towards 0 at the bottom. Output depends only on
//! `(hue, width, height)`, which is what makes per-hue caching valid.

use crate::bitmap::{Bitmap, Dimensions};
use crate::color::{hsl_to_srgb, Rgb8};
use crate::error::PickerError;

/// Number of distinct integer hues a plane can be rendered for.
pub const HUE_COUNT: u16 = 360;

/// Renders planes of one fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuePlaneRenderer {
    dims: Dimensions,
}

impl HuePlaneRenderer {
    /// Returns `PickerError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        Ok(Self {
            dims: Dimensions::new(width, height)?,
        })
    }

    pub fn from_dimensions(dims: Dimensions) -> Self {
        Self { dims }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Renders the plane for `hue`.
    ///
    /// Returns `PickerError::InvalidHue` if `hue >= 360`.
    pub fn render(&self, hue: u16) -> Result<Bitmap, PickerError> {
        if hue >= HUE_COUNT {
            return Err(PickerError::InvalidHue(hue));
        }
        Ok(self.rasterize(hue))
    }

    /// Renders without checking the hue; callers guarantee `hue < 360`.
    pub(crate) fn rasterize(&self, hue: u16) -> Bitmap {
        let dims = self.dims;
        Bitmap::from_fn(dims, |x, y| plane_pixel(hue, x, y, dims))
    }
}

/// Convenience wrapper: validates dimensions and renders a single plane.
pub fn render_plane(hue: u16, width: usize, height: usize) -> Result<Bitmap, PickerError> {
    HuePlaneRenderer::new(width, height)?.render(hue)
}

/// Color of plane pixel `(x, y)` at `hue`.
pub fn plane_pixel(hue: u16, x: usize, y: usize, dims: Dimensions) -> Rgb8 {
    let saturation = x as f64 / dims.width() as f64;
    let lightness = 1.0 - y as f64 / dims.height() as f64;
    Rgb8::from(hsl_to_srgb(f64::from(hue), saturation, lightness))
}
