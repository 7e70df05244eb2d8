//! Vertical hue scale strip.
//!
//! The strip is descending: row `y` is painted with
//! `hsl(scale_y_to_hue(y), 100%, 50%)`, so the top row is hue 360 (red) and
//! hues fall towards 0 at the bottom edge. Rows and hues convert through the
//! same functions the pointer mapper uses, which keeps the painted strip and
//! the drag handling aligned.

use crate::bitmap::{Bitmap, Dimensions};
use crate::color::{hsl_to_srgb, Rgb8};
use crate::error::PickerError;
use crate::pointer::{hue_to_scale_y, scale_y_to_hue};

/// Width of the scale strip used by the original widget layout.
pub const DEFAULT_SCALE_WIDTH: usize = 19;

/// Renders the hue scale strip at a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueScaleRenderer {
    dims: Dimensions,
}

impl HueScaleRenderer {
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

    /// Paints one fully saturated row per pixel of height.
    pub fn render(&self) -> Bitmap {
        let dims = self.dims;
        Bitmap::from_fn(dims, |_, y| {
            Rgb8::from(hsl_to_srgb(scale_row_hue(y, dims), 1.0, 0.5))
        })
    }
}

/// Renders a `width x height` scale strip.
pub fn render_scale(width: usize, height: usize) -> Result<Bitmap, PickerError> {
    Ok(HueScaleRenderer::new(width, height)?.render())
}

/// Hue painted on row `y`, in (0, 360] for rows inside the strip.
pub fn scale_row_hue(y: usize, dims: Dimensions) -> f64 {
    scale_y_to_hue(y as f64, dims)
}

/// Row showing `hue`, the inverse of [`scale_row_hue`].
///
/// Hue 0 sits on the bottom edge, one past the last row, and is reported as
/// the last row.
pub fn row_for_hue(hue: f64, dims: Dimensions) -> usize {
    let y = hue_to_scale_y(hue, dims).round() as usize;
    y.min(dims.height() - 1)
}
