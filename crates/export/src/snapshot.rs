//! PNG encoding of a [`Bitmap`].
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on the `export` crate without pulling in the `image` crate.
//! The pixel buffer conversion itself lives in [`crate::pixel`] (always available).

use hsl_picker_core::bitmap::Bitmap;
use hsl_picker_core::error::PickerError;
use std::path::Path;

use crate::pixel::bitmap_to_rgba;

/// Writes a bitmap as a PNG image.
///
/// Returns `PickerError::InvalidDimensions` if the bitmap dimensions overflow
/// `u32`, or `PickerError::Io` on write failure.
pub fn write_png(bitmap: &Bitmap, path: &Path) -> Result<(), PickerError> {
    let rgba = bitmap_to_rgba(bitmap);
    let w = u32::try_from(bitmap.width()).map_err(|_| PickerError::InvalidDimensions)?;
    let h = u32::try_from(bitmap.height()).map_err(|_| PickerError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| PickerError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| PickerError::Io(format!("{}: {e}", path.display())))
}
