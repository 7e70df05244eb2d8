//! Pure-computation pixel buffer conversion from [`Bitmap`].
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and the WASM `ImageData` path can share the same conversion.

use hsl_picker_core::bitmap::Bitmap;

/// Flattens a bitmap into an RGBA8 buffer, row-major, alpha always 255.
///
/// The buffer length is `width * height * 4`.
pub fn bitmap_to_rgba(bitmap: &Bitmap) -> Vec<u8> {
    bitmap
        .pixels()
        .iter()
        .flat_map(|px| [px.r, px.g, px.b, 255u8])
        .collect()
}
