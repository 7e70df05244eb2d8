//! Hue sprite sheet: all 360 planes side by side in one image.
//!
//! Tile `hue` occupies columns `hue * width .. (hue + 1) * width`, so a host
//! can show the plane for a hue by offsetting a single background image
//! instead of loading 360 files.

use hsl_picker_core::bitmap::Bitmap;
use hsl_picker_core::color::Rgb8;
use hsl_picker_core::error::PickerError;
use hsl_picker_core::plane::{HuePlaneRenderer, HUE_COUNT};
use tracing::info;

/// Default artifact name of the sheet.
pub const SHEET_ARTIFACT_NAME: &str = "areas.png";

/// Left edge of the tile for `hue` (wrapped modulo 360) in a sheet of
/// `tile_width`-wide planes.
pub fn sheet_tile_offset(hue: u16, tile_width: usize) -> usize {
    usize::from(hue % HUE_COUNT) * tile_width
}

/// Renders the full sheet.
///
/// Returns `PickerError::InvalidDimensions` if `360 * width` overflows.
pub fn build_hue_sheet(renderer: &HuePlaneRenderer) -> Result<Bitmap, PickerError> {
    let tile = renderer.dimensions();
    let width = tile
        .width()
        .checked_mul(usize::from(HUE_COUNT))
        .ok_or(PickerError::InvalidDimensions)?;
    let mut sheet = Bitmap::filled(width, tile.height(), Rgb8::default())?;
    for hue in 0..HUE_COUNT {
        let plane = renderer.render(hue)?;
        sheet.blit(&plane, sheet_tile_offset(hue, tile.width()), 0);
    }
    info!(width, height = tile.height(), "built hue sheet");
    Ok(sheet)
}
