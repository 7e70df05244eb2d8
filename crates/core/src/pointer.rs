//! Pointer-to-color coordinate mapping for the plane and the hue scale.
//!
//! Every function here is total: pointer positions outside the surface are
//! clamped to its edges (NaN counts as 0), so a drag that leaves the surface
//! keeps producing in-range values instead of errors.
//!
//! The scale is descending: row 0 is hue 360 and the bottom edge is hue 0.
//! [`scale_y_to_hue`] and [`hue_to_scale_y`] are exact inverses over
//! `[0, height]`.

use crate::bitmap::Dimensions;
use crate::color::HUE_RANGE;

/// A position in surface-local pixel coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Saturation and lightness picked on the plane, both in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSelection {
    pub saturation: f64,
    pub lightness: f64,
}

/// Clamps `v` to `[0, max]`, mapping NaN to 0.
fn clamp_coord(v: f64, max: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, max)
    }
}

/// Clamps a pointer position to the plane bounds `[0, width] x [0, height]`.
pub fn clamp_to_plane(x: f64, y: f64, dims: Dimensions) -> Point {
    Point {
        x: clamp_coord(x, dims.width() as f64),
        y: clamp_coord(y, dims.height() as f64),
    }
}

/// Maps a pointer position on the plane to saturation (left → right) and
/// lightness (top = 1, bottom = 0).
pub fn plane_to_color(x: f64, y: f64, dims: Dimensions) -> PlaneSelection {
    let p = clamp_to_plane(x, y, dims);
    PlaneSelection {
        saturation: p.x / dims.width() as f64,
        lightness: 1.0 - p.y / dims.height() as f64,
    }
}

/// Inverse of [`plane_to_color`]: where the selection marker is centred for
/// the given saturation and lightness.
pub fn color_to_plane_position(saturation: f64, lightness: f64, dims: Dimensions) -> Point {
    let s = clamp_coord(saturation, 1.0);
    let l = clamp_coord(lightness, 1.0);
    Point {
        x: s * dims.width() as f64,
        y: (1.0 - l) * dims.height() as f64,
    }
}

/// Maps a pointer row on the scale to a hue in [0, 360].
///
/// Row 0 maps to 360 and `height` maps to 0. The result is continuous;
/// callers that need an integer hue round it themselves.
pub fn scale_y_to_hue(y: f64, dims: Dimensions) -> f64 {
    let h = dims.height() as f64;
    HUE_RANGE * (1.0 - clamp_coord(y, h) / h)
}

/// Inverse of [`scale_y_to_hue`]: the scale row for `hue`, clamped to
/// [0, 360] first.
pub fn hue_to_scale_y(hue: f64, dims: Dimensions) -> f64 {
    let h = dims.height() as f64;
    h * (1.0 - clamp_coord(hue, HUE_RANGE) / HUE_RANGE)
}

/// Top-left coordinate of a marker of `size` pixels centred on `center`.
///
/// An 11 px marker sits 5 px up and left of its centre.
pub fn marker_origin(center: f64, size: usize) -> f64 {
    center - (size / 2) as f64
}
