//! Color types and the HSL → sRGB conversion used by the renderers.
//!
//! [`Color`] is the picker's value type: hue in degrees, saturation and
//! lightness in [0, 1]. Renderers turn HSL triples into [`Srgb`] with
//! [`hsl_to_srgb`] and quantize to [`Rgb8`] for storage in a bitmap.

use serde::{Deserialize, Serialize};

use crate::bitmap::Dimensions;

/// Full turn of the hue circle, in degrees.
pub const HUE_RANGE: f64 = 360.0;

/// The selected color: hue in [0, 360), saturation and lightness in [0, 1].
///
/// Fields are private so the range invariant cannot be broken from outside;
/// [`Color::new`] wraps the hue and clamps the other two components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorFields")]
pub struct Color {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Default for Color {
    /// Fully saturated red at half lightness.
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
        }
    }
}

impl Color {
    /// Creates a color, wrapping `hue` modulo 360 and clamping saturation and
    /// lightness to [0, 1]. A non-finite hue and NaN components become 0.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: unit(saturation),
            lightness: unit(lightness),
        }
    }

    /// Hue in degrees, [0, 360).
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Saturation in [0, 1].
    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Lightness in [0, 1].
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Integer hue used to index the plane cache, always in 0..360.
    pub fn hue_index(&self) -> u16 {
        // wrap_hue keeps hue < 360, but rounding 359.6 gives 360
        (self.hue.round() as u16) % 360
    }

    /// Returns a copy with a new hue (wrapped modulo 360).
    pub fn with_hue(self, hue: f64) -> Self {
        Self {
            hue: wrap_hue(hue),
            ..self
        }
    }

    /// Returns a copy with new saturation and lightness (clamped to [0, 1]).
    pub fn with_saturation_lightness(self, saturation: f64, lightness: f64) -> Self {
        Self {
            saturation: unit(saturation),
            lightness: unit(lightness),
            ..self
        }
    }

    /// The rounded form used to decide whether a change is worth notifying.
    ///
    /// Saturation and lightness are snapped to the pixel grid of `plane`, so
    /// two colors picked from different pixels always resolve differently
    /// and sub-pixel jitter never does.
    pub fn resolved(&self, plane: Dimensions) -> ResolvedColor {
        ResolvedColor {
            hue: self.hue_index(),
            saturation: (self.saturation * plane.width() as f64).round() as u32,
            lightness: (self.lightness * plane.height() as f64).round() as u32,
        }
    }

    /// Converts to sRGB for display.
    pub fn to_srgb(&self) -> Srgb {
        hsl_to_srgb(self.hue, self.saturation, self.lightness)
    }
}

/// Deserialization shim so decoded colors go through [`Color::new`].
#[derive(Deserialize)]
struct ColorFields {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl From<ColorFields> for Color {
    fn from(f: ColorFields) -> Self {
        Color::new(f.hue, f.saturation, f.lightness)
    }
}

/// A [`Color`] rounded to integer hue degrees and to plane pixel steps of
/// saturation (columns) and lightness (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedColor {
    pub hue: u16,
    pub saturation: u32,
    pub lightness: u32,
}

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0–255) with rounding.
    pub fn to_hex(self) -> String {
        Rgb8::from(self).to_hex()
    }
}

/// An 8-bit-per-channel RGB pixel, the storage format of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Largest per-channel absolute difference to `other`.
    pub fn max_channel_diff(self, other: Rgb8) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

impl From<Srgb> for Rgb8 {
    fn from(c: Srgb) -> Self {
        Self {
            r: quantize(c.r),
            g: quantize(c.g),
            b: quantize(c.b),
        }
    }
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts HSL to sRGB.
///
/// `hue` is in degrees (any value, wrapped), `saturation` and `lightness` in
/// [0, 1] (clamped). This is the CSS Color 4 `hsl()` conversion, so output
/// matches what a browser paints for `hsl(h, s%, l%)`.
pub fn hsl_to_srgb(hue: f64, saturation: f64, lightness: f64) -> Srgb {
    let h = wrap_hue(hue);
    let s = unit(saturation);
    let l = unit(lightness);
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    Srgb {
        r: f(0.0).clamp(0.0, 1.0),
        g: f(8.0).clamp(0.0, 1.0),
        b: f(4.0).clamp(0.0, 1.0),
    }
}

/// Wraps a hue into [0, 360). Non-finite input maps to 0.
pub fn wrap_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(HUE_RANGE);
    // rem_euclid of a tiny negative value rounds up to exactly 360
    if h >= HUE_RANGE {
        0.0
    } else {
        h
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn default_color_is_saturated_red() {
        let c = Color::default();
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.lightness(), 0.5);
        assert_eq!(Rgb8::from(c.to_srgb()), Rgb8::new(255, 0, 0));
    }

    #[test]
    fn new_wraps_hue_and_clamps_components() {
        let c = Color::new(370.0, 1.5, -0.25);
        assert!(approx_eq(c.hue(), 10.0));
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.lightness(), 0.0);

        let c = Color::new(-90.0, 0.5, 0.5);
        assert!(approx_eq(c.hue(), 270.0));
    }

    #[test]
    fn new_replaces_non_finite_with_zero() {
        let c = Color::new(f64::NAN, f64::NAN, f64::INFINITY);
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 0.0);
        assert_eq!(c.lightness(), 1.0);
    }

    #[test]
    fn wrap_hue_never_returns_360() {
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-1e-20), 0.0);
        assert!(wrap_hue(-1e-3) < HUE_RANGE);
    }

    #[test]
    fn hue_index_wraps_rounded_value() {
        assert_eq!(Color::new(359.7, 1.0, 0.5).hue_index(), 0);
        assert_eq!(Color::new(120.4, 1.0, 0.5).hue_index(), 120);
    }

    #[test]
    fn resolved_ignores_sub_pixel_changes() {
        let plane = Dimensions::new(256, 256).unwrap();
        let a = Color::new(10.0, 0.5, 0.5);
        let b = Color::new(10.0, 0.5 + 1e-5, 0.5);
        assert_eq!(a.resolved(plane), b.resolved(plane));

        let c = Color::new(10.0, 129.0 / 256.0, 0.5);
        assert_ne!(a.resolved(plane), c.resolved(plane));
    }

    #[test]
    fn resolved_separates_adjacent_pixels_on_wide_planes() {
        let plane = Dimensions::new(4000, 3000).unwrap();
        let a = Color::new(0.0, 2000.0 / 4000.0, 0.5);
        let b = Color::new(0.0, 2001.0 / 4000.0, 0.5);
        assert_ne!(a.resolved(plane), b.resolved(plane));

        let c = Color::new(0.0, 0.5, 1500.0 / 3000.0);
        let d = Color::new(0.0, 0.5, 1501.0 / 3000.0);
        assert_ne!(c.resolved(plane), d.resolved(plane));
    }

    #[test]
    fn hsl_primary_hues() {
        assert_eq!(Rgb8::from(hsl_to_srgb(0.0, 1.0, 0.5)), Rgb8::new(255, 0, 0));
        assert_eq!(Rgb8::from(hsl_to_srgb(120.0, 1.0, 0.5)), Rgb8::new(0, 255, 0));
        assert_eq!(Rgb8::from(hsl_to_srgb(240.0, 1.0, 0.5)), Rgb8::new(0, 0, 255));
    }

    #[test]
    fn hsl_extremes_of_lightness() {
        for hue in [0.0, 45.0, 200.0, 359.0] {
            assert_eq!(Rgb8::from(hsl_to_srgb(hue, 1.0, 0.0)), Rgb8::new(0, 0, 0));
            assert_eq!(
                Rgb8::from(hsl_to_srgb(hue, 1.0, 1.0)),
                Rgb8::new(255, 255, 255)
            );
        }
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        let c = hsl_to_srgb(77.0, 0.0, 0.25);
        assert!(approx_eq(c.r, 0.25));
        assert!(approx_eq(c.g, 0.25));
        assert!(approx_eq(c.b, 0.25));
    }

    #[test]
    fn hsl_half_saturation_green() {
        let c = hsl_to_srgb(120.0, 0.5, 0.5);
        assert!(approx_eq(c.r, 0.25));
        assert!(approx_eq(c.g, 0.75));
        assert!(approx_eq(c.b, 0.25));
    }

    #[test]
    fn to_hex_quantizes_with_rounding() {
        let c = Srgb {
            r: 1.0,
            g: 0.5,
            b: 0.0,
        };
        assert_eq!(c.to_hex(), "#ff8000");
    }

    #[test]
    fn max_channel_diff_picks_largest() {
        let a = Rgb8::new(10, 20, 30);
        let b = Rgb8::new(12, 15, 31);
        assert_eq!(a.max_channel_diff(b), 5);
    }

    #[test]
    fn deserialized_color_is_normalized() {
        let c: Color =
            serde_json::from_str(r#"{"hue": 400.0, "saturation": 2.0, "lightness": 0.5}"#)
                .unwrap();
        assert!(approx_eq(c.hue(), 40.0));
        assert_eq!(c.saturation(), 1.0);
    }

    #[test]
    fn color_serializes_with_named_fields() {
        let json = serde_json::to_value(Color::default()).unwrap();
        assert_eq!(json["hue"], 0.0);
        assert_eq!(json["saturation"], 1.0);
        assert_eq!(json["lightness"], 0.5);
    }
}
