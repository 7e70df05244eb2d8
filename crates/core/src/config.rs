//! Picker geometry configuration.
//!
//! [`PickerConfig`] carries the surface sizes the widget is laid out with.
//! It can be deserialized strictly through serde or built leniently from a
//! JSON object with [`PickerConfig::from_json`], where missing or mistyped keys
//! fall back to the defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bitmap::Dimensions;
use crate::error::PickerError;
use crate::scale::DEFAULT_SCALE_WIDTH;

/// Default side length of the saturation/lightness plane.
pub const DEFAULT_PLANE_SIZE: usize = 256;

/// Default diameter of the plane selection marker.
pub const DEFAULT_MARKER_SIZE: usize = 11;

/// Height of the scale selection indicator.
pub const SCALE_MARKER_HEIGHT: usize = 10;

/// Surface sizes for one picker instance, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub plane_width: usize,
    pub plane_height: usize,
    pub scale_width: usize,
    pub scale_height: usize,
    pub marker_size: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            plane_width: DEFAULT_PLANE_SIZE,
            plane_height: DEFAULT_PLANE_SIZE,
            scale_width: DEFAULT_SCALE_WIDTH,
            scale_height: DEFAULT_PLANE_SIZE,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

impl PickerConfig {
    /// Builds a config from a JSON object, never failing.
    ///
    /// Each key must be a non-negative integer; anything else (missing, null,
    /// string, negative) keeps the default. Zero values survive here and are
    /// rejected by [`PickerConfig::validate`].
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            plane_width: param_usize(params, "plane_width", d.plane_width),
            plane_height: param_usize(params, "plane_height", d.plane_height),
            scale_width: param_usize(params, "scale_width", d.scale_width),
            scale_height: param_usize(params, "scale_height", d.scale_height),
            marker_size: param_usize(params, "marker_size", d.marker_size),
        }
    }

    /// Parses a JSON document leniently (see [`PickerConfig::from_json`]).
    ///
    /// Returns `PickerError::InvalidConfig` only if `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self, PickerError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| PickerError::InvalidConfig(format!("invalid JSON: {e}")))?;
        Ok(Self::from_json(&value))
    }

    /// Checks that every surface dimension is non-zero.
    pub fn validate(&self) -> Result<(), PickerError> {
        self.plane_dimensions()?;
        self.scale_dimensions()?;
        Ok(())
    }

    pub fn plane_dimensions(&self) -> Result<Dimensions, PickerError> {
        Dimensions::new(self.plane_width, self.plane_height)
    }

    pub fn scale_dimensions(&self) -> Result<Dimensions, PickerError> {
        Dimensions::new(self.scale_width, self.scale_height)
    }
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_original_layout() {
        let c = PickerConfig::default();
        assert_eq!((c.plane_width, c.plane_height), (256, 256));
        assert_eq!((c.scale_width, c.scale_height), (19, 256));
        assert_eq!(c.marker_size, 11);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_reads_present_keys() {
        let c = PickerConfig::from_json(&json!({"plane_width": 128, "scale_height": 300}));
        assert_eq!(c.plane_width, 128);
        assert_eq!(c.plane_height, 256);
        assert_eq!(c.scale_height, 300);
    }

    #[test]
    fn from_json_ignores_wrong_types() {
        let c = PickerConfig::from_json(&json!({
            "plane_width": "wide",
            "plane_height": -4,
            "scale_width": 2.5,
            "marker_size": null,
        }));
        assert_eq!(c, PickerConfig::default());
    }

    #[test]
    fn from_json_on_non_object_is_default() {
        assert_eq!(PickerConfig::from_json(&json!([1, 2])), PickerConfig::default());
    }

    #[test]
    fn from_json_str_rejects_malformed_text() {
        let err = PickerConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, PickerError::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        let c = PickerConfig::from_json(&json!({"scale_height": 0}));
        assert!(matches!(c.validate(), Err(PickerError::InvalidDimensions)));
        let c = PickerConfig::from_json(&json!({"plane_width": 0}));
        assert!(matches!(c.validate(), Err(PickerError::InvalidDimensions)));
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let c: PickerConfig = serde_json::from_str(r#"{"plane_width": 64}"#).unwrap();
        assert_eq!(c.plane_width, 64);
        assert_eq!(c.scale_width, 19);
    }
}
