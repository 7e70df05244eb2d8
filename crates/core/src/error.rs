//! Error types for the picker core.

use thiserror::Error;

/// Errors produced by renderers, configuration and the export collaborator.
///
/// Pointer mapping and drag handling never produce these: out-of-range pointer
/// input is clamped instead of rejected.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Width or height was zero (or their product overflowed) when creating a
    /// bitmap, a renderer or a picker.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A renderer was asked for a hue outside [0, 360).
    #[error("invalid hue {0}: expected an integer in 0..360")]
    InvalidHue(u16),

    /// A configuration value could not be parsed or validated.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A raw pixel buffer did not match the declared bitmap dimensions.
    #[error("dimension mismatch: expected {expected} pixels for {width}x{height}, got {got}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    /// Persisting a bitmap failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = PickerError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_hue_includes_value() {
        let msg = PickerError::InvalidHue(400).to_string();
        assert!(msg.contains("400"), "missing hue in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let msg = PickerError::InvalidConfig("bad json".into()).to_string();
        assert!(msg.contains("bad json"), "missing message in: {msg}");
    }

    #[test]
    fn dimension_mismatch_includes_all_fields() {
        let err = PickerError::DimensionMismatch {
            width: 12,
            height: 34,
            expected: 408,
            got: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"), "missing width in: {msg}");
        assert!(msg.contains("34"), "missing height in: {msg}");
        assert!(msg.contains("408"), "missing expected in: {msg}");
        assert!(msg.contains('7'), "missing got in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = PickerError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn picker_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PickerError>();
    }

    #[test]
    fn picker_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<PickerError>();
    }
}
