//! Failures of a `hsl-picker` run and the exit code each one maps to.
//!
//! | code | cause                                            |
//! |------|--------------------------------------------------|
//! | 2    | argument parsing (clap, before `run`)            |
//! | 10   | render request rejected (zero size, hue >= 360)  |
//! | 11   | writing a PNG or the export directory failed     |
//! | 12   | `--config` unreadable or not a valid config      |
//! | 13   | JSON report could not be serialized              |

use std::path::{Path, PathBuf};

use hsl_picker_core::PickerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Render(PickerError),

    #[error("{0}")]
    Write(String),

    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Write(_) => 11,
            CliError::Config { .. } => 12,
            CliError::Report(_) => 13,
        }
    }

    /// A config-file failure. Whether the file could not be read or did not
    /// decode, it exits with the same code.
    pub fn config(path: &Path, reason: impl ToString) -> Self {
        CliError::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl From<PickerError> for CliError {
    fn from(e: PickerError) -> Self {
        match e {
            PickerError::Io(msg) => CliError::Write(msg),
            other => CliError::Render(other),
        }
    }
}
