//! Bulk export of every hue plane.
//!
//! [`export_planes`] renders hues 0 through 359 in order and hands each plane
//! to an [`ArtifactSink`] under the name `"{hue}.png"`. Where the artifacts end
//! up (and how writing them can fail) is the sink's business; the first
//! failure aborts the run.

use hsl_picker_core::bitmap::Bitmap;
use hsl_picker_core::error::PickerError;
use hsl_picker_core::plane::{HuePlaneRenderer, HUE_COUNT};
use tracing::{debug, info};

/// Destination for named image artifacts.
pub trait ArtifactSink {
    fn write(&mut self, name: &str, bitmap: &Bitmap) -> Result<(), PickerError>;
}

/// Artifact name for the plane of `hue`.
pub fn plane_artifact_name(hue: u16) -> String {
    format!("{hue}.png")
}

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Artifact names in the order they were written.
    pub written: Vec<String>,
}

/// Renders every hue plane with `renderer` and writes each to `sink`.
///
/// `progress` is called after each successful write with the hue just
/// written.
pub fn export_planes<S, P>(
    renderer: &HuePlaneRenderer,
    sink: &mut S,
    mut progress: P,
) -> Result<ExportReport, PickerError>
where
    S: ArtifactSink + ?Sized,
    P: FnMut(u16),
{
    let dims = renderer.dimensions();
    let mut written = Vec::with_capacity(usize::from(HUE_COUNT));
    for hue in 0..HUE_COUNT {
        let bitmap = renderer.render(hue)?;
        let name = plane_artifact_name(hue);
        sink.write(&name, &bitmap)?;
        debug!(hue, name = %name, "exported plane");
        written.push(name);
        progress(hue);
    }
    info!(
        count = written.len(),
        width = dims.width(),
        height = dims.height(),
        "exported hue planes"
    );
    Ok(ExportReport { written })
}

/// Writes PNG files into a directory, creating it on first use.
#[cfg(feature = "png")]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(feature = "png")]
impl DirectorySink {
    /// Creates `dir` (and parents) if missing.
    ///
    /// Returns `PickerError::Io` if the directory cannot be created.
    pub fn create(dir: impl Into<std::path::PathBuf>) -> Result<Self, PickerError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| PickerError::Io(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(feature = "png")]
impl ArtifactSink for DirectorySink {
    fn write(&mut self, name: &str, bitmap: &Bitmap) -> Result<(), PickerError> {
        crate::snapshot::write_png(bitmap, &self.dir.join(name))
    }
}
