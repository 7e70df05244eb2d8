#![deny(unsafe_code)]
//! Export collaborator for the HSL picker: turns rendered bitmaps into
//! persisted image artifacts.
//!
//! The core crate never performs I/O. This crate converts bitmaps to RGBA
//! buffers (always available, shared with the WASM adapter), encodes PNGs
//! behind the `png` feature, and drives the 360-plane bulk export and the
//! single-image hue sheet.

pub mod export;
pub mod pixel;
pub mod sheet;

#[cfg(feature = "png")]
pub mod snapshot;

pub use export::{export_planes, plane_artifact_name, ArtifactSink, ExportReport};
pub use pixel::bitmap_to_rgba;
pub use sheet::{build_hue_sheet, sheet_tile_offset, SHEET_ARTIFACT_NAME};

#[cfg(feature = "png")]
pub use export::DirectorySink;
