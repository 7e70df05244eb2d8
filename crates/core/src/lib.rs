#![deny(unsafe_code)]
//! Core of the HSL color picker.
//!
//! Provides the `Color`/`Rgb8` value types, `Bitmap`, the saturation/lightness
//! plane renderer (`HuePlaneRenderer`), the hue scale renderer
//! (`HueScaleRenderer`), pointer-to-color mapping, the per-hue `HueCache`, and
//! `ColorPickerState`, which ties them together behind a host-provided
//! `Surface`.

pub mod bitmap;
pub mod cache;
pub mod color;
pub mod config;
pub mod drag;
pub mod error;
pub mod plane;
pub mod pointer;
pub mod scale;
pub mod state;
pub mod surface;

pub use bitmap::{Bitmap, Dimensions};
pub use cache::HueCache;
pub use color::{Color, Rgb8, Srgb};
pub use config::PickerConfig;
pub use drag::{DragInput, DragSession, DragState};
pub use error::PickerError;
pub use plane::{render_plane, HuePlaneRenderer, HUE_COUNT};
pub use pointer::{PlaneSelection, Point};
pub use scale::{render_scale, HueScaleRenderer};
pub use state::{ColorPickerState, PointerEvent, SubscriptionId};
pub use surface::{NullSurface, Surface};
