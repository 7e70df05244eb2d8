//! Fixed-size RGB bitmaps produced by the renderers.
//!
//! A [`Bitmap`] stores `width * height` [`Rgb8`] pixels in row-major layout.
//! Renderers build one with [`Bitmap::from_fn`]; the hue cache shares the
//! finished bitmap behind `Rc`, so rendered output is never mutated.

use crate::color::Rgb8;
use crate::error::PickerError;

/// Validated, non-zero surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// Returns `PickerError::InvalidDimensions` if either side is zero or if
    /// `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        if width == 0 || height == 0 {
            return Err(PickerError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(PickerError::InvalidDimensions)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A row-major RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    dims: Dimensions,
    pixels: Vec<Rgb8>,
}

impl Bitmap {
    /// Builds a bitmap by evaluating `pixel(x, y)` for every coordinate.
    ///
    /// Iteration is index-based over `0..height` and `0..width`, so every row
    /// and column (including the last) is produced exactly once.
    pub fn from_fn<F>(dims: Dimensions, mut pixel: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgb8,
    {
        let mut pixels = Vec::with_capacity(dims.area());
        for y in 0..dims.height {
            for x in 0..dims.width {
                pixels.push(pixel(x, y));
            }
        }
        Self { dims, pixels }
    }

    /// Creates a bitmap of the given size filled with `color`.
    pub fn filled(width: usize, height: usize, color: Rgb8) -> Result<Self, PickerError> {
        let dims = Dimensions::new(width, height)?;
        Ok(Self {
            dims,
            pixels: vec![color; dims.area()],
        })
    }

    /// Creates a bitmap from a pre-built pixel vector, validating that
    /// `pixels.len() == width * height`.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Rgb8>,
    ) -> Result<Self, PickerError> {
        let dims = Dimensions::new(width, height)?;
        if pixels.len() != dims.area() {
            return Err(PickerError::DimensionMismatch {
                width,
                height,
                expected: dims.area(),
                got: pixels.len(),
            });
        }
        Ok(Self { dims, pixels })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb8> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        Some(self.pixels[y * self.dims.width + x])
    }

    /// Read-only access to the row-major pixel data.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb8]> {
        self.pixels.chunks_exact(self.dims.width)
    }

    /// Copies `src` into this bitmap at `(left, top)`, clipping at the edges.
    ///
    /// Used to assemble composite images such as the hue sprite sheet; the
    /// renderers never mutate a bitmap after handing it out.
    pub fn blit(&mut self, src: &Bitmap, left: usize, top: usize) {
        if left >= self.dims.width || top >= self.dims.height {
            return;
        }
        let cols = src.width().min(self.dims.width - left);
        let rows = src.height().min(self.dims.height - top);
        for (row, src_row) in src.rows().take(rows).enumerate() {
            let start = (top + row) * self.dims.width + left;
            self.pixels[start..start + cols].copy_from_slice(&src_row[..cols]);
        }
    }
}
