//! The output sink a picker paints into.
//!
//! A host adapter (canvas, GPU texture, terminal) implements [`Surface`]; the
//! picker core only decides what to show and where the markers go.

use crate::bitmap::Bitmap;
use crate::pointer::Point;

/// Display primitives the picker needs from its host.
pub trait Surface {
    /// Shows `bitmap` as the saturation/lightness plane.
    fn paint_plane(&mut self, bitmap: &Bitmap);

    /// Shows `bitmap` as the hue scale. Called once, at construction.
    fn paint_scale(&mut self, bitmap: &Bitmap);

    /// Moves the plane marker so its top-left corner is at `origin`.
    fn place_plane_marker(&mut self, origin: Point);

    /// Moves the scale indicator so its top edge is at `top`.
    fn place_scale_marker(&mut self, top: f64);
}

/// A surface that discards everything, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn paint_plane(&mut self, _bitmap: &Bitmap) {}
    fn paint_scale(&mut self, _bitmap: &Bitmap) {}
    fn place_plane_marker(&mut self, _origin: Point) {}
    fn place_scale_marker(&mut self, _top: f64) {}
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn paint_plane(&mut self, bitmap: &Bitmap) {
        (**self).paint_plane(bitmap)
    }

    fn paint_scale(&mut self, bitmap: &Bitmap) {
        (**self).paint_scale(bitmap)
    }

    fn place_plane_marker(&mut self, origin: Point) {
        (**self).place_plane_marker(origin)
    }

    fn place_scale_marker(&mut self, top: f64) {
        (**self).place_scale_marker(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        planes: usize,
    }

    impl Surface for Counter {
        fn paint_plane(&mut self, _bitmap: &Bitmap) {
            self.planes += 1;
        }
        fn paint_scale(&mut self, _bitmap: &Bitmap) {}
        fn place_plane_marker(&mut self, _origin: Point) {}
        fn place_scale_marker(&mut self, _top: f64) {}
    }

    #[test]
    fn surface_is_object_safe() {
        let mut boxed: Box<dyn Surface> = Box::new(NullSurface);
        let bmp = Bitmap::filled(1, 1, Default::default()).unwrap();
        boxed.paint_plane(&bmp);
        boxed.place_scale_marker(3.0);
    }

    #[test]
    fn boxed_surface_forwards_calls() {
        let mut boxed = Box::new(Counter::default());
        let bmp = Bitmap::filled(1, 1, Default::default()).unwrap();
        Surface::paint_plane(&mut boxed, &bmp);
        Surface::paint_plane(&mut boxed, &bmp);
        assert_eq!(boxed.planes, 2);
    }
}
