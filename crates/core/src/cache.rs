//! Lazily populated per-hue plane cache.
//!
//! One slot per integer hue (360 in total). A slot is filled the first time
//! its hue is requested and is never evicted or replaced, so memory is
//! bounded by 360 planes of the cache's fixed size.
//!
//! Entries are handed out as `Rc<Bitmap>`. The cache is therefore `!Send`
//! and stays on the thread that owns the picker.

use std::rc::Rc;

use tracing::debug;

use crate::bitmap::Bitmap;
use crate::plane::{HuePlaneRenderer, HUE_COUNT};

/// Fixed-size hue → plane bitmap memo.
#[derive(Debug)]
pub struct HueCache {
    renderer: HuePlaneRenderer,
    slots: Vec<Option<Rc<Bitmap>>>,
}

impl HueCache {
    pub fn new(renderer: HuePlaneRenderer) -> Self {
        Self {
            renderer,
            slots: vec![None; usize::from(HUE_COUNT)],
        }
    }

    pub fn renderer(&self) -> &HuePlaneRenderer {
        &self.renderer
    }

    /// Returns the plane for `hue` (wrapped modulo 360), rendering it on the
    /// first request.
    pub fn get_or_render(&mut self, hue: u16) -> Rc<Bitmap> {
        let hue = hue % HUE_COUNT;
        let slot = &mut self.slots[usize::from(hue)];
        if let Some(bitmap) = slot.as_ref() {
            return Rc::clone(bitmap);
        }
        let dims = self.renderer.dimensions();
        debug!(
            hue,
            width = dims.width(),
            height = dims.height(),
            "rendering hue plane"
        );
        let bitmap = Rc::new(self.renderer.rasterize(hue));
        *slot = Some(Rc::clone(&bitmap));
        bitmap
    }

    /// The cached plane for `hue` (wrapped), if it has been rendered.
    pub fn get(&self, hue: u16) -> Option<Rc<Bitmap>> {
        self.slots[usize::from(hue % HUE_COUNT)].clone()
    }

    pub fn contains(&self, hue: u16) -> bool {
        self.slots[usize::from(hue % HUE_COUNT)].is_some()
    }

    /// Number of hues rendered so far.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> HueCache {
        HueCache::new(HuePlaneRenderer::new(16, 8).unwrap())
    }

    #[test]
    fn starts_empty() {
        let c = cache();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.get(0).is_none());
    }

    #[test]
    fn second_request_returns_same_instance() {
        let mut c = cache();
        let first = c.get_or_render(42);
        let second = c.get_or_render(42);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn cached_plane_matches_fresh_render() {
        let mut c = cache();
        let cached = c.get_or_render(300);
        let fresh = c.renderer().render(300).unwrap();
        assert_eq!(*cached, fresh);
    }

    #[test]
    fn hue_wraps_modulo_360() {
        let mut c = cache();
        let a = c.get_or_render(360);
        let b = c.get_or_render(0);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(c.contains(720));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn distinct_hues_get_distinct_slots() {
        let mut c = cache();
        c.get_or_render(1);
        c.get_or_render(2);
        c.get_or_render(1);
        assert_eq!(c.len(), 2);
        assert!(c.contains(1) && c.contains(2) && !c.contains(3));
    }

    #[test]
    fn can_fill_every_slot() {
        let mut c = HueCache::new(HuePlaneRenderer::new(2, 2).unwrap());
        for hue in 0..HUE_COUNT {
            c.get_or_render(hue);
        }
        assert_eq!(c.len(), 360);
    }
}
