//! The picker itself: current color, two drag sessions, the hue cache and the
//! change subscribers.
//!
//! Every pointer event is handled to completion (map, update, repaint,
//! notify) before the method returns, so notifications come out in event
//! order. The state holds `Rc`s from the cache and boxed `FnMut` callbacks;
//! it is neither `Send` nor `Sync` and lives on the host's UI thread.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::bitmap::{Bitmap, Dimensions};
use crate::cache::HueCache;
use crate::color::{Color, ResolvedColor};
use crate::config::{PickerConfig, SCALE_MARKER_HEIGHT};
use crate::drag::{DragInput, DragSession, DragState};
use crate::error::PickerError;
use crate::plane::{HuePlaneRenderer, HUE_COUNT};
use crate::pointer::{
    clamp_to_plane, color_to_plane_position, hue_to_scale_y, marker_origin, plane_to_color,
    scale_y_to_hue, Point,
};
use crate::scale::HueScaleRenderer;
use crate::surface::Surface;

/// Handle returned by [`ColorPickerState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Color)>;

/// A pointer event already translated into the local coordinates of the
/// surface it targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    PlanePress(Point),
    PlaneMove(Point),
    PlaneRelease,
    /// Vertical position on the scale; the horizontal one is irrelevant.
    ScalePress(f64),
    ScaleMove(f64),
    ScaleRelease,
}

/// HSL picker state bound to an output [`Surface`].
pub struct ColorPickerState<S: Surface> {
    config: PickerConfig,
    plane_dims: Dimensions,
    scale_dims: Dimensions,
    color: Color,
    last_notified: ResolvedColor,
    plane_drag: DragSession,
    scale_drag: DragSession,
    cache: HueCache,
    displayed_hue: u16,
    displayed_plane: Rc<Bitmap>,
    plane_marker: Point,
    scale_marker: f64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    surface: S,
}

impl<S: Surface> ColorPickerState<S> {
    /// Creates a picker with the default color (hue 0, saturation 1,
    /// lightness 0.5), paints the scale and the hue-0 plane, and places both
    /// markers.
    ///
    /// Returns `PickerError::InvalidDimensions` if any configured size is zero.
    pub fn new(config: PickerConfig, mut surface: S) -> Result<Self, PickerError> {
        let plane_dims = config.plane_dimensions()?;
        let scale_dims = config.scale_dimensions()?;
        let color = Color::default();

        let mut cache = HueCache::new(HuePlaneRenderer::from_dimensions(plane_dims));
        let displayed_hue = color.hue_index();
        let displayed_plane = cache.get_or_render(displayed_hue);

        surface.paint_scale(&HueScaleRenderer::from_dimensions(scale_dims).render());
        surface.paint_plane(&displayed_plane);

        let mut state = Self {
            config,
            plane_dims,
            scale_dims,
            color,
            last_notified: color.resolved(plane_dims),
            plane_drag: DragSession::default(),
            scale_drag: DragSession::default(),
            cache,
            displayed_hue,
            displayed_plane,
            plane_marker: Point::new(0.0, 0.0),
            scale_marker: 0.0,
            listeners: Vec::new(),
            next_subscription: 0,
            surface,
        };
        let centre = color_to_plane_position(color.saturation(), color.lightness(), plane_dims);
        state.move_plane_marker(centre);
        state.move_scale_marker(hue_to_scale_y(color.hue(), scale_dims));
        Ok(state)
    }

    /// Snapshot of the current color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn plane_drag_state(&self) -> DragState {
        self.plane_drag.state()
    }

    pub fn scale_drag_state(&self) -> DragState {
        self.scale_drag.state()
    }

    /// Integer hue of the plane currently on display.
    pub fn displayed_hue(&self) -> u16 {
        self.displayed_hue
    }

    pub fn displayed_plane(&self) -> &Rc<Bitmap> {
        &self.displayed_plane
    }

    pub fn cache(&self) -> &HueCache {
        &self.cache
    }

    /// Top-left corner of the plane marker.
    pub fn plane_marker(&self) -> Point {
        self.plane_marker
    }

    /// Top edge of the scale indicator.
    pub fn scale_marker(&self) -> f64 {
        self.scale_marker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Registers a change callback. It receives a copy of the color each time
    /// the resolved color changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(Color) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatches a pointer event. Returns the color that was notified, if
    /// the event produced a notification.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Color> {
        match event {
            PointerEvent::PlanePress(p) => self.plane_input(DragInput::Press, p),
            PointerEvent::PlaneMove(p) => self.plane_input(DragInput::Move, p),
            PointerEvent::PlaneRelease => {
                self.plane_input(DragInput::Release, Point::new(0.0, 0.0))
            }
            PointerEvent::ScalePress(y) => self.scale_input(DragInput::Press, y),
            PointerEvent::ScaleMove(y) => self.scale_input(DragInput::Move, y),
            PointerEvent::ScaleRelease => self.scale_input(DragInput::Release, 0.0),
        }
    }

    pub fn plane_press(&mut self, x: f64, y: f64) -> Option<Color> {
        self.handle(PointerEvent::PlanePress(Point::new(x, y)))
    }

    pub fn plane_move(&mut self, x: f64, y: f64) -> Option<Color> {
        self.handle(PointerEvent::PlaneMove(Point::new(x, y)))
    }

    pub fn plane_release(&mut self) {
        self.handle(PointerEvent::PlaneRelease);
    }

    pub fn scale_press(&mut self, y: f64) -> Option<Color> {
        self.handle(PointerEvent::ScalePress(y))
    }

    pub fn scale_move(&mut self, y: f64) -> Option<Color> {
        self.handle(PointerEvent::ScaleMove(y))
    }

    pub fn scale_release(&mut self) {
        self.handle(PointerEvent::ScaleRelease);
    }

    fn plane_input(&mut self, input: DragInput, position: Point) -> Option<Color> {
        let before = self.plane_drag.state();
        let accepted = self.plane_drag.apply(input);
        if before != self.plane_drag.state() {
            trace!(from = ?before, to = ?self.plane_drag.state(), "plane drag");
        }
        if !accepted {
            return None;
        }

        let selection = plane_to_color(position.x, position.y, self.plane_dims);
        self.color = self
            .color
            .with_saturation_lightness(selection.saturation, selection.lightness);
        self.move_plane_marker(clamp_to_plane(position.x, position.y, self.plane_dims));
        self.notify_if_changed()
    }

    fn scale_input(&mut self, input: DragInput, y: f64) -> Option<Color> {
        let before = self.scale_drag.state();
        let accepted = self.scale_drag.apply(input);
        if before != self.scale_drag.state() {
            trace!(from = ?before, to = ?self.scale_drag.state(), "scale drag");
        }
        if !accepted {
            return None;
        }

        let mapped = scale_y_to_hue(y, self.scale_dims);
        let hue = (mapped.round() as u16) % HUE_COUNT;
        self.move_scale_marker(hue_to_scale_y(mapped, self.scale_dims));
        if hue == self.color.hue_index() {
            return None;
        }
        self.color = self.color.with_hue(f64::from(hue));
        self.show_plane(hue);
        self.notify_if_changed()
    }

    /// Fetches (or renders) the plane for `hue` and paints it.
    fn show_plane(&mut self, hue: u16) {
        if hue == self.displayed_hue {
            return;
        }
        self.displayed_plane = self.cache.get_or_render(hue);
        self.displayed_hue = hue;
        self.surface.paint_plane(&self.displayed_plane);
    }

    fn move_plane_marker(&mut self, centre: Point) {
        let size = self.config.marker_size;
        self.plane_marker = Point::new(
            marker_origin(centre.x, size),
            marker_origin(centre.y, size),
        );
        self.surface.place_plane_marker(self.plane_marker);
    }

    fn move_scale_marker(&mut self, centre: f64) {
        self.scale_marker = marker_origin(centre, SCALE_MARKER_HEIGHT);
        self.surface.place_scale_marker(self.scale_marker);
    }

    fn notify_if_changed(&mut self) -> Option<Color> {
        let resolved = self.color.resolved(self.plane_dims);
        if resolved == self.last_notified {
            return None;
        }
        self.last_notified = resolved;
        let snapshot = self.color;
        trace!(
            hue = snapshot.hue(),
            saturation = snapshot.saturation(),
            lightness = snapshot.lightness(),
            "color changed"
        );
        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }
        Some(snapshot)
    }
}

impl<S: Surface + fmt::Debug> fmt::Debug for ColorPickerState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPickerState")
            .field("color", &self.color)
            .field("plane_drag", &self.plane_drag.state())
            .field("scale_drag", &self.scale_drag.state())
            .field("displayed_hue", &self.displayed_hue)
            .field("cached_hues", &self.cache.len())
            .field("subscribers", &self.listeners.len())
            .field("surface", &self.surface)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::NullSurface;
    use std::cell::RefCell;

    /// Records what the picker asked the host to show.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        plane_paints: usize,
        scale_paints: usize,
        last_plane: Option<Bitmap>,
        plane_marker: Option<Point>,
        scale_marker: Option<f64>,
    }

    impl Surface for RecordingSurface {
        fn paint_plane(&mut self, bitmap: &Bitmap) {
            self.plane_paints += 1;
            self.last_plane = Some(bitmap.clone());
        }
        fn paint_scale(&mut self, _bitmap: &Bitmap) {
            self.scale_paints += 1;
        }
        fn place_plane_marker(&mut self, origin: Point) {
            self.plane_marker = Some(origin);
        }
        fn place_scale_marker(&mut self, top: f64) {
            self.scale_marker = Some(top);
        }
    }

    fn picker() -> ColorPickerState<RecordingSurface> {
        ColorPickerState::new(PickerConfig::default(), RecordingSurface::default()).unwrap()
    }

    fn collect(state: &mut ColorPickerState<RecordingSurface>) -> Rc<RefCell<Vec<Color>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |c| sink.borrow_mut().push(c));
        seen
    }

    #[test]
    fn construction_paints_scale_and_initial_plane() {
        let p = picker();
        assert_eq!(p.color(), Color::default());
        assert_eq!(p.surface().scale_paints, 1);
        assert_eq!(p.surface().plane_paints, 1);
        assert_eq!(p.displayed_hue(), 0);
        assert_eq!(p.cache().len(), 1);
        assert_eq!(p.plane_drag_state(), DragState::Idle);
        assert_eq!(p.scale_drag_state(), DragState::Idle);
    }

    #[test]
    fn construction_places_markers_for_default_color() {
        let p = picker();
        // saturation 1, lightness 0.5 -> centre (256, 128), marker offset 5
        assert_eq!(p.surface().plane_marker, Some(Point::new(251.0, 123.0)));
        // hue 0 sits on the bottom edge of the descending scale
        assert_eq!(p.surface().scale_marker, Some(251.0));
    }

    #[test]
    fn rejects_zero_sized_config() {
        let config = PickerConfig {
            plane_width: 0,
            ..PickerConfig::default()
        };
        let err = ColorPickerState::new(config, NullSurface).unwrap_err();
        assert!(matches!(err, PickerError::InvalidDimensions));
    }

    #[test]
    fn plane_drag_scenario() {
        let mut p = picker();
        let seen = collect(&mut p);

        let c = p.plane_press(0.0, 0.0).expect("press notifies");
        assert_eq!(p.plane_drag_state(), DragState::Dragging);
        assert_eq!(c.saturation(), 0.0);
        assert_eq!(c.lightness(), 1.0);
        assert_eq!(seen.borrow().len(), 1);

        let c = p.plane_move(256.0, 256.0).expect("move notifies");
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.lightness(), 0.0);
        assert_eq!(seen.borrow().len(), 2);

        p.plane_release();
        assert_eq!(p.plane_drag_state(), DragState::Idle);
        assert_eq!(seen.borrow().len(), 2);

        assert!(p.plane_move(10.0, 10.0).is_none());
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(p.color().saturation(), 1.0);
    }

    #[test]
    fn plane_move_without_press_is_ignored() {
        let mut p = picker();
        assert!(p.plane_move(50.0, 50.0).is_none());
        assert_eq!(p.color(), Color::default());
    }

    #[test]
    fn plane_move_to_same_pixel_does_not_renotify() {
        let mut p = picker();
        let seen = collect(&mut p);
        p.plane_press(64.0, 64.0);
        assert!(p.plane_move(64.0, 64.0).is_none());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn one_pixel_move_on_wide_plane_notifies() {
        let config = PickerConfig {
            plane_width: 4000,
            plane_height: 64,
            ..PickerConfig::default()
        };
        let mut p = ColorPickerState::new(config, NullSurface).unwrap();
        p.plane_press(2000.0, 0.0);
        let c = p.plane_move(2001.0, 0.0).expect("adjacent pixel notifies");
        assert_eq!(c, p.color());
        assert_eq!(c.saturation(), 2001.0 / 4000.0);
    }

    #[test]
    fn sub_pixel_jitter_does_not_notify() {
        let mut p = picker();
        p.plane_press(64.0, 64.0);
        assert!(p.plane_move(64.2, 63.9).is_none());
    }

    #[test]
    fn plane_drag_outside_surface_clamps() {
        let mut p = picker();
        p.plane_press(10.0, 10.0);
        let c = p.plane_move(-300.0, 900.0).unwrap();
        assert_eq!(c.saturation(), 0.0);
        assert_eq!(c.lightness(), 0.0);
        assert_eq!(p.plane_marker(), Point::new(-5.0, 251.0));
    }

    #[test]
    fn plane_press_at_default_color_does_not_notify() {
        let mut p = picker();
        // (256, 128) is exactly saturation 1, lightness 0.5
        assert!(p.plane_press(256.0, 128.0).is_none());
        assert_eq!(p.plane_drag_state(), DragState::Dragging);
    }

    #[test]
    fn notifications_are_snapshots() {
        let mut p = picker();
        let seen = collect(&mut p);
        p.plane_press(0.0, 0.0);
        p.plane_move(128.0, 128.0);
        let seen = seen.borrow();
        assert_eq!(seen[0].saturation(), 0.0);
        assert_eq!(seen[1].saturation(), 0.5);
    }

    #[test]
    fn plane_drag_does_not_repaint_plane() {
        let mut p = picker();
        p.plane_press(0.0, 0.0);
        p.plane_move(100.0, 100.0);
        assert_eq!(p.surface().plane_paints, 1);
    }

    #[test]
    fn scale_press_changes_hue_and_repaints() {
        let mut p = picker();
        let seen = collect(&mut p);
        let c = p.scale_press(128.0).expect("hue change notifies");
        assert_eq!(c.hue(), 180.0);
        assert_eq!(p.displayed_hue(), 180);
        assert_eq!(p.surface().plane_paints, 2);
        assert_eq!(seen.borrow().len(), 1);

        let expected = p.cache().renderer().render(180).unwrap();
        assert_eq!(p.surface().last_plane.as_ref(), Some(&expected));
    }

    #[test]
    fn scale_top_wraps_to_hue_zero() {
        let mut p = picker();
        // row 0 maps to 360 which is the same hue as the default 0
        assert!(p.scale_press(0.0).is_none());
        assert_eq!(p.color().hue(), 0.0);
        assert_eq!(p.surface().plane_paints, 1);
        assert_eq!(p.scale_marker(), -5.0);
    }

    #[test]
    fn scale_drag_sweep_regenerates_on_each_integer_change() {
        let mut p = picker();
        let seen = collect(&mut p);
        let dims = Dimensions::new(19, 256).unwrap();

        let mut expected_changes = 0;
        let mut current = 0_u16;
        p.scale_press(0.0);
        for y in 0..=256 {
            let hue = (scale_y_to_hue(f64::from(y), dims).round() as u16) % 360;
            if hue != current {
                expected_changes += 1;
                current = hue;
            }
            p.scale_move(f64::from(y));
        }
        p.scale_release();

        assert_eq!(expected_changes, 256);
        assert_eq!(p.surface().plane_paints, 1 + expected_changes);
        assert_eq!(seen.borrow().len(), expected_changes);
        assert_eq!(p.color().hue(), 0.0);
        assert_eq!(p.scale_drag_state(), DragState::Idle);
    }

    #[test]
    fn revisiting_a_hue_reuses_cached_plane() {
        let mut p = picker();
        p.scale_press(128.0);
        let first = Rc::clone(p.displayed_plane());
        p.scale_move(64.0);
        p.scale_move(128.0);
        assert!(Rc::ptr_eq(&first, p.displayed_plane()));
        assert_eq!(p.cache().len(), 3);
    }

    #[test]
    fn sessions_are_independent() {
        let mut p = picker();
        p.plane_press(0.0, 0.0);
        assert_eq!(p.scale_drag_state(), DragState::Idle);
        assert!(p.scale_move(128.0).is_none());
        assert_eq!(p.color().hue(), 0.0);

        p.scale_press(128.0);
        p.plane_release();
        assert_eq!(p.plane_drag_state(), DragState::Idle);
        assert_eq!(p.scale_drag_state(), DragState::Dragging);
        assert!(p.scale_move(64.0).is_some());
    }

    #[test]
    fn hue_change_keeps_saturation_and_lightness() {
        let mut p = picker();
        p.plane_press(64.0, 192.0);
        p.plane_release();
        let c = p.scale_press(192.0).unwrap();
        assert_eq!(c.hue(), 90.0);
        assert_eq!(c.saturation(), 0.25);
        assert_eq!(c.lightness(), 0.25);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut p = picker();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = p.subscribe(move |_| *sink.borrow_mut() += 1);
        p.plane_press(0.0, 0.0);
        assert!(p.unsubscribe(id));
        assert!(!p.unsubscribe(id));
        p.plane_move(100.0, 100.0);
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(p.subscriber_count(), 0);
    }

    #[test]
    fn notifications_follow_event_order() {
        let mut p = picker();
        let seen = collect(&mut p);
        let events = [
            PointerEvent::PlanePress(Point::new(0.0, 0.0)),
            PointerEvent::ScalePress(128.0),
            PointerEvent::PlaneMove(Point::new(128.0, 0.0)),
            PointerEvent::ScaleMove(64.0),
            PointerEvent::PlaneRelease,
            PointerEvent::ScaleRelease,
        ];
        let returned: Vec<Color> = events.into_iter().filter_map(|e| p.handle(e)).collect();
        assert_eq!(*seen.borrow(), returned);
        let hues: Vec<f64> = returned.iter().map(Color::hue).collect();
        assert_eq!(hues, vec![0.0, 180.0, 180.0, 270.0]);
    }
}
