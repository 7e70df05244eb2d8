#![deny(unsafe_code)]
//! WASM bindings for the HSL picker.
//!
//! [`ColorPicker`] owns a [`ColorPickerState`] whose surface blits bitmaps into
//! two `<canvas>` elements. The host page forwards pointer events in
//! canvas-local coordinates and positions its marker elements from the
//! getters after each event.

use std::collections::HashMap;

use hsl_picker_core::{
    Bitmap, ColorPickerState, PickerConfig, PickerError, Point, SubscriptionId, Surface,
};
use hsl_picker_export::bitmap_to_rgba;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

fn to_js(e: PickerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Copies `bitmap` to the top-left of the canvas behind `ctx`.
fn blit(ctx: &CanvasRenderingContext2d, bitmap: &Bitmap) -> Result<(), JsValue> {
    let rgba = bitmap_to_rgba(bitmap);
    let w = u32::try_from(bitmap.width()).map_err(|_| to_js(PickerError::InvalidDimensions))?;
    let h = u32::try_from(bitmap.height()).map_err(|_| to_js(PickerError::InvalidDimensions))?;
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), w, h)?;
    ctx.put_image_data(&image, 0.0, 0.0)
}

/// Paints into the plane and scale canvases. Markers are host DOM elements,
/// so marker placement is read back through the picker getters instead.
struct CanvasSurface {
    plane: CanvasRenderingContext2d,
    scale: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn report(result: Result<(), JsValue>) {
        if let Err(e) = result {
            web_sys::console::error_1(&e);
        }
    }
}

impl Surface for CanvasSurface {
    fn paint_plane(&mut self, bitmap: &Bitmap) {
        Self::report(blit(&self.plane, bitmap));
    }

    fn paint_scale(&mut self, bitmap: &Bitmap) {
        Self::report(blit(&self.scale, bitmap));
    }

    fn place_plane_marker(&mut self, _origin: Point) {}

    fn place_scale_marker(&mut self, _top: f64) {}
}

/// Browser-facing picker.
#[wasm_bindgen]
pub struct ColorPicker {
    state: ColorPickerState<CanvasSurface>,
    subscriptions: HashMap<u32, SubscriptionId>,
    next_handle: u32,
}

impl ColorPicker {
    fn build(
        plane: HtmlCanvasElement,
        scale: HtmlCanvasElement,
        config: PickerConfig,
    ) -> Result<ColorPicker, JsValue> {
        config.validate().map_err(to_js)?;
        let size = |v: usize| u32::try_from(v).map_err(|_| to_js(PickerError::InvalidDimensions));
        plane.set_width(size(config.plane_width)?);
        plane.set_height(size(config.plane_height)?);
        scale.set_width(size(config.scale_width)?);
        scale.set_height(size(config.scale_height)?);

        let surface = CanvasSurface {
            plane: context_2d(&plane)?,
            scale: context_2d(&scale)?,
        };
        let state = ColorPickerState::new(config, surface).map_err(to_js)?;
        Ok(ColorPicker {
            state,
            subscriptions: HashMap::new(),
            next_handle: 0,
        })
    }
}

#[wasm_bindgen]
impl ColorPicker {
    /// Creates a picker with the default 256x256 plane and 19x256 scale,
    /// resizing both canvases to match.
    #[wasm_bindgen(constructor)]
    pub fn new(plane: HtmlCanvasElement, scale: HtmlCanvasElement) -> Result<ColorPicker, JsValue> {
        Self::build(plane, scale, PickerConfig::default())
    }

    /// Like the constructor, with geometry from a JSON config string.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        plane: HtmlCanvasElement,
        scale: HtmlCanvasElement,
        config_json: &str,
    ) -> Result<ColorPicker, JsValue> {
        let config = PickerConfig::from_json_str(config_json).map_err(to_js)?;
        Self::build(plane, scale, config)
    }

    /// Registers `callback(hue, saturation, lightness, hex)`; returns a handle
    /// for [`ColorPicker::off_change`].
    ///
    /// The callback runs inside the pointer method that caused the change,
    /// while the picker is still borrowed. It must not call back into this
    /// picker (getters included); wasm-bindgen rejects that as recursive use.
    /// Read the marker getters after the pointer method has returned.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.state.subscribe(move |c| {
            let args = js_sys::Array::of4(
                &JsValue::from_f64(c.hue()),
                &JsValue::from_f64(c.saturation()),
                &JsValue::from_f64(c.lightness()),
                &JsValue::from_str(&c.to_srgb().to_hex()),
            );
            let result = callback.apply(&JsValue::NULL, &args);
            if let Err(e) = result {
                web_sys::console::error_1(&e);
            }
        });
        let handle = self.next_handle;
        self.next_handle += 1;
        self.subscriptions.insert(handle, id);
        handle
    }

    /// Removes a callback. Returns false for an unknown handle.
    #[wasm_bindgen(js_name = offChange)]
    pub fn off_change(&mut self, handle: u32) -> bool {
        match self.subscriptions.remove(&handle) {
            Some(id) => self.state.unsubscribe(id),
            None => false,
        }
    }

    /// Returns true if the press produced a change notification.
    #[wasm_bindgen(js_name = planePress)]
    pub fn plane_press(&mut self, x: f64, y: f64) -> bool {
        self.state.plane_press(x, y).is_some()
    }

    #[wasm_bindgen(js_name = planeMove)]
    pub fn plane_move(&mut self, x: f64, y: f64) -> bool {
        self.state.plane_move(x, y).is_some()
    }

    #[wasm_bindgen(js_name = planeRelease)]
    pub fn plane_release(&mut self) {
        self.state.plane_release();
    }

    #[wasm_bindgen(js_name = scalePress)]
    pub fn scale_press(&mut self, y: f64) -> bool {
        self.state.scale_press(y).is_some()
    }

    #[wasm_bindgen(js_name = scaleMove)]
    pub fn scale_move(&mut self, y: f64) -> bool {
        self.state.scale_move(y).is_some()
    }

    #[wasm_bindgen(js_name = scaleRelease)]
    pub fn scale_release(&mut self) {
        self.state.scale_release();
    }

    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f64 {
        self.state.color().hue()
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f64 {
        self.state.color().saturation()
    }

    #[wasm_bindgen(getter)]
    pub fn lightness(&self) -> f64 {
        self.state.color().lightness()
    }

    /// Current color as `#rrggbb`.
    #[wasm_bindgen(getter)]
    pub fn hex(&self) -> String {
        self.state.color().to_srgb().to_hex()
    }

    /// Left edge of the plane marker element, in plane pixels.
    #[wasm_bindgen(getter = planeMarkerLeft)]
    pub fn plane_marker_left(&self) -> f64 {
        self.state.plane_marker().x
    }

    /// Top edge of the plane marker element, in plane pixels.
    #[wasm_bindgen(getter = planeMarkerTop)]
    pub fn plane_marker_top(&self) -> f64 {
        self.state.plane_marker().y
    }

    /// Top edge of the scale indicator element, in scale pixels.
    #[wasm_bindgen(getter = scaleMarkerTop)]
    pub fn scale_marker_top(&self) -> f64 {
        self.state.scale_marker()
    }
}
