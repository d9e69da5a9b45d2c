//! Interactive crop session bindings.
//!
//! Wraps a core `TransformState` together with the extraction options so a
//! browser UI can feed decoded gesture steps in and pull the cropped image
//! out when the user commits.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new CropSession(image.width, image.height, 430, 550);
//!
//! // From the gesture handler
//! session.apply(event.panX, event.panY, event.zoom);
//! renderPreview(session.scale, session.pan_x, session.pan_y);
//!
//! // On commit
//! const cropped = session.crop(image);
//! ```

use cropzone_core::geometry::visible_source_rect;
use cropzone_core::{
    CropError, CropOptions, Cropper, GestureDelta, Offset, RasterImage, Transform,
    TransformState, ViewportSize,
};
use wasm_bindgen::prelude::*;

use crate::types::JsRasterImage;

pub(crate) fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A pan/zoom crop session for one image and a fixed viewport.
#[wasm_bindgen]
pub struct CropSession {
    state: TransformState,
    options: CropOptions,
}

#[wasm_bindgen]
impl CropSession {
    /// Start a session at scale 1.0 with the image centered.
    ///
    /// # Errors
    ///
    /// Fails if any image or viewport dimension is zero.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: u32,
        image_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<CropSession, JsValue> {
        Self::create(image_width, image_height, viewport_width, viewport_height)
            .map_err(to_js_error)
    }

    /// Apply one gesture step (pan delta in display pixels, multiplicative zoom).
    ///
    /// On error the session is unchanged.
    pub fn apply(&mut self, pan_x: f64, pan_y: f64, zoom: f64) -> Result<(), JsValue> {
        self.apply_gesture(pan_x, pan_y, zoom)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Return to scale 1.0 with the image centered.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Current scale
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    /// Current horizontal pan
    #[wasm_bindgen(getter)]
    pub fn pan_x(&self) -> f64 {
        self.state.pan().x
    }

    /// Current vertical pan
    #[wasm_bindgen(getter)]
    pub fn pan_y(&self) -> f64 {
        self.state.pan().y
    }

    /// Whether `crop` fails instead of filling uncovered area
    #[wasm_bindgen(getter)]
    pub fn strict(&self) -> bool {
        self.options.strict
    }

    /// Toggle strict bounds checking for `crop`
    #[wasm_bindgen(setter)]
    pub fn set_strict(&mut self, value: bool) {
        self.options.strict = value;
    }

    /// Visible part of the source image as `[x, y, width, height]`.
    pub fn visible_rect(&self) -> Vec<f64> {
        let (w, h) = self.state.image_dimensions();
        let rect = visible_source_rect(w, h, self.state.viewport(), self.state.snapshot());
        vec![rect.x, rect.y, rect.width, rect.height]
    }

    /// Crop `image` with the current scale and pan.
    pub fn crop(&self, image: &JsRasterImage) -> Result<JsRasterImage, JsValue> {
        self.crop_raster(image.raster())
            .map(JsRasterImage::from_raster)
            .map_err(to_js_error)
    }

    /// Serialize the extraction options to a plain object
    pub fn options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.options).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the extraction options from a plain object; missing fields take defaults
    pub fn set_options(&mut self, value: JsValue) -> Result<(), JsValue> {
        self.options =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }
}

impl CropSession {
    fn create(
        image_width: u32,
        image_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<Self, CropError> {
        let viewport = ViewportSize::new(viewport_width, viewport_height)?;
        Ok(Self {
            state: TransformState::new(image_width, image_height, viewport)?,
            options: CropOptions::default(),
        })
    }

    fn apply_gesture(&mut self, pan_x: f64, pan_y: f64, zoom: f64) -> Result<Transform, CropError> {
        self.state.apply(GestureDelta::new(Offset::new(pan_x, pan_y), zoom))
    }

    fn crop_raster(&self, image: &RasterImage) -> Result<RasterImage, CropError> {
        Cropper::new(self.options.clone()).extract(
            image,
            self.state.viewport(),
            self.state.snapshot(),
        )
    }
}
