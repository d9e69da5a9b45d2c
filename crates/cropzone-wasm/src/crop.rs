//! One-shot crop extraction binding.
//!
//! For callers that keep `(scale, pan)` themselves and only need the final
//! raster.

use cropzone_core::{CropError, CropOptions, Cropper, Offset, RasterImage, Transform, ViewportSize};
use wasm_bindgen::prelude::*;

use crate::session::to_js_error;
use crate::types::JsRasterImage;

/// Crop the part of `image` a viewport shows at the given scale and pan.
///
/// # Arguments
///
/// * `image` - Source image
/// * `viewport_width`, `viewport_height` - Viewport size in display pixels
/// * `scale` - Committed zoom factor
/// * `pan_x`, `pan_y` - Committed pan in display pixels
/// * `strict` - Fail when the window leaves the image instead of filling black
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = extract_crop(image, 430, 550, 2.0, 35.0, -12.5, false);
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(cropped.rgba_pixels()), 430, 550), 0, 0);
/// ```
#[wasm_bindgen]
pub fn extract_crop(
    image: &JsRasterImage,
    viewport_width: u32,
    viewport_height: u32,
    scale: f64,
    pan_x: f64,
    pan_y: f64,
    strict: bool,
) -> Result<JsRasterImage, JsValue> {
    extract_raster(
        image.raster(),
        viewport_width,
        viewport_height,
        Transform::new(scale, Offset::new(pan_x, pan_y)),
        strict,
    )
    .map(JsRasterImage::from_raster)
    .map_err(to_js_error)
}

fn extract_raster(
    image: &RasterImage,
    viewport_width: u32,
    viewport_height: u32,
    transform: Transform,
    strict: bool,
) -> Result<RasterImage, CropError> {
    let viewport = ViewportSize::new(viewport_width, viewport_height)?;
    let options = CropOptions {
        strict,
        ..CropOptions::default()
    };
    Cropper::new(options).extract(image, viewport, transform)
}
