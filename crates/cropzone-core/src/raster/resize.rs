//! Resampling for crop extraction.
//!
//! Uses the `image` crate's separable filters. All functions return new
//! `RasterImage` instances without modifying the input.

use super::{FilterType, RasterImage};
use crate::error::CropError;
use crate::geometry::scaled_dimensions;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `CropError::InvalidImage` if a target dimension is zero or the
/// source buffer does not match its dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, CropError> {
    if width == 0 || height == 0 {
        return Err(CropError::InvalidImage(format!(
            "resize target must be non-zero, got {}x{}",
            width, height
        )));
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgb_view().ok_or_else(|| {
        CropError::InvalidImage("pixel buffer is shorter than its dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

/// Resample an image uniformly by `scale`.
///
/// Output dimensions come from [`scaled_dimensions`], the same rounding the
/// preview uses.
///
/// # Errors
///
/// Returns `CropError::ResourceExhausted` when the output would have more
/// than `max_pixels` pixels. The check happens before any allocation.
pub fn scale_image(
    image: &RasterImage,
    scale: f64,
    filter: FilterType,
    max_pixels: u64,
) -> Result<RasterImage, CropError> {
    let (width, height) = scaled_dimensions(image.width, image.height, scale);
    if width as u64 * height as u64 > max_pixels {
        return Err(CropError::ResourceExhausted { width, height });
    }
    log::debug!(
        "resampling {}x{} -> {}x{} ({:?})",
        image.width,
        image.height,
        width,
        height,
        filter
    );
    resize(image, width, height, filter)
}
