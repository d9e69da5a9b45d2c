//! Cropzone Core - pan/zoom crop engine
//!
//! This crate turns decoded pan/zoom gestures into a clamped `(scale, pan)`
//! pair and extracts exactly what a fixed-size viewport shows from a raster
//! image. Gesture recognition, decoding and rendering live elsewhere.

pub mod error;
pub mod geometry;
pub mod options;
pub mod raster;
pub mod transform;

pub use error::CropError;
pub use geometry::{Offset, Transform, ViewportSize};
pub use options::CropOptions;
pub use raster::{FilterType, RasterImage};
pub use transform::{Cropper, GestureDelta, TransformState, MAX_SCALE, MIN_SCALE};

/// Crop `image` as seen through `viewport` with the default options.
///
/// Shorthand for `Cropper::default().extract(...)`.
pub fn extract(
    image: &RasterImage,
    viewport: ViewportSize,
    transform: Transform,
) -> Result<RasterImage, CropError> {
    Cropper::default().extract(image, viewport, transform)
}
