//! Crop extraction settings.

use serde::{Deserialize, Serialize};

use crate::raster::FilterType;

/// Default ceiling for the resampled image: 16384 x 16384 pixels.
pub const DEFAULT_MAX_SCALED_PIXELS: u64 = 16_384 * 16_384;

/// Settings for [`Cropper`](crate::Cropper).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Resampling filter used when scaling the source image.
    pub filter: FilterType,
    /// RGB color written where the crop window leaves the scaled image.
    pub background: [u8; 3],
    /// Fail with `OutOfBoundsCrop` instead of filling with `background`.
    pub strict: bool,
    /// Largest scaled image (in pixels) the cropper will allocate.
    pub max_scaled_pixels: u64,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::Bilinear,
            background: [0, 0, 0],
            strict: false,
            max_scaled_pixels: DEFAULT_MAX_SCALED_PIXELS,
        }
    }
}

impl CropOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same options with strict bounds checking enabled.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
