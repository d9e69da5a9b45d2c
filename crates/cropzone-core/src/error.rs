//! Error types for the crop engine.

use thiserror::Error;

/// Errors produced by gesture handling and crop extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// A gesture or transform carried a non-positive zoom or a non-finite value.
    #[error("Invalid gesture input: {0}")]
    InvalidGestureInput(String),

    /// The image has a zero dimension or a pixel buffer that does not match it.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The viewport has a zero dimension.
    #[error("Invalid viewport size {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Strict extraction found the crop window outside the scaled image.
    #[error(
        "Crop window {width}x{height} at ({x}, {y}) lies outside the {scaled_width}x{scaled_height} scaled image"
    )]
    OutOfBoundsCrop {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        scaled_width: u32,
        scaled_height: u32,
    },

    /// The resampled image would exceed the configured pixel ceiling.
    #[error("Scaled image {width}x{height} exceeds the resampling memory ceiling")]
    ResourceExhausted { width: u32, height: u32 },
}
