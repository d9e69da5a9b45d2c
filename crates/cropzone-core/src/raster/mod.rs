//! Raster images and resampling.
//!
//! Images are plain RGB buffers (3 bytes per pixel, row-major). Decoding and
//! encoding happen outside this crate; callers hand in already decoded
//! pixels and receive the cropped pixels back.

mod resize;
mod types;

pub use resize::{resize, scale_image};
pub use types::{FilterType, RasterImage};
