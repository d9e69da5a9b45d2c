//! Core raster types.

use image::{ImageBuffer, Rgb};
use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, matches typical live preview rendering).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An RGB raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Bytes needed for an RGB buffer of `width x height`, or `None` if that
    /// does not fit in `usize` on this target.
    pub fn buffer_len(width: u32, height: u32) -> Option<usize> {
        (width as u64)
            .checked_mul(height as u64)?
            .checked_mul(3)
            .and_then(|len| usize::try_from(len).ok())
    }

    /// Create an image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Borrow the pixel buffer as an image crate view without copying.
    ///
    /// Returns `None` if the buffer is shorter than the dimensions require.
    pub fn as_rgb_view(&self) -> Option<ImageBuffer<Rgb<u8>, &[u8]>> {
        ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// Check that the image can be attached to a crop session.
    pub fn validate(&self) -> Result<(), CropError> {
        if self.width == 0 || self.height == 0 {
            return Err(CropError::InvalidImage(format!(
                "image dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = Self::buffer_len(self.width, self.height).ok_or_else(|| {
            CropError::InvalidImage(format!(
                "{}x{} image does not fit in addressable memory",
                self.width, self.height
            ))
        })?;
        if self.pixels.len() != expected {
            return Err(CropError::InvalidImage(format!(
                "pixel buffer holds {} bytes, expected {}",
                self.pixels.len(),
                expected
            )));
        }
        Ok(())
    }

    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.pixels
            .get(idx..idx + 3)
            .map(|p| [p[0], p[1], p[2]])
    }

    /// Expand to RGBA with full opacity, the layout canvas `ImageData` expects.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for chunk in self.pixels.chunks_exact(3) {
            out.extend_from_slice(chunk);
            out.push(255);
        }
        out
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}
