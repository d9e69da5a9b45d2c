//! Viewport crop extraction.
//!
//! Reproduces what the viewport shows for a committed `(scale, pan)`:
//!
//! 1. Resample the source by `scale` (dimensions rounded per axis).
//! 2. Center the viewport on the scaled image and displace it by `pan`.
//! 3. Copy the viewport-sized window out of the scaled image.
//!
//! A transform produced by [`TransformState`](super::TransformState) keeps the
//! window inside the scaled image. Values supplied from elsewhere may not; the
//! window is then clipped and the uncovered part filled with the configured
//! background, or rejected when strict mode is on.
//!
//! # Example
//!
//! ```ignore
//! let cropper = Cropper::default();
//! let cropped = cropper.extract(&image, state.viewport(), state.snapshot())?;
//! assert_eq!(cropped.width, state.viewport().width);
//! ```

use log::debug;

use crate::error::CropError;
use crate::geometry::{crop_origin, Transform, ViewportSize};
use crate::options::CropOptions;
use crate::raster::{scale_image, RasterImage};

/// Turns a committed transform into a cropped raster.
///
/// Holds only immutable options, so one instance can be shared across
/// worker threads.
#[derive(Debug, Clone, Default)]
pub struct Cropper {
    options: CropOptions,
}

impl Cropper {
    pub fn new(options: CropOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    /// Extract the viewport window for `transform`.
    ///
    /// # Returns
    ///
    /// A new `RasterImage` with exactly the viewport's dimensions.
    ///
    /// # Errors
    ///
    /// - `InvalidImage` if the image is empty or its buffer is malformed
    /// - `InvalidGestureInput` if the transform is non-finite or non-positive
    /// - `ResourceExhausted` if the scaled image or the output exceeds the
    ///   pixel ceiling
    /// - `OutOfBoundsCrop` in strict mode when the window leaves the image
    pub fn extract(
        &self,
        image: &RasterImage,
        viewport: ViewportSize,
        transform: Transform,
    ) -> Result<RasterImage, CropError> {
        image.validate()?;
        transform.validate()?;

        let output_pixels = viewport.width as u64 * viewport.height as u64;
        if output_pixels > self.options.max_scaled_pixels
            || RasterImage::buffer_len(viewport.width, viewport.height).is_none()
        {
            return Err(CropError::ResourceExhausted {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let scaled = scale_image(
            image,
            transform.scale,
            self.options.filter,
            self.options.max_scaled_pixels,
        )?;
        let (x, y) = crop_origin(scaled.width, scaled.height, viewport, transform.pan);

        let inside = x >= 0
            && y >= 0
            && x + viewport.width as i64 <= scaled.width as i64
            && y + viewport.height as i64 <= scaled.height as i64;

        if !inside {
            if self.options.strict {
                return Err(CropError::OutOfBoundsCrop {
                    x,
                    y,
                    width: viewport.width,
                    height: viewport.height,
                    scaled_width: scaled.width,
                    scaled_height: scaled.height,
                });
            }
            debug!(
                "crop window {}x{} at ({}, {}) overhangs {}x{} scaled image, filling background",
                viewport.width, viewport.height, x, y, scaled.width, scaled.height
            );
        }

        Ok(copy_window(&scaled, x, y, viewport, self.options.background))
    }
}

/// Copy `[x, x + w) x [y, y + h)` out of `source`, filling whatever falls
/// outside it with `background`.
fn copy_window(
    source: &RasterImage,
    x: i64,
    y: i64,
    viewport: ViewportSize,
    background: [u8; 3],
) -> RasterImage {
    let out_w = viewport.width as i64;
    let out_h = viewport.height as i64;
    let mut output = RasterImage::filled(viewport.width, viewport.height, background);

    // Intersection of the window with the source, in window coordinates
    let col_start = (-x).clamp(0, out_w);
    let col_end = (source.width as i64 - x).clamp(col_start, out_w);
    let row_start = (-y).clamp(0, out_h);
    let row_end = (source.height as i64 - y).clamp(row_start, out_h);

    if col_start == col_end {
        return output;
    }

    let span = ((col_end - col_start) * 3) as usize;
    // Copy pixel data row by row for efficiency
    for row in row_start..row_end {
        let src_y = (y + row) as usize;
        let src_x = (x + col_start) as usize;
        let src_idx = (src_y * source.width as usize + src_x) * 3;
        let dst_idx = (row as usize * viewport.width as usize + col_start as usize) * 3;

        output.pixels[dst_idx..dst_idx + span]
            .copy_from_slice(&source.pixels[src_idx..src_idx + span]);
    }

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{pan_bounds, Offset};
    use crate::transform::{GestureDelta, TransformState, MAX_SCALE, MIN_SCALE};
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v.wrapping_mul(3));
                pixels.push(v.wrapping_add(17));
            }
        }
        RasterImage::new(width, height, pixels)
    }

    /// Small image at least as large as the viewport.
    fn session_strategy() -> impl Strategy<Value = (u32, u32, u32, u32)> {
        (4u32..=16, 4u32..=16)
            .prop_flat_map(|(vw, vh)| (vw..=vw * 3, vh..=vh * 3, Just(vw), Just(vh)))
    }

    /// In-contract transform: scale within limits and pan within its bounds.
    fn transform_in_bounds(
        iw: u32,
        ih: u32,
        vp: ViewportSize,
    ) -> impl Strategy<Value = Transform> {
        (MIN_SCALE..=3.0f64, -1.0f64..=1.0, -1.0f64..=1.0).prop_map(move |(scale, fx, fy)| {
            let bounds = pan_bounds(iw, ih, vp, scale);
            Transform::new(scale, Offset::new(fx * bounds.max_x, fy * bounds.max_y))
        })
    }

    proptest! {
        /// Property: output always has the viewport's dimensions.
        #[test]
        fn prop_output_matches_viewport(
            (iw, ih, vw, vh) in session_strategy(),
            scale in 0.2f64..=3.0,
            (px, py) in (-50.0f64..=50.0, -50.0f64..=50.0),
        ) {
            let img = create_test_image(iw, ih);
            let vp = ViewportSize::new(vw, vh).unwrap();
            let result = Cropper::default()
                .extract(&img, vp, Transform::new(scale, Offset::new(px, py)))
                .unwrap();

            prop_assert_eq!(result.width, vw);
            prop_assert_eq!(result.height, vh);
            prop_assert_eq!(result.pixels.len(), (vw * vh * 3) as usize);
        }

        /// Property: extraction is deterministic.
        #[test]
        fn prop_extract_is_deterministic(
            (iw, ih, vw, vh) in session_strategy(),
            scale in MIN_SCALE..=3.0,
            (px, py) in (-20.0f64..=20.0, -20.0f64..=20.0),
        ) {
            let img = create_test_image(iw, ih);
            let vp = ViewportSize::new(vw, vh).unwrap();
            let t = Transform::new(scale, Offset::new(px, py));
            let cropper = Cropper::default();

            let first = cropper.extract(&img, vp, t).unwrap();
            let second = cropper.extract(&img, vp, t).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: in-contract transforms never overhang, so strict mode accepts them.
        #[test]
        fn prop_in_contract_transform_passes_strict(
            ((iw, ih, vw, vh), t) in session_strategy().prop_flat_map(|(iw, ih, vw, vh)| {
                let vp = ViewportSize::new(vw, vh).unwrap();
                (Just((iw, ih, vw, vh)), transform_in_bounds(iw, ih, vp))
            }),
        ) {
            let img = create_test_image(iw, ih);
            let vp = ViewportSize::new(vw, vh).unwrap();
            let result = Cropper::new(CropOptions::new().strict()).extract(&img, vp, t);
            prop_assert!(result.is_ok(), "{:?} rejected: {:?}", t, result.err());
        }

        /// Property: any gesture sequence yields a snapshot strict extraction accepts.
        #[test]
        fn prop_gesture_snapshots_pass_strict(
            (iw, ih, vw, vh) in session_strategy(),
            gestures in prop::collection::vec(
                (-30.0f64..=30.0, -30.0f64..=30.0, 0.5f64..=2.0),
                1..12,
            ),
        ) {
            let img = create_test_image(iw, ih);
            let vp = ViewportSize::new(vw, vh).unwrap();
            let mut state = TransformState::for_image(&img, vp).unwrap();
            for (dx, dy, zoom) in gestures {
                state.apply(GestureDelta::new(Offset::new(dx, dy), zoom)).unwrap();
            }
            prop_assert!(state.scale() <= MAX_SCALE);

            let result = Cropper::new(CropOptions::new().strict())
                .extract(&img, vp, state.snapshot());
            prop_assert!(result.is_ok(), "{:?} rejected: {:?}", state.snapshot(), result.err());
        }
    }
}
