//! Pan/zoom accumulator for the crop viewport.
//!
//! `TransformState` owns the current `(scale, pan)` pair for one crop session
//! and folds gesture deltas into it. Every update keeps the viewport inside
//! the scaled image: scale is clamped to `[MIN_SCALE, MAX_SCALE]` first and
//! pan is then clamped against bounds computed from the *new* scale, so a
//! combined pinch and drag never exposes area outside the image.
//!
//! # Example
//!
//! ```ignore
//! let viewport = ViewportSize::new(200, 200)?;
//! let mut state = TransformState::new(1000, 1000, viewport)?;
//! state.apply(GestureDelta::zoom(2.0))?;
//! let committed = state.apply(GestureDelta::pan(50.0, 0.0))?;
//! assert_eq!(committed.pan.x, 50.0);
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{pan_bounds, Offset, PanBounds, Transform, ViewportSize};
use crate::raster::RasterImage;

/// Smallest allowed scale: the image is never shown below its fill size.
pub const MIN_SCALE: f64 = 1.0;

/// Largest allowed scale.
pub const MAX_SCALE: f64 = 10.0;

/// One decoded gesture step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureDelta {
    /// Drag distance in display pixels.
    pub pan: Offset,
    /// Multiplicative zoom for this step (1.0 = unchanged).
    pub zoom: f64,
}

impl Default for GestureDelta {
    fn default() -> Self {
        Self {
            pan: Offset::ZERO,
            zoom: 1.0,
        }
    }
}

impl GestureDelta {
    pub fn new(pan: Offset, zoom: f64) -> Self {
        Self { pan, zoom }
    }

    /// A pure drag.
    pub fn pan(dx: f64, dy: f64) -> Self {
        Self::new(Offset::new(dx, dy), 1.0)
    }

    /// A pure pinch.
    pub fn zoom(factor: f64) -> Self {
        Self::new(Offset::ZERO, factor)
    }

    fn validate(&self) -> Result<(), CropError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(CropError::InvalidGestureInput(format!(
                "zoom factor must be finite and positive, got {}",
                self.zoom
            )));
        }
        if !self.pan.is_finite() {
            return Err(CropError::InvalidGestureInput(format!(
                "pan delta must be finite, got ({}, {})",
                self.pan.x, self.pan.y
            )));
        }
        Ok(())
    }
}

/// Current scale and pan of an image behind a fixed viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    image_width: u32,
    image_height: u32,
    viewport: ViewportSize,
    scale: f64,
    pan: Offset,
}

impl TransformState {
    /// Start a session at scale 1.0 with the image centered.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidImage` if either image dimension is zero.
    pub fn new(
        image_width: u32,
        image_height: u32,
        viewport: ViewportSize,
    ) -> Result<Self, CropError> {
        if image_width == 0 || image_height == 0 {
            return Err(CropError::InvalidImage(format!(
                "image dimensions must be non-zero, got {}x{}",
                image_width, image_height
            )));
        }
        let mut state = Self {
            image_width,
            image_height,
            viewport,
            scale: MIN_SCALE,
            pan: Offset::ZERO,
        };
        if state.pan_bounds().is_degenerate() {
            debug!(
                "image {}x{} does not cover viewport {}x{} at scale {}",
                image_width, image_height, viewport.width, viewport.height, MIN_SCALE
            );
        }
        state.pan = state.pan_bounds().clamp(state.pan);
        Ok(state)
    }

    /// Start a session for a decoded image, validating its pixel buffer.
    pub fn for_image(image: &RasterImage, viewport: ViewportSize) -> Result<Self, CropError> {
        image.validate()?;
        Self::new(image.width, image.height, viewport)
    }

    /// Fold one gesture step into the state.
    ///
    /// Returns the updated snapshot. On error the state is left untouched.
    pub fn apply(&mut self, delta: GestureDelta) -> Result<Transform, CropError> {
        delta.validate()?;

        let requested_scale = self.scale * delta.zoom;
        let scale = requested_scale.clamp(MIN_SCALE, MAX_SCALE);
        if scale != requested_scale {
            debug!("scale {} clamped to {}", requested_scale, scale);
        }

        let requested_pan = self.pan + delta.pan;
        let pan = self.bounds_at(scale).clamp(requested_pan);
        if pan != requested_pan {
            debug!(
                "pan ({}, {}) clamped to ({}, {}) at scale {}",
                requested_pan.x, requested_pan.y, pan.x, pan.y, scale
            );
        }

        self.scale = scale;
        self.pan = pan;
        trace!(
            "gesture pan=({}, {}) zoom={} -> scale={} pan=({}, {})",
            delta.pan.x,
            delta.pan.y,
            delta.zoom,
            self.scale,
            self.pan.x,
            self.pan.y
        );
        Ok(self.snapshot())
    }

    /// Replace the state with an externally supplied pair, clamped by the
    /// same policy as [`apply`](Self::apply).
    pub fn set_transform(&mut self, transform: Transform) -> Result<Transform, CropError> {
        transform.validate()?;
        let scale = transform.scale.clamp(MIN_SCALE, MAX_SCALE);
        self.pan = self.bounds_at(scale).clamp(transform.pan);
        self.scale = scale;
        Ok(self.snapshot())
    }

    /// Return to scale 1.0 with the image centered.
    pub fn reset(&mut self) -> Transform {
        self.scale = MIN_SCALE;
        self.pan = Offset::ZERO;
        self.snapshot()
    }

    /// Copy of the current `(scale, pan)`, suitable for handing to a worker.
    pub fn snapshot(&self) -> Transform {
        Transform::new(self.scale, self.pan)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Offset {
        self.pan
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn image_dimensions(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Pan limits at the current scale.
    pub fn pan_bounds(&self) -> PanBounds {
        self.bounds_at(self.scale)
    }

    fn bounds_at(&self, scale: f64) -> PanBounds {
        pan_bounds(self.image_width, self.image_height, self.viewport, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TransformState {
        TransformState::new(1000, 1000, ViewportSize::new(200, 200).unwrap()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = session();
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.pan(), Offset::ZERO);
        assert_eq!(state.snapshot(), Transform::IDENTITY);
        assert_eq!(state.image_dimensions(), (1000, 1000));
    }

    #[test]
    fn test_rejects_empty_image() {
        let vp = ViewportSize::new(200, 200).unwrap();
        assert!(matches!(
            TransformState::new(0, 100, vp),
            Err(CropError::InvalidImage(_))
        ));
        assert!(matches!(
            TransformState::for_image(&RasterImage::new(0, 0, vec![]), vp),
            Err(CropError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_identity_gesture_is_noop() {
        let mut state = session();
        state.apply(GestureDelta::new(Offset::new(30.0, -20.0), 1.7)).unwrap();
        let before = state.snapshot();

        let after = state.apply(GestureDelta::default()).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_pan_within_bounds_at_double_scale() {
        let mut state = session();
        state.apply(GestureDelta::zoom(2.0)).unwrap();

        let t = state.apply(GestureDelta::pan(50.0, 0.0)).unwrap();
        assert_eq!(state.pan_bounds().max_x, 900.0);
        assert_eq!(t.pan.x, 50.0);
        assert_eq!(t.pan.y, 0.0);
    }

    #[test]
    fn test_pan_clamps_to_max() {
        let mut state = session();
        let t = state.apply(GestureDelta::pan(5000.0, -5000.0)).unwrap();
        assert_eq!(t.pan, Offset::new(400.0, -400.0));
    }

    #[test]
    fn test_repeated_zoom_in_caps_at_max() {
        let mut state = session();
        for _ in 0..6 {
            state.apply(GestureDelta::zoom(1.5)).unwrap();
        }
        assert_eq!(state.scale(), 10.0);

        state.apply(GestureDelta::zoom(1.5)).unwrap();
        assert_eq!(state.scale(), MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_floors_at_min() {
        let mut state = session();
        state.apply(GestureDelta::zoom(3.0)).unwrap();
        for _ in 0..10 {
            state.apply(GestureDelta::zoom(0.7)).unwrap();
        }
        assert_eq!(state.scale(), 1.0);
    }

    #[test]
    fn test_pan_uses_updated_scale() {
        let mut state = session();
        state.apply(GestureDelta::zoom(2.0)).unwrap();
        state.apply(GestureDelta::pan(900.0, 900.0)).unwrap();
        assert_eq!(state.pan(), Offset::new(900.0, 900.0));

        // Zooming back out shrinks the bounds to 400 in the same step
        let t = state.apply(GestureDelta::new(Offset::new(10.0, 0.0), 0.5)).unwrap();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.pan, Offset::new(400.0, 400.0));
    }

    #[test]
    fn test_invalid_zoom_leaves_state_unchanged() {
        let mut state = session();
        state.apply(GestureDelta::new(Offset::new(10.0, 10.0), 2.0)).unwrap();
        let before = state.clone();

        for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = state.apply(GestureDelta::zoom(zoom)).unwrap_err();
            assert!(matches!(err, CropError::InvalidGestureInput(_)));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_non_finite_pan_rejected() {
        let mut state = session();
        let before = state.clone();
        assert!(state.apply(GestureDelta::pan(f64::NAN, 0.0)).is_err());
        assert!(state.apply(GestureDelta::pan(0.0, f64::NEG_INFINITY)).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_degenerate_axis_pins_pan_to_center() {
        // 150px wide image in a 200px viewport: horizontal bound is negative
        let vp = ViewportSize::new(200, 200).unwrap();
        let mut state = TransformState::new(150, 1000, vp).unwrap();
        assert!(state.pan_bounds().is_degenerate());

        let t = state.apply(GestureDelta::pan(40.0, 40.0)).unwrap();
        assert_eq!(t.pan.x, 0.0);
        assert_eq!(t.pan.y, 40.0);

        // At scale 2 the image is 300px wide and the axis opens up
        let t = state.apply(GestureDelta::new(Offset::new(40.0, 0.0), 2.0)).unwrap();
        assert_eq!(state.pan_bounds().max_x, 50.0);
        assert_eq!(t.pan.x, 40.0);
    }

    #[test]
    fn test_set_transform_clamps() {
        let mut state = session();
        let t = state
            .set_transform(Transform::new(25.0, Offset::new(1e6, -3.0)))
            .unwrap();
        assert_eq!(t.scale, MAX_SCALE);
        assert_eq!(t.pan, Offset::new(4900.0, -3.0));

        assert!(state
            .set_transform(Transform::new(-1.0, Offset::ZERO))
            .is_err());
        assert_eq!(state.snapshot(), t);
    }

    #[test]
    fn test_reset() {
        let mut state = session();
        state.apply(GestureDelta::new(Offset::new(100.0, 50.0), 4.0)).unwrap();
        assert_eq!(state.reset(), Transform::IDENTITY);
        assert_eq!(state.scale(), 1.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
