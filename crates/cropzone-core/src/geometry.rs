//! Shared geometry for the crop viewport.
//!
//! Three coordinate spaces are involved:
//!
//! - **Source space**: pixels of the original image, origin at its top-left.
//! - **Scaled space**: pixels of the image after resampling by `scale`.
//! - **Viewport space**: display pixels inside the crop zone, origin at the
//!   viewport's top-left.
//!
//! The viewport is centered on the scaled image and then displaced by `pan`.
//! A source point `s` therefore lands in the viewport at
//!
//! ```text
//! v = scale * (s - image / 2) + pan + viewport / 2
//! ```
//!
//! Both the live preview and the final extraction go through the helpers in
//! this module so the two never disagree on rounding.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// A 2D vector in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Fixed size of the crop viewport in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    /// Create a viewport size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Convert a size given in density-independent units to display pixels.
    ///
    /// A 215x275 dp crop zone on a 2.0 density screen becomes 430x550 px.
    pub fn from_density(width_dp: f64, height_dp: f64, density: f64) -> Result<Self, CropError> {
        let to_px = |dp: f64| {
            let px = (dp * density).round();
            if px.is_finite() && px >= 1.0 && px <= u32::MAX as f64 {
                px as u32
            } else {
                0
            }
        };
        Self::new(to_px(width_dp), to_px(height_dp))
    }
}

/// A committed `(scale, pan)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Uniform zoom applied to the source image.
    pub scale: f64,
    /// Offset of the scaled image relative to the viewport center.
    pub pan: Offset,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        pan: Offset::ZERO,
    };

    pub fn new(scale: f64, pan: Offset) -> Self {
        Self { scale, pan }
    }

    /// Reject values no geometric computation can use.
    pub fn validate(&self) -> Result<(), CropError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CropError::InvalidGestureInput(format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if !self.pan.is_finite() {
            return Err(CropError::InvalidGestureInput(format!(
                "pan must be finite, got ({}, {})",
                self.pan.x, self.pan.y
            )));
        }
        Ok(())
    }
}

/// Axis-aligned rectangle with floating point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this rectangle lies inside `[0, width] x [0, height]`, allowing `tolerance`.
    pub fn is_within(&self, width: f64, height: f64, tolerance: f64) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.right() <= width + tolerance
            && self.bottom() <= height + tolerance
    }
}

/// Symmetric pan limits for one scale value.
///
/// A negative maximum means the scaled image is narrower than the viewport on
/// that axis; pan is then pinned to the midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanBounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl PanBounds {
    pub fn min_x(&self) -> f64 {
        -self.max_x
    }

    pub fn min_y(&self) -> f64 {
        -self.max_y
    }

    /// True when the scaled image does not cover the viewport on some axis.
    pub fn is_degenerate(&self) -> bool {
        self.max_x < 0.0 || self.max_y < 0.0
    }

    /// Clamp `pan` into the bounds.
    pub fn clamp(&self, pan: Offset) -> Offset {
        Offset::new(clamp_axis(pan.x, self.max_x), clamp_axis(pan.y, self.max_y))
    }

    /// Whether `pan` is already inside the bounds.
    pub fn contains(&self, pan: Offset) -> bool {
        self.clamp(pan) == pan
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    if max < 0.0 {
        0.0
    } else {
        value.clamp(-max, max)
    }
}

/// Pan limits keeping the viewport inside an image scaled by `scale`.
pub fn pan_bounds(
    image_width: u32,
    image_height: u32,
    viewport: ViewportSize,
    scale: f64,
) -> PanBounds {
    PanBounds {
        max_x: (image_width as f64 * scale - viewport.width as f64) / 2.0,
        max_y: (image_height as f64 * scale - viewport.height as f64) / 2.0,
    }
}

/// Pixel dimensions of the image after resampling by `scale`.
///
/// Each axis is rounded to the nearest pixel and is at least 1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let axis = |len: u32| ((len as f64 * scale).round() as u32).max(1);
    (axis(width), axis(height))
}

/// Top-left of the viewport window in scaled-image pixels.
///
/// Positive pan moves the view right/down, so the window origin moves
/// left/up. The result is negative or overhanging when `pan` is out of
/// bounds. Each axis is clamped to `[-viewport, scaled]`: any origin past
/// that range already leaves the window fully outside the image.
pub fn crop_origin(
    scaled_width: u32,
    scaled_height: u32,
    viewport: ViewportSize,
    pan: Offset,
) -> (i64, i64) {
    let axis = |scaled: u32, view: u32, pan: f64| {
        let origin = ((scaled as f64 - view as f64) / 2.0 - pan).round();
        origin.clamp(-(view as f64), scaled as f64) as i64
    };
    (
        axis(scaled_width, viewport.width, pan.x),
        axis(scaled_height, viewport.height, pan.y),
    )
}

/// Map a source-image point into viewport coordinates.
pub fn source_to_viewport(
    point: Offset,
    image_width: u32,
    image_height: u32,
    viewport: ViewportSize,
    transform: Transform,
) -> Offset {
    let image_center = Offset::new(image_width as f64 / 2.0, image_height as f64 / 2.0);
    let viewport_center = Offset::new(viewport.width as f64 / 2.0, viewport.height as f64 / 2.0);
    let rel = point - image_center;
    Offset::new(rel.x * transform.scale, rel.y * transform.scale) + transform.pan + viewport_center
}

/// Map a viewport point back into source-image coordinates.
pub fn viewport_to_source(
    point: Offset,
    image_width: u32,
    image_height: u32,
    viewport: ViewportSize,
    transform: Transform,
) -> Offset {
    let image_center = Offset::new(image_width as f64 / 2.0, image_height as f64 / 2.0);
    let viewport_center = Offset::new(viewport.width as f64 / 2.0, viewport.height as f64 / 2.0);
    let rel = point - viewport_center - transform.pan;
    Offset::new(rel.x / transform.scale, rel.y / transform.scale) + image_center
}

/// The part of the source image visible through the viewport.
pub fn visible_source_rect(
    image_width: u32,
    image_height: u32,
    viewport: ViewportSize,
    transform: Transform,
) -> Rect {
    let top_left = viewport_to_source(Offset::ZERO, image_width, image_height, viewport, transform);
    Rect {
        x: top_left.x,
        y: top_left.y,
        width: viewport.width as f64 / transform.scale,
        height: viewport.height as f64 / transform.scale,
    }
}

/// Placement of the viewport when centered on a canvas of the given size.
pub fn viewport_rect_in_canvas(canvas_width: f64, canvas_height: f64, viewport: ViewportSize) -> Rect {
    Rect {
        x: canvas_width / 2.0 - viewport.width as f64 / 2.0,
        y: canvas_height / 2.0 - viewport.height as f64 / 2.0,
        width: viewport.width as f64,
        height: viewport.height as f64,
    }
}
