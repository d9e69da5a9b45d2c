//! Interactive pan/zoom transform and crop extraction.
//!
//! # Flow
//!
//! 1. Gesture steps are folded into a [`TransformState`] with
//!    [`TransformState::apply`]; each call returns the new `(scale, pan)`
//!    for the live preview.
//! 2. On commit, [`TransformState::snapshot`] copies the pair by value.
//! 3. [`Cropper::extract`] turns the snapshot into the cropped raster,
//!    possibly on another thread.
//!
//! # Coordinate System
//!
//! - Scale is a uniform factor in `[1.0, 10.0]`
//! - Pan is in display pixels, positive = image moves right/down
//! - Origin is top-left corner

mod crop;
mod state;

pub use crop::Cropper;
pub use state::{GestureDelta, TransformState, MAX_SCALE, MIN_SCALE};
