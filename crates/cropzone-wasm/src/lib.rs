//! Cropzone WASM - WebAssembly bindings for the cropzone crop engine
//!
//! This crate exposes `cropzone-core` to a browser UI that recognizes pan and
//! pinch gestures itself and only needs the clamped transform and the final
//! crop.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for raster data
//! - `session` - Interactive crop session (gesture steps in, crop out)
//! - `crop` - One-shot extraction for a known scale and pan
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropSession, JsRasterImage } from '@cropzone/wasm';
//!
//! await init();
//!
//! const image = new JsRasterImage(width, height, rgbBytes);
//! const session = new CropSession(width, height, 430, 550);
//! session.apply(12.0, -4.0, 1.1);
//! const cropped = session.crop(image);
//! ```

use std::str::FromStr;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod console;
mod crop;
mod session;
mod types;

// Re-export public types
pub use crop::extract_crop;
pub use session::CropSession;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    install_logger(LevelFilter::Warn);
}

/// Set the console log level ("off", "error", "warn", "info", "debug", "trace").
///
/// Returns `false` if the level name is not recognized.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match LevelFilter::from_str(level) {
        Ok(filter) => {
            install_logger(filter);
            true
        }
        Err(_) => false,
    }
}

#[cfg(target_arch = "wasm32")]
fn install_logger(level: LevelFilter) {
    console::install(level);
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger(level: LevelFilter) {
    log::set_max_level(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
