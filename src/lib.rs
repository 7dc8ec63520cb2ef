//! Trailstep - A minimalist terrain walking simulator
//!
//! Core modules:
//! - `sim`: Deterministic walking model (terrain track, step controller, footprints)
//! - `render`: Ground sampling for the Canvas 2D renderer
//! - `platform`: Browser/native capability seams (haptics, gesture input)
//! - `settings`: Startup configuration
//! - `ui`: HUD readouts

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::WalkError;
pub use settings::WalkConfig;

/// Walking configuration constants
pub mod consts {
    /// Screen pixels per real-world meter
    pub const PIXELS_PER_METER: f64 = 500.0;
    /// Assumed stride of a single footstep
    pub const STEP_LENGTH_METERS: f64 = 0.7;
    /// Stride in scroll units (350 px)
    pub const STEP_LENGTH_PIXELS: f64 = STEP_LENGTH_METERS * PIXELS_PER_METER;

    /// Horizon line as a fraction of viewport height
    pub const HORIZON_RATIO: f64 = 0.4;
    /// Inverse-depth scale for ground scanlines
    pub const PERSPECTIVE_SCALE: f64 = 10_000.0;

    /// Opacity lost by a footprint every frame
    pub const FOOTPRINT_FADE_PER_FRAME: f32 = 0.01;
    /// Most footprints kept alive at once
    pub const MAX_FOOTPRINTS: usize = 64;
}

/// Convert a scroll distance to meters
#[inline]
pub fn pixels_to_meters(pixels: f64, pixels_per_meter: f64) -> f64 {
    if pixels_per_meter > 0.0 {
        pixels / pixels_per_meter
    } else {
        0.0
    }
}
