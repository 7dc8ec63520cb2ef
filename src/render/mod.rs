//! Rendering module
//!
//! `ground` is pure sampling shared by every renderer; `canvas` paints it
//! with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod ground;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use ground::{Scanline, ground_bands, ground_scanlines, horizon_y};
