//! Perspective ground sampling
//!
//! The ground is drawn as one-pixel rows from the horizon down. Each row
//! maps to a world distance ahead of the camera by inverse depth, and takes
//! the color of the terrain at that distance.

use crate::consts::{HORIZON_RATIO, PERSPECTIVE_SCALE};
use crate::sim::{Rgb, TerrainTrack};

/// Sky gradient, top to horizon
pub const SKY_TOP: Rgb = Rgb::new(0xF7, 0x93, 0x1E);
pub const SKY_HORIZON: Rgb = Rgb::new(0xFF, 0x6B, 0x35);
/// Mountain silhouette fill
pub const MOUNTAINS: Rgb = Rgb::new(0x4A, 0x2E, 0x1A);

/// Silhouette outline as (x fraction of width, y fraction of horizon height)
pub const MOUNTAIN_OUTLINE: [(f64, f64); 7] = [
    (0.0, 1.0),
    (0.2, 0.8),
    (0.4, 1.0),
    (0.6, 0.7),
    (0.8, 1.0),
    (1.0, 0.9),
    (1.0, 1.0),
];

/// Horizon row for a viewport height
pub fn horizon_y(viewport_height: f64) -> f64 {
    viewport_height * HORIZON_RATIO
}

/// World distance ahead of the camera shown `rows_below_horizon` rows down
pub fn row_distance(ground_height: f64, rows_below_horizon: f64) -> f64 {
    let depth = ground_height - rows_below_horizon;
    PERSPECTIVE_SCALE / (depth + 1.0)
}

/// One ground row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scanline {
    /// Screen row
    pub y: f64,
    pub color: Rgb,
}

/// Ground rows from the horizon to the bottom of the viewport
pub fn ground_scanlines(
    track: &TerrainTrack,
    camera: f64,
    viewport_height: f64,
) -> impl Iterator<Item = Scanline> + '_ {
    let horizon = horizon_y(viewport_height);
    let ground_height = (viewport_height - horizon).max(0.0);
    let rows = ground_height.ceil() as u32;

    (0..rows).map(move |row| {
        let row = row as f64;
        let world = camera + row_distance(ground_height, row);
        Scanline {
            y: horizon + row,
            color: track.segment_at(world).color,
        }
    })
}

/// Merge adjacent rows of the same color into `(y, height, color)` bands
pub fn ground_bands(
    track: &TerrainTrack,
    camera: f64,
    viewport_height: f64,
) -> Vec<(f64, f64, Rgb)> {
    let mut bands: Vec<(f64, f64, Rgb)> = Vec::new();
    for line in ground_scanlines(track, camera, viewport_height) {
        match bands.last_mut() {
            Some((_, height, color)) if *color == line.color => *height += 1.0,
            _ => bands.push((line.y, 1.0, line.color)),
        }
    }
    bands
}
