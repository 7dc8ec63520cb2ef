//! HUD readouts
//!
//! A snapshot of what the HUD shows, captured once per frame.

use crate::sim::{PlayerState, TerrainKind, TerrainTrack};

#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub distance_m: f64,
    pub terrain: TerrainKind,
    /// Whole minutes and remaining seconds since the session began
    pub elapsed: (u64, u64),
    pub steps: u32,
}

impl HudSnapshot {
    pub fn capture(
        player: &PlayerState,
        track: &TerrainTrack,
        pixels_per_meter: f64,
        now_ms: f64,
    ) -> Self {
        let elapsed_ms = player.elapsed_ms(now_ms) as u64;
        Self {
            distance_m: player.distance_meters(pixels_per_meter),
            terrain: track.segment_at(player.scroll_position).kind,
            elapsed: (elapsed_ms / 60_000, (elapsed_ms % 60_000) / 1000),
            steps: player.step_count,
        }
    }

    pub fn distance_text(&self) -> String {
        format!("👣 Distance: {:.2} m", self.distance_m)
    }

    pub fn terrain_text(&self) -> String {
        format!("🏞️ Terrain: {}", self.terrain.label())
    }

    pub fn time_text(&self) -> String {
        format!("⏱️ Time: {:02}:{:02}", self.elapsed.0, self.elapsed.1)
    }

    pub fn steps_text(&self) -> String {
        format!("🚶 Steps: {}", self.steps)
    }
}
