//! Step controller: turns gesture displacement into terrain-adjusted movement
//!
//! The terrain that slows the player is the one under their feet when the
//! step starts, not where it lands.

use super::effect::EffectTable;
use super::player::PlayerState;
use super::terrain::{TerrainKind, TerrainTrack};
use crate::consts::STEP_LENGTH_PIXELS;
use crate::platform::HapticSink;

/// Relative slack when comparing accumulated movement to the stride
const STRIDE_TOLERANCE: f64 = 1e-9;

/// Outcome of a single `step` call
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Displacement actually added to the scroll position
    pub applied_delta: f64,
    /// Terrain the step started on
    pub terrain: TerrainKind,
    /// Pattern requested for this terrain
    pub haptic_pattern: Vec<u32>,
    /// A full stride was crossed and the step count went up
    pub step_completed: bool,
    /// The haptic request reached a supporting host
    pub haptic_delivered: bool,
}

/// Applies terrain effects to player movement
#[derive(Debug, Clone)]
pub struct StepController {
    track: TerrainTrack,
    effects: EffectTable,
    /// Raw movement needed for one counted footstep
    stride: f64,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new(TerrainTrack::default(), EffectTable::default(), STEP_LENGTH_PIXELS)
    }
}

impl StepController {
    pub fn new(track: TerrainTrack, effects: EffectTable, stride: f64) -> Self {
        if track.is_degenerate() {
            log::warn!(
                "{}; every step resolves to the fallback segment",
                crate::WalkError::DegenerateTrack
            );
        }
        Self {
            track,
            effects,
            stride,
        }
    }

    pub fn track(&self) -> &TerrainTrack {
        &self.track
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    pub fn stride(&self) -> f64 {
        self.stride
    }

    /// Terrain currently under the player
    pub fn terrain_under(&self, player: &PlayerState) -> TerrainKind {
        self.track.segment_at(player.scroll_position).kind
    }

    /// Advance `player` by one gesture sample.
    ///
    /// Stride accumulation uses the raw gesture magnitude, so a footstep
    /// takes the same hand movement on every terrain. Zero movement still
    /// requests the terrain's haptic pattern. Non-finite input is not
    /// validated and propagates into the position.
    pub fn step(
        &self,
        player: &mut PlayerState,
        raw_delta: f64,
        haptics: &mut dyn HapticSink,
    ) -> StepResult {
        let segment = self.track.segment_at(player.scroll_position);
        let effect = self.effects.effect_for(segment.kind);

        let applied_delta = raw_delta * effect.speed_multiplier;
        player.scroll_position += applied_delta;

        player.stride_accumulator += raw_delta.abs();
        // Decimal deltas (0.7, 0.1) sum to a hair under the stride
        let step_completed =
            player.stride_accumulator >= self.stride * (1.0 - STRIDE_TOLERANCE);
        if step_completed {
            player.step_count += 1;
            player.stride_accumulator = 0.0;
            log::debug!(
                "Step {} on {} (position {:.1})",
                player.step_count,
                segment.kind,
                player.scroll_position
            );
        }

        let haptic_delivered = haptics.is_supported();
        if haptic_delivered {
            haptics.vibrate(&effect.haptic_pattern);
        }

        log::trace!(
            "step raw={:.2} applied={:.2} terrain={}",
            raw_delta,
            applied_delta,
            segment.kind
        );

        StepResult {
            applied_delta,
            terrain: segment.kind,
            haptic_pattern: effect.haptic_pattern.clone(),
            step_completed,
            haptic_delivered,
        }
    }
}
