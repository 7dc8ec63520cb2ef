//! Player walking state
//!
//! The scroll position is the single source of truth for how far the player
//! has walked. Only the step controller moves it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Signed, unbounded progress along the track
    pub scroll_position: f64,
    /// Completed footsteps
    pub step_count: u32,
    /// Session start (ms since epoch, host clock)
    pub start_time_ms: f64,
    /// Gesture movement since the last counted footstep
    pub stride_accumulator: f64,
}

impl PlayerState {
    pub fn new(start_time_ms: f64) -> Self {
        Self {
            scroll_position: 0.0,
            step_count: 0,
            start_time_ms,
            stride_accumulator: 0.0,
        }
    }

    /// Milliseconds since the session began (never negative)
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_time_ms).max(0.0)
    }

    /// Unsigned distance from the starting point in meters
    pub fn distance_meters(&self, pixels_per_meter: f64) -> f64 {
        crate::pixels_to_meters(self.scroll_position.abs(), pixels_per_meter)
    }

    /// Fraction of the current stride covered (0..1)
    pub fn stride_progress(&self, stride: f64) -> f64 {
        if stride > 0.0 {
            (self.stride_accumulator / stride).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Start over from the origin
    pub fn reset(&mut self, start_time_ms: f64) {
        *self = Self::new(start_time_ms);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_unsigned() {
        let mut player = PlayerState::new(0.0);
        player.scroll_position = -1250.0;
        assert_eq!(player.distance_meters(500.0), 2.5);
        assert_eq!(player.distance_meters(0.0), 0.0);
    }

    #[test]
    fn test_elapsed_clamps_clock_skew() {
        let player = PlayerState::new(10_000.0);
        assert_eq!(player.elapsed_ms(12_500.0), 2_500.0);
        assert_eq!(player.elapsed_ms(9_000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut player = PlayerState::new(5.0);
        player.scroll_position = 42.0;
        player.step_count = 3;
        player.stride_accumulator = 100.0;
        assert_eq!(player.stride_progress(400.0), 0.25);

        player.reset(99.0);
        assert_eq!(player, PlayerState::new(99.0));
    }
}
