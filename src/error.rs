//! Error kinds for the walking model and its hosts
//!
//! Most failures are recoverable by falling back to a sane default; only a
//! missing render context stops startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    /// Track has zero total length; lookups resolve to the fallback segment
    #[error("terrain track has zero total length")]
    DegenerateTrack,

    /// Host has no vibration capability; haptic requests are skipped
    #[error("host does not support haptic feedback")]
    UnsupportedHapticHost,

    /// Neither pointer nor touch/mouse events are available
    #[error("no gesture input source available on this host")]
    NoGestureInput,

    #[error("segment {index} has invalid length {length} (must be finite and > 0)")]
    InvalidSegmentLength { index: usize, length: f64 },

    #[error("{terrain} speed multiplier {value} is not finite")]
    InvalidMultiplier { terrain: &'static str, value: f64 },

    #[error("invalid color {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("{field} must be finite and > 0 (got {value})")]
    InvalidScale { field: &'static str, value: f64 },

    #[error("failed to parse walk config: {0}")]
    Config(#[from] serde_json::Error),

    /// Canvas or 2D context could not be acquired
    #[error("render context unavailable: {0}")]
    MissingRenderContext(String),
}

impl WalkError {
    /// Whether the host can carry on with a fallback.
    ///
    /// Configuration errors count as recoverable: the caller drops back to
    /// the default configuration.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WalkError::MissingRenderContext(_))
    }
}
