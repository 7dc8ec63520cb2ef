//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Haptic feedback (vibration)
//! - Gesture input (pointer events or touch/mouse fallback)

pub mod haptics;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use haptics::{HapticSink, NoHaptics, RecordingHaptics};
pub use input::{
    GestureConfig, GestureDelta, GestureHandler, GestureSource, MouseDrag, PointerKind,
    PointerTracker, ScriptedGestures, TouchPoint, TwoFingerSwipe,
};
