//! Haptic feedback sinks
//!
//! Requests are fire-and-forget. Callers check `is_supported` first and skip
//! the request on hosts without a vibration motor.

/// Something that can play a vibration pattern
pub trait HapticSink {
    fn is_supported(&self) -> bool;

    /// Play pulse/pause durations in milliseconds
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Host without vibration support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn is_supported(&self) -> bool {
        false
    }

    fn vibrate(&mut self, _pattern: &[u32]) {}
}

/// Keeps every requested pattern in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingHaptics {
    pub played: Vec<Vec<u32>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&[u32]> {
        self.played.last().map(|p| p.as_slice())
    }

    /// Total vibration time requested so far (pulses only, pauses skipped)
    pub fn total_pulse_ms(&self) -> u32 {
        self.played
            .iter()
            .flat_map(|p| p.iter().step_by(2))
            .sum()
    }
}

impl HapticSink for RecordingHaptics {
    fn is_supported(&self) -> bool {
        true
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        self.played.push(pattern.to_vec());
    }
}

/// `navigator.vibrate`, detected once at construction
#[cfg(target_arch = "wasm32")]
pub struct NavigatorHaptics {
    navigator: Option<web_sys::Navigator>,
}

#[cfg(target_arch = "wasm32")]
impl NavigatorHaptics {
    pub fn new() -> Self {
        let navigator = web_sys::window().map(|w| w.navigator()).filter(|nav| {
            js_sys::Reflect::has(nav, &wasm_bindgen::JsValue::from_str("vibrate")).unwrap_or(false)
        });
        if navigator.is_none() {
            log::warn!("{}", crate::WalkError::UnsupportedHapticHost);
        }
        Self { navigator }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for NavigatorHaptics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl HapticSink for NavigatorHaptics {
    fn is_supported(&self) -> bool {
        self.navigator.is_some()
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        let Some(nav) = &self.navigator else { return };
        let arr = js_sys::Array::new();
        for ms in pattern {
            arr.push(&wasm_bindgen::JsValue::from(*ms));
        }
        // Returns false when the browser refuses (e.g. no user activation yet)
        let _ = nav.vibrate_with_pattern(&arr);
    }
}
