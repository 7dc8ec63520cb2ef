//! Startup configuration
//!
//! Read once when the page loads from an optional inline JSON block
//! (`<script id="walk-config" type="application/json">`). Nothing is saved.

use serde::{Deserialize, Serialize};

use crate::consts::{PIXELS_PER_METER, STEP_LENGTH_PIXELS};
use crate::error::WalkError;
use crate::platform::GestureConfig;
use crate::sim::{EffectTable, Segment, StepController, TerrainTrack};

/// Walk configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Segments in track order
    pub track: Vec<Segment>,
    pub effects: EffectTable,
    /// Raw gesture movement per counted footstep
    pub stride_pixels: f64,
    pub pixels_per_meter: f64,
    pub gestures: GestureConfig,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            track: TerrainTrack::default().segments().to_vec(),
            effects: EffectTable::default(),
            stride_pixels: STEP_LENGTH_PIXELS,
            pixels_per_meter: PIXELS_PER_METER,
            gestures: GestureConfig::default(),
        }
    }
}

impl WalkConfig {
    /// Element id of the inline config block
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const ELEMENT_ID: &'static str = "walk-config";

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, WalkError> {
        let config: WalkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, WalkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), WalkError> {
        // Segment lengths are checked by the track itself
        TerrainTrack::new(self.track.clone())?;
        self.effects.validate()?;
        for (field, value) in [
            ("stride_pixels", self.stride_pixels),
            ("pixels_per_meter", self.pixels_per_meter),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WalkError::InvalidScale { field, value });
            }
        }
        Ok(())
    }

    pub fn build_track(&self) -> Result<TerrainTrack, WalkError> {
        TerrainTrack::new(self.track.clone())
    }

    pub fn build_controller(&self) -> Result<StepController, WalkError> {
        Ok(StepController::new(
            self.build_track()?,
            self.effects.clone(),
            self.stride_pixels,
        ))
    }

    /// Parse `json`, or fall back to defaults with a warning
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid walk config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded walk config from page");
                Self::from_json_or_default(&json)
            }
            _ => {
                log::info!("Using default walk config");
                Self::default()
            }
        }
    }

    /// Native: defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
