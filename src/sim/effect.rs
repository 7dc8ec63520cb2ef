//! Per-terrain walking effects
//!
//! Explicit table, keyed by terrain kind. Looked up on every step.

use serde::{Deserialize, Serialize};

use super::terrain::TerrainKind;
use crate::error::WalkError;

/// How a terrain changes a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainEffect {
    /// Scales the raw gesture displacement
    pub speed_multiplier: f64,
    /// Vibration pulse/pause durations in milliseconds
    pub haptic_pattern: Vec<u32>,
}

impl TerrainEffect {
    pub fn new(speed_multiplier: f64, haptic_pattern: &[u32]) -> Self {
        Self {
            speed_multiplier,
            haptic_pattern: haptic_pattern.to_vec(),
        }
    }
}

/// Effect for each terrain kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTable {
    pub dirt: TerrainEffect,
    pub mud: TerrainEffect,
    pub ice: TerrainEffect,
    pub cobblestone: TerrainEffect,
}

impl Default for EffectTable {
    fn default() -> Self {
        Self {
            // Baseline walking pace
            dirt: TerrainEffect::new(0.5, &[50]),
            // Heavy going, one long pulse
            mud: TerrainEffect::new(0.1, &[100]),
            // Slippery, faster than dirt
            ice: TerrainEffect::new(0.7, &[20]),
            // Uneven, double pulse
            cobblestone: TerrainEffect::new(0.3, &[30, 20, 30]),
        }
    }
}

impl EffectTable {
    pub fn effect_for(&self, kind: TerrainKind) -> &TerrainEffect {
        match kind {
            TerrainKind::Dirt => &self.dirt,
            TerrainKind::Mud => &self.mud,
            TerrainKind::Ice => &self.ice,
            TerrainKind::Cobblestone => &self.cobblestone,
        }
    }

    /// Reject non-finite multipliers
    pub fn validate(&self) -> Result<(), WalkError> {
        for kind in TerrainKind::ALL {
            let value = self.effect_for(kind).speed_multiplier;
            if !value.is_finite() {
                return Err(WalkError::InvalidMultiplier {
                    terrain: kind.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = EffectTable::default();
        assert_eq!(table.effect_for(TerrainKind::Dirt).speed_multiplier, 0.5);
        assert_eq!(table.effect_for(TerrainKind::Mud).speed_multiplier, 0.1);
        assert_eq!(table.effect_for(TerrainKind::Mud).haptic_pattern, vec![100]);
        assert_eq!(table.effect_for(TerrainKind::Ice).speed_multiplier, 0.7);
        assert_eq!(
            table.effect_for(TerrainKind::Cobblestone).haptic_pattern,
            vec![30, 20, 30]
        );
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_ice_is_faster_than_dirt() {
        let table = EffectTable::default();
        let ice = table.effect_for(TerrainKind::Ice).speed_multiplier;
        let dirt = table.effect_for(TerrainKind::Dirt).speed_multiplier;
        let mud = table.effect_for(TerrainKind::Mud).speed_multiplier;
        assert!(ice > dirt);
        assert!(mud < dirt);
    }

    #[test]
    fn test_partial_override() {
        let table: EffectTable =
            serde_json::from_str(r#"{"ice":{"speed_multiplier":0.2,"haptic_pattern":[10,10]}}"#)
                .unwrap();
        assert_eq!(table.ice.speed_multiplier, 0.2);
        assert_eq!(table.ice.haptic_pattern, vec![10, 10]);
        // Untouched entries keep defaults
        assert_eq!(table.mud, EffectTable::default().mud);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut table = EffectTable::default();
        table.cobblestone.speed_multiplier = f64::NAN;
        assert!(matches!(
            table.validate(),
            Err(WalkError::InvalidMultiplier {
                terrain: "cobblestone",
                ..
            })
        ));
    }
}
