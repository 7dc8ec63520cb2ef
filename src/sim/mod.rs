//! Walking simulation module
//!
//! All walking logic lives here. This module must stay pure:
//! - No rendering or platform dependencies (haptics come in through a trait)
//! - Seeded RNG only
//! - Track configuration is fixed once built

pub mod effect;
pub mod footprints;
pub mod player;
pub mod step;
pub mod terrain;

pub use effect::{EffectTable, TerrainEffect};
pub use footprints::{Footprint, FootprintTrail};
pub use player::PlayerState;
pub use step::{StepController, StepResult};
pub use terrain::{FALLBACK_SEGMENT, Rgb, Segment, TerrainKind, TerrainTrack};
