//! Fading footprints left on screen after each counted step

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{FOOTPRINT_FADE_PER_FRAME, MAX_FOOTPRINTS};

/// A single footprint in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub pos: Vec2,
    /// 1.0 when spawned, removed at 0
    pub opacity: f32,
    /// Small random tilt (radians)
    pub rotation: f32,
}

impl Footprint {
    /// Center of the toe ellipse, ahead of the heel along the tilt
    pub fn toe_pos(&self) -> Vec2 {
        self.pos + Vec2::new(self.rotation.sin(), -self.rotation.cos()) * 20.0
    }
}

/// Footprints in spawn order (oldest first)
#[derive(Debug, Clone)]
pub struct FootprintTrail {
    prints: Vec<Footprint>,
    rng: Pcg32,
}

impl FootprintTrail {
    pub fn new(seed: u64) -> Self {
        Self {
            prints: Vec::with_capacity(MAX_FOOTPRINTS),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn prints(&self) -> &[Footprint] {
        &self.prints
    }

    pub fn len(&self) -> usize {
        self.prints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prints.is_empty()
    }

    /// Leave a footprint at a screen position
    pub fn spawn(&mut self, pos: Vec2) {
        let rotation = self.rng.random_range(-0.1..0.1);
        if self.prints.len() >= MAX_FOOTPRINTS {
            self.prints.remove(0);
        }
        self.prints.push(Footprint {
            pos,
            opacity: 1.0,
            rotation,
        });
    }

    /// Advance one frame of fading, dropping invisible prints
    pub fn fade(&mut self) {
        for print in &mut self.prints {
            print.opacity -= FOOTPRINT_FADE_PER_FRAME;
        }
        self.prints.retain(|p| p.opacity > 0.0);
    }

    pub fn clear(&mut self) {
        self.prints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_rotation_range() {
        let mut trail = FootprintTrail::new(7);
        for i in 0..20 {
            trail.spawn(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 20);
        for print in trail.prints() {
            assert!(print.rotation >= -0.1 && print.rotation < 0.1);
            assert_eq!(print.opacity, 1.0);
        }
    }

    #[test]
    fn test_fade_removes_prints() {
        let mut trail = FootprintTrail::new(1);
        trail.spawn(Vec2::ZERO);
        for _ in 0..50 {
            trail.fade();
        }
        trail.spawn(Vec2::ONE);
        assert_eq!(trail.len(), 2);
        assert!(trail.prints()[0].opacity < 0.6);

        // Well past full fade for the first print
        for _ in 0..60 {
            trail.fade();
        }
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.prints()[0].pos, Vec2::ONE);

        for _ in 0..60 {
            trail.fade();
        }
        assert!(trail.is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut trail = FootprintTrail::new(3);
        for i in 0..(MAX_FOOTPRINTS + 5) {
            trail.spawn(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), MAX_FOOTPRINTS);
        assert_eq!(trail.prints()[0].pos.x, 5.0);
    }

    #[test]
    fn test_same_seed_same_tilts() {
        let mut a = FootprintTrail::new(42);
        let mut b = FootprintTrail::new(42);
        for _ in 0..5 {
            a.spawn(Vec2::ZERO);
            b.spawn(Vec2::ZERO);
        }
        assert_eq!(a.prints(), b.prints());
    }

    #[test]
    fn test_toe_is_above_heel_when_upright() {
        let print = Footprint {
            pos: Vec2::new(100.0, 100.0),
            opacity: 1.0,
            rotation: 0.0,
        };
        let toe = print.toe_pos();
        assert!((toe.x - 100.0).abs() < 1e-5);
        assert!((toe.y - 80.0).abs() < 1e-5);
    }
}
