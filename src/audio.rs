//! Footstep sounds using Web Audio API
//!
//! Procedurally generated, one voice per terrain - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::TerrainKind;

/// Audio manager for footsteps
pub struct FootstepAudio {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for FootstepAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl FootstepAudio {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - footstep audio disabled");
        }
        Self {
            ctx,
            volume: 0.6,
        }
    }

    /// Play one footstep on the given ground
    pub fn play_step(&self, terrain: TerrainKind) {
        let vol = self.volume;
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match terrain {
            TerrainKind::Dirt => self.play_dirt(ctx, vol),
            TerrainKind::Mud => self.play_mud(ctx, vol),
            TerrainKind::Ice => self.play_ice(ctx, vol),
            TerrainKind::Cobblestone => self.play_cobblestone(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Dirt - soft dull thud
    fn play_dirt(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(110.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Mud - slow squelch, pitch sagging down
    fn play_mud(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.45, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(90.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(140.0, t + 0.08)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Ice - short bright crunch over a light thud
    fn play_ice(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.08, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                .ok();
            osc.frequency().set_value_at_time(2400.0, t).ok();
            osc.frequency().set_value_at_time(3200.0, t + 0.015).ok();
            osc.frequency().set_value_at_time(2000.0, t + 0.03).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.06).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Cobblestone - two hard clicks, heel then toe
    fn play_cobblestone(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [320.0, 280.0].iter().enumerate() {
            let delay = i as f64 * 0.05;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.04)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.05).ok();
            }
        }
    }
}
