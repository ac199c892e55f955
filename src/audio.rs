//! Sound cues
//!
//! The sim raises [`GameEvent`]s; this module turns them into fire-and-forget
//! [`SoundEffect`]s. In the browser the effects are synthesized with Web
//! Audio oscillators, so no sound files need to ship.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball leaves the ground
    Jump,
    /// Ball touched a harmful obstacle
    Collision,
    /// Ball respawned after a hit
    LifeLost,
    /// Obstacle cleared
    Score,
    /// Speed-up and new background
    Milestone,
    GameOver,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Cue for a sim event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::Collision => SoundEffect::Collision,
            GameEvent::LifeLost => SoundEffect::LifeLost,
            GameEvent::Score { .. } => SoundEffect::Score,
            GameEvent::Milestone { .. } => SoundEffect::Milestone,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::NewHighScore { .. } => SoundEffect::HighScore,
        }
    }
}

/// Something that can play a cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn play_effect(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => {
                    self.sweep(ctx, vol * 0.4, 300.0, 700.0, 0.12, OscillatorType::Sine)
                }
                SoundEffect::Collision => {
                    self.sweep(ctx, vol * 0.5, 220.0, 60.0, 0.2, OscillatorType::Sawtooth)
                }
                SoundEffect::LifeLost => {
                    self.sweep(ctx, vol * 0.4, 440.0, 110.0, 0.45, OscillatorType::Triangle)
                }
                SoundEffect::Score => self.blip(ctx, vol * 0.25, 880.0, 0.06),
                SoundEffect::Milestone => self.arpeggio(ctx, vol * 0.3, &[523.0, 659.0, 784.0]),
                SoundEffect::GameOver => {
                    self.sweep(ctx, vol * 0.5, 330.0, 40.0, 0.9, OscillatorType::Square)
                }
                SoundEffect::HighScore => {
                    self.arpeggio(ctx, vol * 0.35, &[523.0, 659.0, 784.0, 1047.0])
                }
            }
        }

        // === Sound generators ===

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

        /// Pitch glide with an exponential fade
        fn sweep(
            &self,
            ctx: &AudioContext,
            vol: f32,
            from: f32,
            to: f32,
            duration: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Short fixed-pitch tick
        fn blip(&self, ctx: &AudioContext, vol: f32, freq: f32, duration: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.02).ok();
        }

        /// Rising notes, 80ms apart
        fn arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
            let t = ctx.current_time();
            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                    continue;
                };
                let start = t + i as f64 * 0.08;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            self.play_effect(effect);
        }
    }
}
