//! Audio notification
//!
//! The simulation reports what happened as `GameEvent`s; the driver maps the
//! audible ones to `SoundEffect`s and hands them to an `AudioSink`. Playback
//! is fire-and-forget: a sink never reports failure back to the game.
//!
//! On the web build `AudioManager` synthesizes every effect with the Web Audio
//! API, so no sound files are needed.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Favorable collectible picked up
    FavorableCollected,
    /// Flew into an unfavorable collectible
    UnfavorableHit,
    /// Boss emitted a laser beam
    LaserFired,
}

impl SoundEffect {
    /// The effect for an event, if it makes a sound
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FavorableCollected => Some(SoundEffect::FavorableCollected),
            GameEvent::UnfavorableHit => Some(SoundEffect::UnfavorableHit),
            GameEvent::LaserFired => Some(SoundEffect::LaserFired),
            _ => None,
        }
    }
}

/// Something that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Preferences changed (volumes, mute); sinks without levels ignore it
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Logs effects instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sound: {:?}", effect);
    }
}

/// Remembers every effect in order, and the last settings applied
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
    pub settings: Option<Settings>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.settings = Some(settings.clone());
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Web Audio player
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        settings: Settings,
    }

    impl AudioManager {
        /// Starts at default levels until the session applies its settings
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                settings: Settings::default(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        /// Two rising notes
        fn play_collect(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [660.0, 990.0].iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)
                else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * 0.06;
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        /// Falling buzz
        fn play_hit(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Descending zap
        fn play_laser(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 1800.0, OscillatorType::Sawtooth)
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(200.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioSink for AudioManager {
        fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone();
        }

        fn play(&mut self, effect: SoundEffect) {
            let vol = self.settings.volume_for(effect);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::FavorableCollected => Self::play_collect(ctx, vol),
                SoundEffect::UnfavorableHit => Self::play_hit(ctx, vol),
                SoundEffect::LaserFired => Self::play_laser(ctx, vol),
            }
        }
    }
}
