//! Audio playback for simulation sound effects
//!
//! Bursts play a shared firework sample, pitched and leveled by color. When the
//! sample can't play, a short oscillator tone stands in, and if Web Audio is
//! unavailable too the sound is skipped with a warning. Collect/explode are
//! always synthesized.

use crate::sim::{FireworkColor, SimEvent, SoundEffect};

/// Firework sample served next to the page
pub const BURST_SAMPLE_URL: &str = "launching-fireworks-into-the-sky.mp3";
/// Bursts start at a random offset in [0, this) seconds into the sample
pub const BURST_MAX_OFFSET_SECS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// Oscillator beep: starts at `gain`, ramps down over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    pub gain: f32,
    pub duration: f64,
}

impl Tone {
    /// Synthesized voice for an effect
    pub fn for_effect(effect: SoundEffect) -> Self {
        match effect {
            // C5
            SoundEffect::Collect => Tone {
                freq: 523.25,
                waveform: Waveform::Sine,
                gain: 0.2,
                duration: 0.3,
            },
            // A3
            SoundEffect::Explode => Tone {
                freq: 220.0,
                waveform: Waveform::Square,
                gain: 0.3,
                duration: 0.5,
            },
            SoundEffect::FireworkBurst(color) => Tone {
                freq: BurstVoice::for_color(color).fallback_hz,
                waveform: Waveform::Sine,
                gain: 0.3,
                duration: 0.5,
            },
        }
    }

    /// Same tone at a scaled level
    pub fn scaled(self, volume: f32) -> Self {
        Tone {
            gain: self.gain * volume,
            ..self
        }
    }
}

/// How a burst of a given color sounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstVoice {
    /// Sample playback rate (pitch)
    pub playback_rate: f64,
    /// Sample volume (0.0 - 1.0)
    pub volume: f32,
    /// Oscillator pitch when the sample can't play
    pub fallback_hz: f32,
}

impl BurstVoice {
    pub fn for_color(color: FireworkColor) -> Self {
        let (playback_rate, volume, fallback_hz) = match color {
            FireworkColor::Red => (1.0, 0.35, 440.0),
            FireworkColor::Gold => (1.2, 0.4, 523.25),
            FireworkColor::Orange => (0.95, 0.38, 493.88),
            FireworkColor::Pink => (1.15, 0.36, 554.37),
            FireworkColor::Blue => (1.1, 0.35, 659.25),
            FireworkColor::Custom(_) => (1.0, 0.3, 440.0),
        };
        Self {
            playback_rate,
            volume,
            fallback_hz,
        }
    }
}

/// Sound effects carried by a batch of events
pub fn sounds(events: &[SimEvent]) -> impl Iterator<Item = SoundEffect> + '_ {
    events.iter().filter_map(|event| match event {
        SimEvent::Sound(effect) => Some(*effect),
        _ => None,
    })
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::Closure;
    use web_sys::{AudioContext, HtmlAudioElement, OscillatorType};

    use super::{BURST_MAX_OFFSET_SECS, BURST_SAMPLE_URL, BurstVoice, Tone, Waveform};
    use crate::settings::Settings;
    use crate::sim::{FireworkColor, SimEvent, SoundEffect};

    /// Gain envelopes ramp down to this level
    const RAMP_FLOOR: f32 = 0.01;

    /// Web Audio / HTMLAudio backend
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - synthesized sounds disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        pub fn from_settings(settings: &Settings) -> Self {
            let mut audio = Self::new();
            audio.apply_settings(settings);
            audio
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.set_master_volume(settings.master_volume);
            self.set_sfx_volume(settings.sfx_volume);
            self.set_muted(settings.muted);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play every sound in a drained event batch
        pub fn handle_events(&self, events: &[SimEvent]) {
            for effect in super::sounds(events) {
                self.play(effect);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            if let Some(ctx) = &self.ctx {
                // Browsers suspend until a user gesture
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }

            match effect {
                SoundEffect::FireworkBurst(color) => self.play_burst(color, vol),
                other => self.play_tone(Tone::for_effect(other).scaled(vol)),
            }
        }

        /// Sample first, oscillator if the sample can't start
        fn play_burst(&self, color: FireworkColor, vol: f32) {
            let voice = BurstVoice::for_color(color);
            let fallback = Tone::for_effect(SoundEffect::FireworkBurst(color)).scaled(vol);

            let audio = match HtmlAudioElement::new_with_src(BURST_SAMPLE_URL) {
                Ok(audio) => audio,
                Err(e) => {
                    log::debug!("Burst sample unavailable ({:?}), using tone", e);
                    self.play_tone(fallback);
                    return;
                }
            };
            audio.set_playback_rate(voice.playback_rate);
            audio.set_volume((voice.volume * vol).clamp(0.0, 1.0) as f64);
            audio.set_current_time(js_sys::Math::random() * BURST_MAX_OFFSET_SECS);

            match audio.play() {
                Ok(promise) => {
                    // Autoplay blocks and decode errors surface as a rejection
                    let ctx = self.ctx.clone();
                    let on_reject = Closure::once(move |err: JsValue| {
                        log::debug!("Burst sample rejected ({:?}), using tone", err);
                        match &ctx {
                            Some(ctx) => start_tone(ctx, fallback),
                            None => log::warn!("No audio backend for firework burst"),
                        }
                    });
                    let _ = promise.catch(&on_reject);
                    on_reject.forget();
                }
                Err(e) => {
                    log::debug!("Burst sample failed to start ({:?}), using tone", e);
                    self.play_tone(fallback);
                }
            }
        }

        fn play_tone(&self, tone: Tone) {
            match &self.ctx {
                Some(ctx) => start_tone(ctx, tone),
                None => log::warn!("Audio unavailable, skipping {:?} tone", tone.waveform),
            }
        }
    }

    /// Oscillator through a decaying gain node
    fn start_tone(ctx: &AudioContext, tone: Tone) {
        let started = (|| -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time();
            osc.frequency().set_value_at_time(tone.freq, t).ok()?;
            gain.gain().set_value_at_time(tone.gain.max(RAMP_FLOOR), t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(RAMP_FLOOR, t + tone.duration)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + tone.duration).ok()
        })();

        if started.is_none() {
            log::warn!("Failed to play {} Hz tone", tone.freq);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use super::{BurstVoice, Tone};
    use crate::settings::Settings;
    use crate::sim::{SimEvent, SoundEffect};

    /// Native stand-in that logs what would play
    #[derive(Debug)]
    pub struct AudioManager {
        volume: f32,
        played: u64,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                volume: 0.8,
                played: 0,
            }
        }

        pub fn from_settings(settings: &Settings) -> Self {
            Self {
                volume: settings.effective_volume(),
                played: 0,
            }
        }

        pub fn resume(&self) {}

        /// Sounds that reached the backend at nonzero volume
        pub fn played(&self) -> u64 {
            self.played
        }

        pub fn handle_events(&mut self, events: &[SimEvent]) {
            for effect in super::sounds(events) {
                self.play(effect);
            }
        }

        pub fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            self.played += 1;
            match effect {
                SoundEffect::FireworkBurst(color) => {
                    let voice = BurstVoice::for_color(color);
                    log::debug!(
                        "burst {:?}: rate {} volume {}",
                        color,
                        voice.playback_rate,
                        voice.volume * self.volume
                    );
                }
                other => {
                    let tone = Tone::for_effect(other).scaled(self.volume);
                    log::debug!("{:?}: {} Hz for {}s", other, tone.freq, tone.duration);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_tones() {
        let collect = Tone::for_effect(SoundEffect::Collect);
        assert_eq!(collect.freq, 523.25);
        assert_eq!(collect.waveform, Waveform::Sine);
        assert_eq!(collect.duration, 0.3);

        let explode = Tone::for_effect(SoundEffect::Explode);
        assert_eq!(explode.freq, 220.0);
        assert_eq!(explode.waveform, Waveform::Square);
        assert_eq!(explode.gain, 0.3);
    }

    #[test]
    fn test_burst_voices_by_color() {
        let gold = BurstVoice::for_color(FireworkColor::Gold);
        assert_eq!(gold.playback_rate, 1.2);
        assert_eq!(gold.volume, 0.4);

        let blue = Tone::for_effect(SoundEffect::FireworkBurst(FireworkColor::Blue));
        assert_eq!(blue.freq, 659.25);
        assert_eq!(blue.duration, 0.5);

        let custom = BurstVoice::for_color(FireworkColor::Custom([1, 2, 3]));
        assert_eq!((custom.playback_rate, custom.volume, custom.fallback_hz), (1.0, 0.3, 440.0));
    }

    #[test]
    fn test_sounds_filters_events() {
        let events = [
            SimEvent::ScoreChanged { score: 10, lives: 3 },
            SimEvent::Sound(SoundEffect::Collect),
            SimEvent::GameOver { score: 10 },
            SimEvent::Sound(SoundEffect::Explode),
        ];
        let effects: Vec<_> = sounds(&events).collect();
        assert_eq!(effects, vec![SoundEffect::Collect, SoundEffect::Explode]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_muted_backend_plays_nothing() {
        let settings = crate::settings::Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        audio.handle_events(&[SimEvent::Sound(SoundEffect::Collect)]);
        assert_eq!(audio.played(), 0);

        let mut audio = AudioManager::new();
        audio.play(SoundEffect::FireworkBurst(FireworkColor::Red));
        assert_eq!(audio.played(), 1);
    }
}
