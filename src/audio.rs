//! Procedural sound cues for simulation events
//!
//! Every cue is a short list of oscillator tones with an exponential gain
//! decay; no sample files are needed. Tone tables are plain data so they can
//! be checked natively; playback through the Web Audio API only exists on
//! wasm32.

use crate::sim::state::{EffectKind, EndReason, GameEvent};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice in a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub wave: Waveform,
    /// Frequency at note start (Hz)
    pub start_hz: f32,
    /// Frequency the note sweeps to by the end; equal to `start_hz` for a flat tone
    pub end_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Offset from the cue start (seconds)
    pub delay_s: f64,
    pub duration_s: f64,
}

impl ToneSpec {
    const fn flat(wave: Waveform, hz: f32, gain: f32, delay_s: f64, duration_s: f64) -> Self {
        Self {
            wave,
            start_hz: hz,
            end_hz: hz,
            gain,
            delay_s,
            duration_s,
        }
    }

    const fn sweep(wave: Waveform, from: f32, to: f32, gain: f32, duration_s: f64) -> Self {
        Self {
            wave,
            start_hz: from,
            end_hz: to,
            gain,
            delay_s: 0.0,
            duration_s,
        }
    }

    pub fn is_sweep(&self) -> bool {
        self.start_hz != self.end_hz
    }
}

/// Gain every envelope decays to
pub const ENVELOPE_FLOOR: f32 = 0.01;

const SPLASH: [ToneSpec; 1] = [ToneSpec::flat(Waveform::Triangle, 600.0, 0.3, 0.0, 0.3)];

const SUPER_SPLASH: [ToneSpec; 3] = [
    ToneSpec::flat(Waveform::Triangle, 600.0, 0.3, 0.0, 0.3),
    ToneSpec::flat(Waveform::Triangle, 800.0, 0.25, 0.08, 0.3),
    ToneSpec::flat(Waveform::Triangle, 1000.0, 0.25, 0.16, 0.4),
];

const ORB_SPAWN: [ToneSpec; 1] = [ToneSpec::sweep(Waveform::Sine, 900.0, 1400.0, 0.15, 0.25)];

const ORB_COLLECT: [ToneSpec; 2] = [
    ToneSpec::flat(Waveform::Sine, 1200.0, 0.2, 0.0, 0.15),
    ToneSpec::flat(Waveform::Sine, 1800.0, 0.2, 0.06, 0.2),
];

const ORB_MISSED: [ToneSpec; 1] = [ToneSpec::sweep(Waveform::Sine, 300.0, 120.0, 0.25, 0.3)];

const PLANT_DIED: [ToneSpec; 1] = [ToneSpec::sweep(Waveform::Sawtooth, 220.0, 60.0, 0.2, 0.4)];

const NIGHTFALL: [ToneSpec; 4] = [
    ToneSpec::flat(Waveform::Triangle, 400.0, 0.3, 0.0, 0.4),
    ToneSpec::flat(Waveform::Triangle, 500.0, 0.3, 0.1, 0.4),
    ToneSpec::flat(Waveform::Triangle, 600.0, 0.3, 0.2, 0.4),
    ToneSpec::flat(Waveform::Triangle, 800.0, 0.3, 0.3, 0.5),
];

const GARDEN_LOST: [ToneSpec; 4] = [
    ToneSpec::flat(Waveform::Sine, 400.0, 0.3, 0.0, 0.3),
    ToneSpec::flat(Waveform::Sine, 350.0, 0.3, 0.2, 0.3),
    ToneSpec::flat(Waveform::Sine, 300.0, 0.3, 0.4, 0.3),
    ToneSpec::flat(Waveform::Sine, 200.0, 0.3, 0.6, 0.4),
];

impl EffectKind {
    /// Lead tone of this effect's cue
    pub fn tone(self) -> ToneSpec {
        self.tones()[0]
    }

    pub fn tones(self) -> &'static [ToneSpec] {
        match self {
            EffectKind::Splash => &SPLASH,
            EffectKind::SuperSplash => &SUPER_SPLASH,
            EffectKind::OrbSpawn => &ORB_SPAWN,
            EffectKind::OrbCollect => &ORB_COLLECT,
        }
    }
}

/// Tones to play for an event; empty for silent events
pub fn cue_for(event: &GameEvent) -> &'static [ToneSpec] {
    match event {
        GameEvent::PlayEffect { kind, .. } => kind.tones(),
        GameEvent::PlantWilted { .. } => &[],
        GameEvent::PlantDied { .. } => &PLANT_DIED,
        GameEvent::OrbMissed => &ORB_MISSED,
        GameEvent::RoundEnded {
            reason: EndReason::Nightfall,
            ..
        } => &NIGHTFALL,
        GameEvent::RoundEnded {
            reason: EndReason::AllPlantsDead,
            ..
        } => &GARDEN_LOST,
    }
}

/// Volume and mute state, kept separate from the audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{ENVELOPE_FLOOR, Mixer, ToneSpec, Waveform, cue_for};
    use crate::sim::state::GameEvent;

    /// Web Audio playback of cue tables
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        pub mixer: Mixer,
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
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mixer: Mixer::default(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play_event(&self, event: &GameEvent) {
            self.play_tones(cue_for(event));
        }

        pub fn play_tones(&self, tones: &[ToneSpec]) {
            let vol = self.mixer.effective_volume();
            if vol <= 0.0 || tones.is_empty() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in tones {
                play_tone(ctx, tone, vol);
            }
        }
    }

    fn oscillator_type(wave: Waveform) -> OscillatorType {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    fn create_osc(ctx: &AudioContext, tone: &ToneSpec) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(oscillator_type(tone.wave));
        osc.frequency().set_value(tone.start_hz);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &ToneSpec, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, tone) else {
            return;
        };
        let t = ctx.current_time() + tone.delay_s;
        let end = t + tone.duration_s;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, end)
            .ok();
        if tone.is_sweep() {
            osc.frequency().set_value_at_time(tone.start_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.end_hz, end)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_matches_classic_cue() {
        let tone = EffectKind::Splash.tone();
        assert_eq!(tone.wave, Waveform::Triangle);
        assert_eq!(tone.start_hz, 600.0);
        assert!(!tone.is_sweep());
        assert_eq!(tone.gain, 0.3);
        assert_eq!(tone.duration_s, 0.3);
    }

    #[test]
    fn test_every_effect_has_audible_tones() {
        for kind in [
            EffectKind::Splash,
            EffectKind::SuperSplash,
            EffectKind::OrbSpawn,
            EffectKind::OrbCollect,
        ] {
            let tones = kind.tones();
            assert!(!tones.is_empty());
            for t in tones {
                assert!(t.gain > ENVELOPE_FLOOR && t.gain <= 1.0);
                assert!(t.start_hz > 0.0 && t.end_hz > 0.0);
                assert!(t.duration_s > 0.0);
            }
        }
    }

    #[test]
    fn test_event_cues() {
        let splash = GameEvent::PlayEffect {
            kind: EffectKind::Splash,
            x: 1.0,
            y: 2.0,
        };
        assert_eq!(cue_for(&splash), EffectKind::Splash.tones());
        assert!(cue_for(&GameEvent::PlantWilted { id: 1 }).is_empty());
        assert!(!cue_for(&GameEvent::OrbMissed).is_empty());

        let night = GameEvent::RoundEnded {
            reason: EndReason::Nightfall,
            score: 0,
        };
        let lost = GameEvent::RoundEnded {
            reason: EndReason::AllPlantsDead,
            score: 0,
        };
        assert_ne!(cue_for(&night), cue_for(&lost));
    }

    #[test]
    fn test_mixer_clamps_and_mutes() {
        let mut mixer = Mixer::default();
        mixer.set_master_volume(2.0);
        mixer.set_sfx_volume(0.5);
        assert_eq!(mixer.effective_volume(), 0.5);

        mixer.set_sfx_volume(f32::NAN);
        assert_eq!(mixer.effective_volume(), 0.0);

        mixer.set_sfx_volume(1.0);
        mixer.set_muted(true);
        assert!(mixer.is_muted());
        assert_eq!(mixer.effective_volume(), 0.0);
    }
}
