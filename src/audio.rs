//! Sound effects
//!
//! Every effect is a short list of oscillator [`Tone`]s, described here
//! without any platform types so they can be checked natively. In the
//! browser, `AudioManager` plays them through the Web Audio API.

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player lost a life - the classic beep
    LifeLost,
    /// Shield or slow-motion collected
    PowerUp,
    LevelUp,
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    /// Start delay from the trigger, seconds
    pub start: f64,
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
    /// Relative gain (multiplied by the effective volume)
    pub gain: f32,
    /// Fade out instead of cutting off
    pub fade: bool,
}

impl Tone {
    const fn note(freq_hz: f32, start: f64, duration: f64, waveform: Waveform, gain: f32) -> Self {
        Self {
            freq_hz,
            start,
            duration,
            waveform,
            gain,
            fade: true,
        }
    }
}

impl SoundEffect {
    /// Sound for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::LifeGained { .. } | GameEvent::SlowMotionStarted => {
                Some(SoundEffect::PowerUp)
            }
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    pub fn tones(&self) -> Vec<Tone> {
        match self {
            // Flat 1 kHz square wave for a tenth of a second
            SoundEffect::LifeLost => vec![Tone {
                fade: false,
                ..Tone::note(1000.0, 0.0, 0.1, Waveform::Square, 1.0)
            }],
            SoundEffect::PowerUp => [600.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::note(freq, i as f64 * 0.06, 0.12, Waveform::Sine, 0.25))
                .collect(),
            SoundEffect::LevelUp => [500.0, 750.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::note(freq, i as f64 * 0.1, 0.2, Waveform::Triangle, 0.3))
                .collect(),
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::note(freq, i as f64 * 0.2, 0.3, Waveform::Sine, 0.3))
                .collect(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        hidden: bool,
        mute_on_hidden: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                hidden: false,
                mute_on_hidden: settings.mute_on_hidden,
            }
        }

        /// Tab visibility changed
        pub fn set_hidden(&mut self, hidden: bool) {
            self.hidden = hidden;
        }

        fn effective_volume(&self) -> f32 {
            if self.hidden && self.mute_on_hidden {
                0.0
            } else {
                self.volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                if self.play_tone(ctx, &tone, vol).is_none() {
                    log::warn!("Failed to play {:?}", effect);
                    return;
                }
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

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
            let (osc, gain) = self.create_osc(ctx, tone.freq_hz, tone.waveform.into())?;
            let t = ctx.current_time() + tone.start;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok()?;
            if tone.fade {
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                    .ok()?;
            }

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + tone.duration).ok()?;
            Some(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_lost_is_short_square_beep() {
        let tones = SoundEffect::LifeLost.tones();
        assert_eq!(tones.len(), 1);
        let beep = tones[0];
        assert_eq!(beep.freq_hz, 1000.0);
        assert_eq!(beep.duration, 0.1);
        assert_eq!(beep.waveform, Waveform::Square);
        assert_eq!(beep.start, 0.0);
        assert!(!beep.fade);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LifeLost { lives: 2 }),
            Some(SoundEffect::LifeLost)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LifeGained { lives: 4 }),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { final_score: 0 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::BlockPassed { id: 1 }), None);
    }

    #[test]
    fn test_melodies_are_sequenced() {
        for effect in [SoundEffect::PowerUp, SoundEffect::LevelUp, SoundEffect::GameOver] {
            let tones = effect.tones();
            assert!(tones.len() > 1);
            assert!(tones.windows(2).all(|w| w[0].start < w[1].start));
        }
    }
}
