//! Audio feedback using the Web Audio API
//!
//! Procedurally generated tones - no external files needed. The engine never
//! calls into this module; the shell maps [`GameEvent`]s to [`SoundEffect`]s.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Object hit
    Hit,
    /// Lane pressed with nothing in range
    SwingMiss,
    /// Object fell through
    Missed,
    /// Difficulty went up
    LevelUp,
    /// Miss limit reached
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Offset from the trigger time (s)
    pub delay: f64,
    /// Length of the decay (s)
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub wave: Wave,
}

impl Tone {
    const fn sine(freq: f32, duration: f64) -> Self {
        Self {
            freq,
            delay: 0.0,
            duration,
            gain: 0.1,
            wave: Wave::Sine,
        }
    }

    const fn note(freq: f32, delay: f64, duration: f64, wave: Wave) -> Self {
        Self {
            freq,
            delay,
            duration,
            gain: 0.08,
            wave,
        }
    }
}

const HIT: [Tone; 1] = [Tone::sine(600.0, 0.15)];
const SWING_MISS: [Tone; 1] = [Tone::sine(200.0, 0.1)];
const MISSED: [Tone; 1] = [Tone::sine(150.0, 0.1)];
const LEVEL_UP: [Tone; 3] = [
    Tone::note(600.0, 0.0, 0.12, Wave::Triangle),
    Tone::note(800.0, 0.08, 0.12, Wave::Triangle),
    Tone::note(1000.0, 0.16, 0.15, Wave::Triangle),
];
const GAME_OVER: [Tone; 4] = [
    Tone::note(400.0, 0.0, 0.3, Wave::Sine),
    Tone::note(350.0, 0.2, 0.3, Wave::Sine),
    Tone::note(300.0, 0.4, 0.3, Wave::Sine),
    Tone::note(200.0, 0.6, 0.4, Wave::Sine),
];

impl SoundEffect {
    /// Feedback sound for an engine event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Hit { .. } => SoundEffect::Hit,
            GameEvent::SwingMiss { .. } => SoundEffect::SwingMiss,
            GameEvent::Missed { .. } => SoundEffect::Missed,
            GameEvent::GameOver(_) => SoundEffect::GameOver,
        }
    }

    /// Notes making up this effect
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Hit => &HIT,
            SoundEffect::SwingMiss => &SWING_MISS,
            SoundEffect::Missed => &MISSED,
            SoundEffect::LevelUp => &LEVEL_UP,
            SoundEffect::GameOver => &GAME_OVER,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{SoundEffect, Tone, Wave};

    /// Audio manager for the game
    ///
    /// The context is created on first use, since browsers only allow audio
    /// after a user gesture.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        unavailable: bool,
        volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(volume: f32, muted: bool) -> Self {
            Self {
                ctx: None,
                unavailable: false,
                volume: volume.clamp(0.0, 1.0),
                muted,
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.unavailable {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(e) => {
                        log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                        self.unavailable = true;
                    }
                }
            }
            self.ctx.as_ref()
        }

        /// Play a sound effect; failures are silent
        pub fn play(&mut self, effect: SoundEffect) {
            if self.muted || self.volume <= 0.0 {
                return;
            }
            let vol = self.volume;
            let Some(ctx) = self.context() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                if play_tone(ctx, tone, vol).is_none() {
                    log::debug!("Dropped tone for {:?}", effect);
                }
            }
        }

        /// Release the context; errors are swallowed
        pub fn close(&mut self) {
            if let Some(ctx) = self.ctx.take() {
                if ctx.state() != AudioContextState::Closed {
                    if let Err(e) = ctx.close() {
                        log::warn!("Error closing audio context: {:?}", e);
                    }
                }
            }
        }
    }

    impl Drop for AudioManager {
        fn drop(&mut self) {
            self.close();
        }
    }

    /// Schedule one oscillator with an exponential decay envelope
    fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match tone.wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
        });
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time() + tone.delay;
        osc.frequency().set_value_at_time(tone.freq, t).ok()?;
        gain.gain().set_value_at_time(tone.gain * vol, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01 * vol.max(0.01), t + tone.duration)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + tone.duration).ok()?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_is_higher_than_miss() {
        let hit = SoundEffect::Hit.tones()[0].freq;
        let swing = SoundEffect::SwingMiss.tones()[0].freq;
        let missed = SoundEffect::Missed.tones()[0].freq;
        assert!(hit > swing && swing > missed);
    }

    #[test]
    fn events_map_to_effects() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SwingMiss { lane: 0 }),
            SoundEffect::SwingMiss
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Missed { lane: 1, id: 2 }),
            SoundEffect::Missed
        );
    }

    #[test]
    fn tones_are_ordered_in_time() {
        for effect in [SoundEffect::LevelUp, SoundEffect::GameOver] {
            let tones = effect.tones();
            assert!(tones.windows(2).all(|w| w[0].delay <= w[1].delay));
        }
    }
}
