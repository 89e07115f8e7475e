//! Audio system using Web Audio API
//!
//! Four procedurally generated cues - no external files needed. Every Web
//! Audio call can fail (no secure context, suspended device); all failures
//! are swallowed here and never reach the simulation.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player flapped
    Jump,
    /// A pipe was passed
    Score,
    /// Bird hit something, run over
    Hit,
    /// The run set a new high score
    NewHighScore,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound cue (fire-and-forget)
    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Jump => self.play_jump(ctx),
            SoundCue::Score => self.play_score(ctx),
            SoundCue::Hit => self.play_hit(ctx),
            SoundCue::NewHighScore => self.play_new_high_score(ctx),
        }
    }

    /// Create an oscillator routed through a gain envelope
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

    /// Jump - short rising chirp
    fn play_jump(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.1)
            .ok();

        gain.gain().set_value_at_time(0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Score - quick C5-E5-G5 arpeggio on one oscillator
    fn play_score(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 523.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(523.0, t).ok();
        osc.frequency().set_value_at_time(659.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(784.0, t + 0.2).ok();

        gain.gain().set_value_at_time(0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Hit - harsh falling buzz
    fn play_hit(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.2)
            .ok();

        gain.gain().set_value_at_time(0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// New high score - C5-E5-G5-C6 fanfare, one oscillator per note
    fn play_new_high_score(&self, ctx: &AudioContext) {
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
            let delay = i as f64 * 0.15;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;

                osc.frequency().set_value_at_time(*freq, t).ok();

                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(0.3, t + 0.05)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();

                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }
}
