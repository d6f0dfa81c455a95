//! Audio cues using the Web Audio API
//!
//! Procedurally generated, best effort: if the context cannot be created or
//! a node fails, the cue is skipped and play carries on.

use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::SoundCue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    /// Set after the first failed cue so the console is not flooded
    warned: bool,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            warned: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.resume().is_err() {
                log::warn!("AudioContext resume failed");
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    /// Play a cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.settings.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let played = match cue {
            SoundCue::Hit => self.play_hit(ctx, vol),
            SoundCue::Cheer => self.play_cheer(ctx, vol),
            SoundCue::Out => self.play_out(ctx, vol),
        };
        if played.is_none() {
            if self.warned {
                log::debug!("Could not play {:?}", cue);
            } else {
                log::warn!("Could not play {:?} - further audio failures logged at debug", cue);
                self.warned = true;
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

    /// Bat on ball - bright falling click
    fn play_hit(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, 800.0, OscillatorType::Triangle)?;
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(800.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.1)
            .ok()?;
        gain.gain().set_value_at_time(vol, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(t + 0.1).ok()
    }

    /// Wicket - low sawtooth slide
    fn play_out(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(200.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.5)
            .ok()?;
        gain.gain().set_value_at_time(vol * 0.5, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(t + 0.5).ok()
    }

    /// Crowd - two seconds of band-passed noise swelling and fading
    fn play_cheer(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let sample_rate = ctx.sample_rate();
        let len = (sample_rate * 2.0) as u32;
        let buffer = ctx.create_buffer(1, len, sample_rate).ok()?;
        let mut data: Vec<f32> = (0..len)
            .map(|_| (js_sys::Math::random() * 2.0 - 1.0) as f32)
            .collect();
        buffer.copy_to_channel(&mut data, 0).ok()?;

        let noise = ctx.create_buffer_source().ok()?;
        noise.set_buffer(Some(&buffer));

        let filter = ctx.create_biquad_filter().ok()?;
        filter.set_type(BiquadFilterType::Bandpass);
        filter.frequency().set_value(1000.0);

        let gain = ctx.create_gain().ok()?;
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok()?;
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.5, t + 0.5)
            .ok()?;
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 2.0).ok()?;

        noise.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        noise.start().ok()
    }
}
