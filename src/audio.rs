//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music - no external files needed!

use web_sys::{AudioContext, AudioNode, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sound::{AudioCue, MUSIC_BASS, MUSIC_LEAD, Note, SoundEffect, beat_secs};

/// How far ahead of the audio clock music notes are queued (seconds)
const LOOKAHEAD: f64 = 0.25;

/// Playback position within one music voice
struct Voice {
    notes: &'static [Note],
    osc_type: OscillatorType,
    level: f32,
    index: usize,
    /// Audio-clock time of the next unscheduled note
    next_time: f64,
}

impl Voice {
    fn new(notes: &'static [Note], osc_type: OscillatorType, level: f32, start: f64) -> Self {
        Self {
            notes,
            osc_type,
            level,
            index: 0,
            next_time: start,
        }
    }
}

/// Looping background track routed through its own gain bus
struct Music {
    bus: GainNode,
    voices: Vec<Voice>,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<Music>,
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
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: false,
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let level = self.music_level();
        if let Some(music) = &self.music {
            music.bus.gain().set_value(level);
        }
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// React to a cue derived from a simulation event
    pub fn handle(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Play(effect) => self.play(effect),
            AudioCue::StartMusic => self.start_music(),
            AudioCue::StopMusic => self.stop_music(),
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::Coin => self.play_coin(ctx, vol),
            SoundEffect::Explosion => self.play_explosion(ctx, vol),
        }
    }

    /// Start the background loop from its first bar (restarts if already playing)
    pub fn start_music(&mut self) {
        self.stop_music();
        let Some(ctx) = &self.ctx else { return };
        let Ok(bus) = ctx.create_gain() else { return };
        if bus.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        bus.gain().set_value(self.music_level());

        let start = ctx.current_time() + 0.05;
        self.music = Some(Music {
            bus,
            voices: vec![
                Voice::new(&MUSIC_LEAD, OscillatorType::Square, 0.12, start),
                Voice::new(&MUSIC_BASS, OscillatorType::Sine, 0.25, start),
            ],
        });
        log::debug!("Music started");
        self.update();
    }

    /// Silence the loop; notes already queued die with the bus
    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            let _ = music.bus.disconnect();
            log::debug!("Music stopped");
        }
    }

    /// Queue music notes up to the lookahead window. Call once per frame.
    pub fn update(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        let Some(music) = &mut self.music else { return };

        let horizon = ctx.current_time() + LOOKAHEAD;
        let beat = beat_secs() as f64;
        for voice in &mut music.voices {
            while voice.next_time < horizon {
                let note = voice.notes[voice.index];
                let duration = note.beats as f64 * beat;
                if note.freq > 0.0 {
                    schedule_note(ctx, &music.bus, voice, note.freq, voice.next_time, duration);
                }
                voice.next_time += duration;
                voice.index = (voice.index + 1) % voice.notes.len();
            }
        }
    }

    // === Sound generators ===

    /// Coin - two quick rising blips
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let destination = ctx.destination();
        for (i, freq) in [987.77, 1318.51].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Square, &destination)
            {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.18, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Explosion - boom!
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let destination = ctx.destination();
        let Some((osc, gain)) = create_osc(ctx, 100.0, OscillatorType::Sawtooth, &destination)
        else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();

        // Add high frequency crack
        if let Some((osc2, gain2)) =
            create_osc(ctx, 1500.0, OscillatorType::Square, &destination)
        {
            gain2.gain().set_value_at_time(vol * 0.2, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.15).ok();
        }
    }
}

/// Create an oscillator with gain envelope, routed into `dest`
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
    dest: &AudioNode,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(dest).ok()?;

    Some((osc, gain))
}

/// One music note with a short attack and release
fn schedule_note(ctx: &AudioContext, bus: &GainNode, voice: &Voice, freq: f32, t: f64, len: f64) {
    let Some((osc, gain)) = create_osc(ctx, freq, voice.osc_type, bus) else {
        return;
    };
    let release = (len * 0.9).max(0.02);
    gain.gain().set_value_at_time(0.0, t).ok();
    gain.gain()
        .linear_ramp_to_value_at_time(voice.level, t + 0.01)
        .ok();
    gain.gain()
        .linear_ramp_to_value_at_time(0.0, t + release)
        .ok();
    osc.start_with_when(t).ok();
    osc.stop_with_when(t + len).ok();
}
