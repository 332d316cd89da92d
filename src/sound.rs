//! Audio cues
//!
//! Platform-independent mapping from simulation events to what the audio
//! backend should do. Keeps `sim` free of audio concerns and lets the mapping
//! be tested natively.

use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Passed through a gap
    Coin,
    /// Player hit something solid
    Explosion,
}

/// What the audio backend should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Play(SoundEffect),
    StartMusic,
    StopMusic,
}

impl AudioCue {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Scored { .. } => Some(AudioCue::Play(SoundEffect::Coin)),
            GameEvent::PlayerDied { .. } => Some(AudioCue::Play(SoundEffect::Explosion)),
            GameEvent::MusicStarted => Some(AudioCue::StartMusic),
            GameEvent::MusicStopped => Some(AudioCue::StopMusic),
            GameEvent::GameStarted
            | GameEvent::PlayerActivated
            | GameEvent::ObstacleSpawned { .. }
            | GameEvent::SceneReset { .. } => None,
        }
    }
}

/// Map a drained batch of events to cues, preserving order
pub fn cues_for(events: &[GameEvent]) -> Vec<AudioCue> {
    events.iter().filter_map(AudioCue::for_event).collect()
}

/// One step of the background loop; `freq` of 0 is a rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub beats: f32,
}

const fn note(freq: f32, beats: f32) -> Note {
    Note { freq, beats }
}

pub const MUSIC_BPM: f32 = 132.0;

/// Background loop, square-wave lead over a sine bass line
pub const MUSIC_LEAD: [Note; 16] = [
    note(523.25, 1.0),
    note(659.25, 0.5),
    note(783.99, 0.5),
    note(659.25, 1.0),
    note(0.0, 1.0),
    note(587.33, 1.0),
    note(698.46, 0.5),
    note(880.00, 0.5),
    note(698.46, 1.0),
    note(0.0, 1.0),
    note(659.25, 0.5),
    note(587.33, 0.5),
    note(523.25, 1.0),
    note(493.88, 1.0),
    note(523.25, 2.0),
    note(0.0, 3.0),
];
pub const MUSIC_BASS: [Note; 4] = [
    note(130.81, 4.0),
    note(146.83, 4.0),
    note(164.81, 4.0),
    note(130.81, 4.0),
];

/// Seconds per beat
pub fn beat_secs() -> f32 {
    60.0 / MUSIC_BPM
}

/// Length of one pass through a voice
pub fn loop_secs(voice: &[Note]) -> f32 {
    voice.iter().map(|n| n.beats).sum::<f32>() * beat_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_death_sequence_cues() {
        let events = [
            GameEvent::Scored { score: 3 },
            GameEvent::PlayerDied { pos: Vec2::ZERO },
            GameEvent::MusicStopped,
        ];
        assert_eq!(
            cues_for(&events),
            vec![
                AudioCue::Play(SoundEffect::Coin),
                AudioCue::Play(SoundEffect::Explosion),
                AudioCue::StopMusic,
            ]
        );
    }

    #[test]
    fn test_music_voices_loop_together() {
        assert!((loop_secs(&MUSIC_LEAD) - loop_secs(&MUSIC_BASS)).abs() < 1e-4);
        assert!(MUSIC_LEAD.iter().all(|n| n.beats > 0.0 && n.freq >= 0.0));
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(AudioCue::for_event(&GameEvent::GameStarted), None);
        assert_eq!(AudioCue::for_event(&GameEvent::ObstacleSpawned { pair: 0 }), None);
        assert_eq!(
            AudioCue::for_event(&GameEvent::MusicStarted),
            Some(AudioCue::StartMusic)
        );
    }
}
