//! Sky Gap - A tap-to-fly gap runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, contacts, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `sound`: Mapping from simulation events to audio cues
//! - `audio`: Web Audio playback (wasm only)
//! - `headless`: Window-less autopilot runner (native demo)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod headless;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sound;

pub use error::SetupError;
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in screen units with the origin at the bottom-left corner
/// and y pointing up.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 640.0;

    /// Downward acceleration (5 m/s² at 150 units per metre)
    pub const GRAVITY: f32 = 750.0;
    /// Upward velocity after a flap (velocity is zeroed first)
    pub const FLAP_VELOCITY: f32 = 300.0;

    /// Player spawn point: a third of the way across, 60% up
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 3.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT * 0.6;
    /// Collision radius of the player
    pub const PLAYER_RADIUS: f32 = 12.0;
    /// Tilt per unit of vertical velocity (radians)
    pub const PLAYER_TILT_FACTOR: f32 = 0.001;
    /// Time constant for easing toward the target tilt
    pub const PLAYER_TILT_SECS: f32 = 0.1;

    /// Pillar sprite size
    pub const PILLAR_WIDTH: f32 = 52.0;
    pub const PILLAR_HEIGHT: f32 = 320.0;
    /// Vertical opening between the top and bottom pillar
    pub const PILLAR_GAP: f32 = 100.0;
    /// Gap centre bounds (keeps the opening inside the visible play area)
    pub const GAP_CENTER_MIN: f32 = SCREEN_HEIGHT / 4.75 + PILLAR_HEIGHT / 2.0;
    pub const GAP_CENTER_MAX: f32 = 320.0 + PILLAR_HEIGHT / 2.0;

    /// Score trigger zone, full screen height
    pub const SCORE_ZONE_WIDTH: f32 = 32.0;
    /// Horizontal distance from pillar centre to zone centre
    pub const SCORE_ZONE_OFFSET: f32 = SCORE_ZONE_WIDTH * 2.0;

    /// Obstacles spawn just past the right edge
    pub const OBSTACLE_SPAWN_X: f32 = SCREEN_WIDTH + PILLAR_WIDTH;
    /// Distance an obstacle covers before it is removed
    pub const OBSTACLE_TRAVEL: f32 = SCREEN_WIDTH + PILLAR_WIDTH * 2.0;
    /// Seconds to cover `OBSTACLE_TRAVEL`
    pub const OBSTACLE_CROSS_SECS: f32 = 6.2;
    pub const OBSTACLE_CROSS_TICKS: u32 = super::secs_to_ticks(OBSTACLE_CROSS_SECS);
    /// Leftward speed of every obstacle piece
    pub const OBSTACLE_SPEED: f32 = OBSTACLE_TRAVEL / OBSTACLE_CROSS_SECS;
    /// Time between spawns
    pub const SPAWN_INTERVAL_TICKS: u32 = super::secs_to_ticks(3.0);

    /// Logo fade-out, then a pause before the player goes live
    pub const INTRO_FADE_TICKS: u32 = super::secs_to_ticks(0.5);
    pub const INTRO_WAIT_TICKS: u32 = super::secs_to_ticks(0.5);

    /// Ground strip along the bottom edge (solid)
    pub const GROUND_HEIGHT: f32 = 112.0;
    /// Scroll loop periods
    pub const GROUND_LOOP_SECS: f32 = 5.0;
    pub const BACKDROP_LOOP_SECS: f32 = 20.0;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub const fn secs_to_ticks(secs: f32) -> u32 {
    // Round half up; `f32::round` is not const
    (secs * consts::SIM_HZ as f32 + 0.5) as u32
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_tick_constants_match_seconds() {
        assert_eq!(OBSTACLE_CROSS_TICKS, 744);
        assert_eq!(SPAWN_INTERVAL_TICKS, 360);
        assert_eq!(INTRO_FADE_TICKS + INTRO_WAIT_TICKS, SIM_HZ);
        assert_eq!(secs_to_ticks(1.0 / SIM_HZ as f32), 1);
    }

    #[test]
    fn test_gap_range_stays_on_screen() {
        assert!(GAP_CENTER_MIN < GAP_CENTER_MAX);
        assert!(GAP_CENTER_MIN - PILLAR_GAP / 2.0 > GROUND_HEIGHT);
        assert!(GAP_CENTER_MAX + PILLAR_GAP / 2.0 < SCREEN_HEIGHT);
    }
}
