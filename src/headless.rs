//! Window-less runner
//!
//! Drives the simulation at the fixed timestep with the autopilot supplying
//! taps, restarting after each death, and summarises what happened. Used by
//! the native binary and by tests.

use serde::Serialize;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// What to run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessConfig {
    pub seed: u64,
    /// Simulated seconds (not wall-clock)
    pub seconds: f32,
    /// Ticks to linger on the game-over screen before tapping to restart
    pub restart_delay_ticks: u32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            seconds: 60.0,
            restart_delay_ticks: SIM_HZ,
        }
    }
}

impl HeadlessConfig {
    pub const SEED_VAR: &'static str = "SKYGAP_SEED";
    pub const SECONDS_VAR: &'static str = "SKYGAP_SECONDS";

    /// Build from raw variable values; unparseable values keep the default
    pub fn from_vars(seed: Option<&str>, seconds: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = seed {
            match raw.trim().parse() {
                Ok(seed) => config.seed = seed,
                Err(e) => log::warn!("Bad {} {:?}: {}", Self::SEED_VAR, raw, e),
            }
        }
        if let Some(raw) = seconds {
            match raw.trim().parse::<f32>() {
                Ok(s) if s.is_finite() && s > 0.0 => config.seconds = s,
                Ok(s) => log::warn!("Bad {} {}: must be positive", Self::SECONDS_VAR, s),
                Err(e) => log::warn!("Bad {} {:?}: {}", Self::SECONDS_VAR, raw, e),
            }
        }
        config
    }

    /// Read `SKYGAP_SEED` and `SKYGAP_SECONDS`
    pub fn from_env() -> Self {
        let seed = std::env::var(Self::SEED_VAR).ok();
        let seconds = std::env::var(Self::SECONDS_VAR).ok();
        Self::from_vars(seed.as_deref(), seconds.as_deref())
    }

    pub fn total_ticks(&self) -> u64 {
        (self.seconds * SIM_HZ as f32).round() as u64
    }
}

/// Summary printed by the native binary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessReport {
    pub seed: u64,
    pub ticks: u64,
    /// Games started
    pub runs: u32,
    /// Final score of every finished game, in order
    pub scores: Vec<u32>,
    pub best_score: u32,
    /// Score of the game still in progress when time ran out
    pub unfinished_score: Option<u32>,
    pub obstacles_spawned: u32,
    /// Peak live particle count, clamped to the settings cap
    pub peak_particles: usize,
}

/// Run a full autopilot session
pub fn run_headless(config: &HeadlessConfig, settings: &Settings) -> HeadlessReport {
    let mut state = GameState::new(config.seed);
    let mut report = HeadlessReport {
        seed: config.seed,
        ..Default::default()
    };
    let mut dead_ticks = 0u32;

    for _ in 0..config.total_ticks() {
        let input = TickInput {
            tap: state.phase == GamePhase::Dead && dead_ticks >= config.restart_delay_ticks,
            autopilot: true,
        };
        tick(&mut state, &input, SIM_DT);
        report.ticks += 1;

        if state.phase == GamePhase::Dead {
            dead_ticks += 1;
        } else {
            dead_ticks = 0;
        }

        for event in state.take_events() {
            match event {
                GameEvent::GameStarted => report.runs += 1,
                GameEvent::ObstacleSpawned { .. } => report.obstacles_spawned += 1,
                GameEvent::PlayerDied { .. } => {
                    log::info!("Run {} ended with score {}", report.runs, state.score);
                    report.scores.push(state.score);
                    report.best_score = report.best_score.max(state.score);
                }
                _ => {}
            }
        }

        report.peak_particles = report
            .peak_particles
            .max(state.particles.len().min(settings.max_particles()));
    }

    if state.phase == GamePhase::Playing {
        report.unfinished_score = Some(state.score);
        report.best_score = report.best_score.max(state.score);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64, seconds: f32) -> HeadlessConfig {
        HeadlessConfig {
            seed,
            seconds,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_vars() {
        let config = HeadlessConfig::from_vars(Some("77"), Some("2.5"));
        assert_eq!(config.seed, 77);
        assert_eq!(config.total_ticks(), 300);

        let config = HeadlessConfig::from_vars(Some("seventy"), Some("-1"));
        assert_eq!(config, HeadlessConfig::default());

        assert_eq!(HeadlessConfig::from_vars(None, None), HeadlessConfig::default());
    }

    #[test]
    fn test_same_seed_same_report() {
        let settings = Settings::default();
        let a = run_headless(&config(9, 30.0), &settings);
        let b = run_headless(&config(9, 30.0), &settings);
        assert_eq!(a, b);
        assert_eq!(a.ticks, 30 * SIM_HZ as u64);
    }

    #[test]
    fn test_autopilot_passes_obstacles() {
        let report = run_headless(&config(1, 20.0), &Settings::default());
        assert_eq!(report.runs, 1, "autopilot should survive: {:?}", report);
        assert!(report.best_score >= 1, "{:?}", report);
        assert!(report.obstacles_spawned >= 5);
    }

    #[test]
    fn test_restarts_after_death() {
        // Hold off the autopilot so the player falls into the ground
        let mut state = GameState::new(4);
        tick(&mut state, &TickInput { tap: true, autopilot: false }, SIM_DT);
        while state.phase != GamePhase::Dead {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.game_over_visible);

        // One restart tap resets the scene
        tick(&mut state, &TickInput { tap: true, autopilot: false }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Initial);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_particles_respect_settings() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let report = run_headless(&config(2, 10.0), &settings);
        assert_eq!(report.peak_particles, 0);
    }
}
