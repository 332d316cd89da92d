//! Obstacle spawning and motion
//!
//! One pair right away when the spawner starts, then one every
//! `SPAWN_INTERVAL_TICKS`. Every piece of a pair shares the pair's x and
//! moves left at `OBSTACLE_SPEED` until the crossing is complete.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Obstacle};
use crate::consts::*;

/// Repeating spawn timer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub active: bool,
    /// Ticks until the next spawn (0 = spawn on the next update)
    pub ticks_until_next: u32,
}

impl Spawner {
    pub fn start(&mut self) {
        self.active = true;
        self.ticks_until_next = 0;
    }
}

/// Allowed range for the centre of the opening
pub fn gap_center_range() -> RangeInclusive<f32> {
    GAP_CENTER_MIN..=GAP_CENTER_MAX
}

/// Spawn one obstacle pair off the right edge; returns its pair number
pub fn spawn_obstacle(state: &mut GameState) -> u32 {
    let gap_center = state.rng.random_range(gap_center_range());
    let top = state.next_entity_id();
    let bottom = state.next_entity_id();
    let zone = state.next_entity_id();
    let pair = state.next_pair_number();

    state.obstacles.push(Obstacle {
        pair,
        start_x: OBSTACLE_SPAWN_X,
        x: OBSTACLE_SPAWN_X,
        vel_x: -OBSTACLE_SPEED,
        gap_center,
        age_ticks: 0,
        top,
        bottom,
        zone: Some(zone),
    });
    state.events.push(GameEvent::ObstacleSpawned { pair });
    log::debug!("Spawned pair {} with gap at {:.1}", pair, gap_center);

    pair
}

/// Run the spawn timer for one tick
pub fn update_spawner(state: &mut GameState) {
    if !state.spawner.active {
        return;
    }
    if state.spawner.ticks_until_next == 0 {
        spawn_obstacle(state);
        state.spawner.ticks_until_next = SPAWN_INTERVAL_TICKS;
    }
    state.spawner.ticks_until_next -= 1;
}

/// Move every obstacle one tick and drop the ones that finished crossing
pub fn advance_obstacles(state: &mut GameState) {
    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }
    state.obstacles.retain(|o| {
        if o.finished() {
            log::trace!("Pair {} left the screen at x={:.1}", o.pair, o.x);
        }
        !o.finished()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PillarSide;
    use proptest::prelude::*;

    #[test]
    fn test_spawner_fires_immediately_then_on_interval() {
        let mut state = GameState::new(3);
        state.spawner.start();

        let mut spawn_ticks = Vec::new();
        for t in 0..(SPAWN_INTERVAL_TICKS * 2 + 1) {
            let before = state.obstacles.len();
            update_spawner(&mut state);
            if state.obstacles.len() > before {
                spawn_ticks.push(t);
            }
        }
        assert_eq!(spawn_ticks, vec![0, SPAWN_INTERVAL_TICKS, SPAWN_INTERVAL_TICKS * 2]);
    }

    #[test]
    fn test_inactive_spawner_does_nothing() {
        let mut state = GameState::new(3);
        for _ in 0..1000 {
            update_spawner(&mut state);
        }
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_is_off_screen_right() {
        let mut state = GameState::new(3);
        spawn_obstacle(&mut state);
        let obstacle = &state.obstacles[0];
        assert!(obstacle.x - PILLAR_WIDTH / 2.0 >= SCREEN_WIDTH);
        assert!(obstacle.zone.is_some());
        assert!(state.events.contains(&GameEvent::ObstacleSpawned { pair: 0 }));
    }

    #[test]
    fn test_crossing_takes_configured_duration() {
        let mut state = GameState::new(3);
        spawn_obstacle(&mut state);

        for _ in 0..OBSTACLE_CROSS_TICKS - 1 {
            advance_obstacles(&mut state);
        }
        assert_eq!(state.obstacles.len(), 1);

        advance_obstacles(&mut state);
        assert!(state.obstacles.is_empty());

        // Elapsed time equals travel distance over speed
        let elapsed = OBSTACLE_CROSS_TICKS as f32 / SIM_HZ as f32;
        assert!((elapsed - OBSTACLE_TRAVEL / OBSTACLE_SPEED).abs() < 1e-4);
        assert!((elapsed - 6.2).abs() < 1e-4);
    }

    #[test]
    fn test_final_positions_at_removal() {
        let mut state = GameState::new(3);
        spawn_obstacle(&mut state);
        let mut obstacle = state.obstacles[0].clone();
        for _ in 0..OBSTACLE_CROSS_TICKS {
            obstacle.advance();
        }
        assert!((obstacle.x - (-PILLAR_WIDTH)).abs() < 1e-2);
        assert!(obstacle.x + PILLAR_WIDTH / 2.0 <= 0.0);

        // The score zone trails by SCORE_ZONE_OFFSET, so its right edge is
        // still on screen when the pair is dropped
        let zone = obstacle.zone_center();
        assert!((zone.x - (SCORE_ZONE_OFFSET - PILLAR_WIDTH)).abs() < 1e-2);
        assert!(zone.x + SCORE_ZONE_WIDTH / 2.0 > 0.0);
        assert!(obstacle.zone.is_some(), "unconsumed zone leaves with the pair");

        state.obstacles[0] = obstacle;
        state.obstacles[0].age_ticks -= 1;
        advance_obstacles(&mut state);
        assert!(state.obstacles.is_empty(), "zone removed together with the pillars");
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..5 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center).collect();
        let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    proptest! {
        #[test]
        fn prop_gap_center_in_range(seed in any::<u64>(), spawns in 1usize..20) {
            let mut state = GameState::new(seed);
            for _ in 0..spawns {
                spawn_obstacle(&mut state);
            }
            for obstacle in &state.obstacles {
                prop_assert!(gap_center_range().contains(&obstacle.gap_center));

                let top = obstacle.pillar_center(PillarSide::Top);
                let bottom = obstacle.pillar_center(PillarSide::Bottom);
                let opening = (top.y - PILLAR_HEIGHT / 2.0) - (bottom.y + PILLAR_HEIGHT / 2.0);
                prop_assert!((opening - PILLAR_GAP).abs() < 1e-3);
                prop_assert_eq!(top.x, bottom.x);
                prop_assert_eq!(obstacle.zone_center().x - top.x, SCORE_ZONE_OFFSET);
            }
        }
    }
}
