//! Idle/demo mode: synthesizes taps so the game plays itself

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// How far below the gap centre to flap; a flap rises ~60 units
const FLAP_BELOW_CENTER: f32 = 28.0;

/// Height to hold when no obstacle is ahead
const CRUISE_HEIGHT: f32 = SCREEN_HEIGHT * 0.55;

/// Gap centre the player should aim for next
pub fn target_height(state: &GameState) -> f32 {
    let Some(player) = state.player.as_ref() else {
        return CRUISE_HEIGHT;
    };
    state
        .obstacles
        .iter()
        .filter(|o| o.x + PILLAR_WIDTH / 2.0 + PLAYER_RADIUS >= player.pos.x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_center)
        .unwrap_or(CRUISE_HEIGHT)
}

/// Whether the autopilot taps this tick.
///
/// Restarting from `Dead` is left to the caller so a human watching the demo
/// gets to see the game-over screen.
pub fn wants_tap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Initial => true,
        GamePhase::Playing => {
            let Some(player) = state.player.as_ref() else {
                return false;
            };
            if !player.dynamic {
                return false;
            }
            let threshold = target_height(state) - FLAP_BELOW_CENTER;
            player.pos.y < threshold && player.vel.y <= 0.0
        }
        GamePhase::Dead => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_obstacle;

    #[test]
    fn test_taps_to_start() {
        let state = GameState::new(5);
        assert!(wants_tap(&state));
    }

    #[test]
    fn test_waits_for_intro() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::Playing;
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 0.0;
        }
        assert!(!wants_tap(&state), "static player cannot flap");
    }

    #[test]
    fn test_flaps_when_low_and_falling() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::Playing;
        spawn_obstacle(&mut state);
        let gap = state.obstacles[0].gap_center;
        assert_eq!(target_height(&state), gap);

        let player = state.player.as_mut().unwrap();
        player.dynamic = true;
        player.pos.y = gap - 60.0;
        player.vel.y = -10.0;
        assert!(wants_tap(&state));

        let player = state.player.as_mut().unwrap();
        player.vel.y = 100.0;
        assert!(!wants_tap(&state), "already climbing");

        let player = state.player.as_mut().unwrap();
        player.pos.y = gap;
        player.vel.y = -10.0;
        assert!(!wants_tap(&state), "high enough");
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        let mut state = GameState::new(5);
        spawn_obstacle(&mut state);
        spawn_obstacle(&mut state);
        state.obstacles[0].x = 0.0;
        let next = state.obstacles[1].gap_center;
        assert_eq!(target_height(&state), next);
    }

    #[test]
    fn test_never_taps_when_dead() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::Dead;
        state.remove_player();
        assert!(!wants_tap(&state));
    }
}
