//! Fixed timestep simulation tick
//!
//! Core game loop that advances the scene deterministically, plus the tap and
//! contact handlers that drive the phase machine.

use rand::Rng;

use super::autopilot;
use super::collision::{Contact, begin_contacts};
use super::effects::{spawn_explosion, update_particles};
use super::spawner::{advance_obstacles, update_spawner};
use super::state::{BodyKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A tap/click/touch/key press happened; position is irrelevant
    pub tap: bool,
    /// Idle/demo mode - autopilot supplies the taps
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let tap = input.tap || (input.autopilot && autopilot::wants_tap(state));
    if tap {
        handle_tap(state);
    }

    state.time_ticks += 1;
    let world_dt = dt * state.speed;

    update_intro(state);

    if let Some(player) = state.player.as_mut() {
        player.integrate(world_dt);
    }

    if !state.is_frozen() {
        update_spawner(state);
        advance_obstacles(state);
        scroll_scenery(state, world_dt);
    }

    for contact in begin_contacts(state) {
        handle_contact(state, contact);
    }

    update_particles(&mut state.particles, dt);
}

/// React to a tap according to the current phase
pub fn handle_tap(state: &mut GameState) {
    match state.phase {
        GamePhase::Initial => start_game(state),
        GamePhase::Playing => {
            if let Some(player) = state.player.as_mut() {
                player.flap();
            }
        }
        GamePhase::Dead => reset_scene(state),
    }
}

/// Initial → Playing: begin the intro (logo fade, then the player goes live)
fn start_game(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.intro_ticks = Some(0);
    state.events.push(GameEvent::GameStarted);
    log::info!("Game started (seed {})", state.seed);
}

/// Dead → Initial: swap in a brand new scene
fn reset_scene(state: &mut GameState) {
    let seed = state.rng.random::<u64>();
    *state = GameState::new(seed);
    state.events.push(GameEvent::SceneReset { seed });
    log::info!("Scene reset with seed {}", seed);
}

/// Logo fade, pause, then make the player dynamic and start spawning
fn update_intro(state: &mut GameState) {
    let Some(ticks) = state.intro_ticks else {
        return;
    };
    let ticks = ticks + 1;

    state.logo_alpha = 1.0 - (ticks as f32 / INTRO_FADE_TICKS as f32).min(1.0);

    if ticks >= INTRO_FADE_TICKS + INTRO_WAIT_TICKS {
        state.intro_ticks = None;
        state.logo_visible = false;
        if let Some(player) = state.player.as_mut() {
            player.dynamic = true;
        }
        state.spawner.start();
        state.events.push(GameEvent::PlayerActivated);
        log::debug!("Player activated at tick {}", state.time_ticks);
    } else {
        state.intro_ticks = Some(ticks);
    }
}

/// Loop the backdrop and ground scroll offsets
fn scroll_scenery(state: &mut GameState, dt: f32) {
    let ground_speed = SCREEN_WIDTH / GROUND_LOOP_SECS;
    let backdrop_speed = SCREEN_WIDTH / BACKDROP_LOOP_SECS;
    state.ground.scroll = (state.ground.scroll + ground_speed * dt).rem_euclid(SCREEN_WIDTH);
    state.backdrop_scroll = (state.backdrop_scroll + backdrop_speed * dt).rem_euclid(SCREEN_WIDTH);
}

/// Begin-contact handler
///
/// Stale ids (a body already removed earlier this tick) are ignored, as are
/// contacts that don't involve the player or arrive after death.
pub fn handle_contact(state: &mut GameState, contact: Contact) {
    let (Some(kind_a), Some(kind_b)) = (state.body_kind(contact.a), state.body_kind(contact.b))
    else {
        log::trace!("Ignoring contact {} / {}: body gone", contact.a, contact.b);
        return;
    };
    if state.phase != GamePhase::Playing {
        return;
    }

    let (other, other_kind) = match (kind_a, kind_b) {
        (BodyKind::Player, kind) => (contact.b, kind),
        (kind, BodyKind::Player) => (contact.a, kind),
        _ => return,
    };

    if other_kind == BodyKind::ScoreZone {
        state.remove_zone(other);
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
        log::debug!("Scored through zone {} ({})", other, state.score_label());
        return;
    }

    if other_kind.is_solid() {
        kill_player(state);
    }
}

/// Playing → Dead
fn kill_player(state: &mut GameState) {
    let Some(player) = state.remove_player() else {
        return;
    };

    spawn_explosion(&mut state.particles, player.pos);
    state.events.push(GameEvent::PlayerDied { pos: player.pos });
    state.game_over_visible = true;
    state.music_playing = false;
    state.events.push(GameEvent::MusicStopped);
    state.speed = 0.0;
    state.phase = GamePhase::Dead;
    log::info!("Player died with {}", state.score_label());
}
