//! Game state and core simulation types
//!
//! The whole scene lives in one owned `GameState`. Bodies are addressed by
//! `EntityId`; a stale id simply fails to resolve.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Particle;
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap, player frozen in place, logo showing
    Initial,
    /// Player falling, obstacles spawning
    Playing,
    /// Player gone, world frozen, game-over overlay showing
    Dead,
}

/// Typed identifier for every body in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which half of an obstacle pair a pillar is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PillarSide {
    /// Hangs from above, drawn rotated 180°
    Top,
    /// Stands on the ground
    Bottom,
}

/// Classification used by the contact handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Pillar(PillarSide),
    /// Invisible pass-through region that awards a point
    ScoreZone,
    Ground,
}

impl BodyKind {
    /// Solid bodies kill the player on contact
    pub fn is_solid(&self) -> bool {
        matches!(self, BodyKind::Pillar(_) | BodyKind::Ground)
    }
}

/// The player's flyer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual tilt (radians, positive = nose up)
    pub rotation: f32,
    /// Static until the intro finishes; gravity and flaps only act when dynamic
    pub dynamic: bool,
}

impl Player {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            rotation: 0.0,
            dynamic: false,
        }
    }

    /// Zero vertical velocity, then apply the upward impulse.
    /// Returns false (and does nothing) while the body is static.
    pub fn flap(&mut self) -> bool {
        if !self.dynamic {
            return false;
        }
        self.vel.y = 0.0;
        self.vel.y += FLAP_VELOCITY;
        true
    }

    /// Integrate gravity and ease the tilt toward the current climb rate
    pub fn integrate(&mut self, dt: f32) {
        if self.dynamic {
            self.vel.y -= GRAVITY * dt;
            self.pos += self.vel * dt;
        }

        let target = self.vel.y * PLAYER_TILT_FACTOR;
        let blend = (dt / PLAYER_TILT_SECS).min(1.0);
        self.rotation += (target - self.rotation) * blend;
    }
}

/// A top/bottom pillar pair plus its score zone, all sharing one x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Pair number (spawn order)
    pub pair: u32,
    pub start_x: f32,
    /// Centre x shared by both pillars
    pub x: f32,
    /// Horizontal velocity (negative = leftward)
    pub vel_x: f32,
    /// Centre of the opening between the pillars
    pub gap_center: f32,
    pub age_ticks: u32,
    pub top: EntityId,
    pub bottom: EntityId,
    /// Cleared once the player has passed through
    pub zone: Option<EntityId>,
}

impl Obstacle {
    /// Advance one tick along the crossing
    pub fn advance(&mut self) {
        self.age_ticks += 1;
        self.x = self.start_x + self.vel_x * (self.age_ticks as f32 / SIM_HZ as f32);
    }

    /// True once the full crossing distance has been covered
    pub fn finished(&self) -> bool {
        self.age_ticks >= OBSTACLE_CROSS_TICKS
    }

    pub fn pillar_center(&self, side: PillarSide) -> Vec2 {
        let offset = PILLAR_GAP / 2.0 + PILLAR_HEIGHT / 2.0;
        match side {
            PillarSide::Top => Vec2::new(self.x, self.gap_center + offset),
            PillarSide::Bottom => Vec2::new(self.x, self.gap_center - offset),
        }
    }

    pub fn zone_center(&self) -> Vec2 {
        Vec2::new(self.x + SCORE_ZONE_OFFSET, SCREEN_HEIGHT / 2.0)
    }

    /// Classify `id` if it is one of this obstacle's live pieces
    pub fn kind_of(&self, id: EntityId) -> Option<BodyKind> {
        if id == self.top {
            Some(BodyKind::Pillar(PillarSide::Top))
        } else if id == self.bottom {
            Some(BodyKind::Pillar(PillarSide::Bottom))
        } else if self.zone == Some(id) {
            Some(BodyKind::ScoreZone)
        } else {
            None
        }
    }
}

/// Scrolling solid strip along the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub id: EntityId,
    /// Scroll offset in [0, SCREEN_WIDTH)
    pub scroll: f32,
}

/// Things the front end reacts to (sounds, HUD, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted,
    PlayerActivated,
    ObstacleSpawned { pair: u32 },
    Scored { score: u32 },
    PlayerDied { pos: Vec2 },
    MusicStarted,
    MusicStopped,
    SceneReset { seed: u64 },
}

/// Complete scene state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Scene seed for reproducibility
    pub seed: u64,
    /// Drives gap placement and the next scene's seed
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// World speed multiplier; 0 freezes motion, spawning and scrolling
    pub speed: f32,
    /// `None` once the player has been removed
    pub player: Option<Player>,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    pub ground: Ground,
    /// Backdrop scroll offset in [0, SCREEN_WIDTH)
    pub backdrop_scroll: f32,
    /// Ticks since the first tap while the intro sequence runs
    pub intro_ticks: Option<u32>,
    pub logo_alpha: f32,
    pub logo_visible: bool,
    pub game_over_visible: bool,
    pub music_playing: bool,
    pub spawner: Spawner,
    /// Bodies overlapping the player as of the last tick
    pub touching: Vec<EntityId>,
    /// Events since the front end last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    next_id: u32,
    next_pair: u32,
}

impl GameState {
    /// Create a fresh scene with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Initial,
            score: 0,
            time_ticks: 0,
            speed: 1.0,
            player: None,
            obstacles: Vec::new(),
            ground: Ground {
                id: EntityId(0),
                scroll: 0.0,
            },
            backdrop_scroll: 0.0,
            intro_ticks: None,
            logo_alpha: 1.0,
            logo_visible: true,
            game_over_visible: false,
            music_playing: true,
            spawner: Spawner::default(),
            touching: Vec::new(),
            events: vec![GameEvent::MusicStarted],
            particles: Vec::new(),
            next_id: 1,
            next_pair: 0,
        };

        let player_id = state.next_entity_id();
        state.player = Some(Player::new(player_id));
        state.ground.id = state.next_entity_id();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate the next obstacle pair number
    pub fn next_pair_number(&mut self) -> u32 {
        let pair = self.next_pair;
        self.next_pair += 1;
        pair
    }

    /// Resolve an id to the kind of live body it names
    pub fn body_kind(&self, id: EntityId) -> Option<BodyKind> {
        if self.player.as_ref().is_some_and(|p| p.id == id) {
            return Some(BodyKind::Player);
        }
        if self.ground.id == id {
            return Some(BodyKind::Ground);
        }
        self.obstacles.iter().find_map(|o| o.kind_of(id))
    }

    /// Remove a score zone; returns false if it was already gone
    pub fn remove_zone(&mut self, id: EntityId) -> bool {
        for obstacle in &mut self.obstacles {
            if obstacle.zone == Some(id) {
                obstacle.zone = None;
                return true;
            }
        }
        false
    }

    /// Remove the player from the simulation for good
    pub fn remove_player(&mut self) -> Option<Player> {
        self.player.take()
    }

    pub fn is_frozen(&self) -> bool {
        self.speed == 0.0
    }

    /// Score label text as shown in the HUD
    pub fn score_label(&self) -> String {
        format!("SCORE : {}", self.score)
    }

    /// Hand pending events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Initial);
        assert_eq!(state.score, 0);
        assert_eq!(state.score_label(), "SCORE : 0");
        assert!(state.logo_visible);
        assert!(!state.game_over_visible);
        assert!(state.music_playing);
        assert_eq!(state.events, vec![GameEvent::MusicStarted]);

        let player = state.player.as_ref().expect("player spawned");
        assert!(!player.dynamic);
        assert_eq!(player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_ids_resolve_by_value() {
        let state = GameState::new(7);
        let player_id = state.player.as_ref().map(|p| p.id).unwrap();
        assert_ne!(player_id, state.ground.id);
        assert_eq!(state.body_kind(player_id), Some(BodyKind::Player));
        assert_eq!(state.body_kind(state.ground.id), Some(BodyKind::Ground));
        assert_eq!(state.body_kind(EntityId(999)), None);
    }

    #[test]
    fn test_removed_player_no_longer_resolves() {
        let mut state = GameState::new(7);
        let id = state.player.as_ref().map(|p| p.id).unwrap();
        assert!(state.remove_player().is_some());
        assert_eq!(state.body_kind(id), None);
        assert!(state.remove_player().is_none());
    }

    #[test]
    fn test_static_player_ignores_flap_and_gravity() {
        let mut player = Player::new(EntityId(1));
        assert!(!player.flap());
        player.integrate(SIM_DT);
        assert_eq!(player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_flap_resets_fall_speed() {
        let mut player = Player::new(EntityId(1));
        player.dynamic = true;
        player.vel.y = -500.0;
        assert!(player.flap());
        assert_eq!(player.vel.y, FLAP_VELOCITY);

        // A second flap mid-climb gives the same velocity, not double
        player.flap();
        assert_eq!(player.vel.y, FLAP_VELOCITY);
    }

    #[test]
    fn test_tilt_follows_climb_rate() {
        let mut player = Player::new(EntityId(1));
        player.dynamic = true;
        player.flap();
        for _ in 0..6 {
            player.integrate(SIM_DT);
        }
        assert!(player.rotation > 0.0);

        player.vel.y = -400.0;
        for _ in 0..120 {
            player.integrate(SIM_DT);
        }
        assert!(player.rotation < 0.0);
    }

    #[test]
    fn test_obstacle_geometry() {
        let obstacle = Obstacle {
            pair: 0,
            start_x: OBSTACLE_SPAWN_X,
            x: OBSTACLE_SPAWN_X,
            vel_x: -OBSTACLE_SPEED,
            gap_center: 400.0,
            age_ticks: 0,
            top: EntityId(10),
            bottom: EntityId(11),
            zone: Some(EntityId(12)),
        };
        let top = obstacle.pillar_center(PillarSide::Top);
        let bottom = obstacle.pillar_center(PillarSide::Bottom);
        let opening = (top.y - PILLAR_HEIGHT / 2.0) - (bottom.y + PILLAR_HEIGHT / 2.0);
        assert!((opening - PILLAR_GAP).abs() < 1e-3);
        assert_eq!(obstacle.zone_center().x - obstacle.x, SCORE_ZONE_OFFSET);
        assert_eq!(obstacle.kind_of(EntityId(12)), Some(BodyKind::ScoreZone));
        assert_eq!(obstacle.kind_of(EntityId(13)), None);
    }
}
