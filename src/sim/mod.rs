//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, begin_contacts, body_shapes, circle_aabb_overlap};
pub use effects::{MAX_PARTICLES, PARTICLE_FIRE, PARTICLE_SMOKE, Particle};
pub use spawner::{Spawner, gap_center_range, spawn_obstacle};
pub use state::{
    BodyKind, EntityId, GameEvent, GamePhase, GameState, Ground, Obstacle, PillarSide, Player,
};
pub use tick::{TickInput, handle_contact, handle_tap, tick};
