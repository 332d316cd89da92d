//! Contact detection
//!
//! The player is a circle; pillars, score zones and the ground are
//! axis-aligned boxes. Only the player can start a contact (everything else
//! is static with respect to everything else), and a contact is reported once
//! when the overlap begins, not every tick it persists.

use glam::Vec2;

use super::state::{EntityId, GameState, PillarSide};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Circle vs box overlap (touching edges count)
#[inline]
pub fn circle_aabb_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (center - closest).length_squared() <= radius * radius
}

/// A begin-contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

/// Every non-player body with its current box, in id order
pub fn body_shapes(state: &GameState) -> Vec<(EntityId, Aabb)> {
    let mut shapes = Vec::with_capacity(state.obstacles.len() * 3 + 1);

    // Ground is wide enough to cover the screen whatever the scroll offset
    shapes.push((
        state.ground.id,
        Aabb {
            min: Vec2::new(-SCREEN_WIDTH, 0.0),
            max: Vec2::new(SCREEN_WIDTH * 2.0, GROUND_HEIGHT),
        },
    ));

    let pillar_size = Vec2::new(PILLAR_WIDTH, PILLAR_HEIGHT);
    let zone_size = Vec2::new(SCORE_ZONE_WIDTH, SCREEN_HEIGHT);
    for obstacle in &state.obstacles {
        shapes.push((
            obstacle.top,
            Aabb::from_center(obstacle.pillar_center(PillarSide::Top), pillar_size),
        ));
        shapes.push((
            obstacle.bottom,
            Aabb::from_center(obstacle.pillar_center(PillarSide::Bottom), pillar_size),
        ));
        if let Some(zone) = obstacle.zone {
            shapes.push((zone, Aabb::from_center(obstacle.zone_center(), zone_size)));
        }
    }

    shapes.sort_by_key(|(id, _)| *id);
    shapes
}

/// Find contacts that began this tick and update the touching set.
///
/// Contacts are returned in body id order with the player as `a`.
pub fn begin_contacts(state: &mut GameState) -> Vec<Contact> {
    let Some((player_id, center)) = state.player.as_ref().map(|p| (p.id, p.pos)) else {
        state.touching.clear();
        return Vec::new();
    };

    let touching: Vec<EntityId> = body_shapes(state)
        .into_iter()
        .filter(|(_, aabb)| circle_aabb_overlap(center, PLAYER_RADIUS, aabb))
        .map(|(id, _)| id)
        .collect();

    let contacts = touching
        .iter()
        .filter(|id| !state.touching.contains(*id))
        .map(|&b| Contact { a: player_id, b })
        .collect();

    state.touching = touching;
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;

    fn obstacle_at(state: &mut GameState, x: f32, gap_center: f32) -> EntityId {
        let top = state.next_entity_id();
        let bottom = state.next_entity_id();
        let zone = state.next_entity_id();
        let pair = state.next_pair_number();
        state.obstacles.push(Obstacle {
            pair,
            start_x: x,
            x,
            vel_x: -OBSTACLE_SPEED,
            gap_center,
            age_ticks: 0,
            top,
            bottom,
            zone: Some(zone),
        });
        zone
    }

    #[test]
    fn test_circle_aabb_overlap() {
        let aabb = Aabb::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        assert!(circle_aabb_overlap(Vec2::new(100.0, 100.0), 5.0, &aabb));
        assert!(circle_aabb_overlap(Vec2::new(115.0, 100.0), 5.0, &aabb));
        assert!(!circle_aabb_overlap(Vec2::new(116.0, 100.0), 5.0, &aabb));
        // Corner: distance to (110, 110) is ~7.07
        assert!(!circle_aabb_overlap(Vec2::new(115.0, 115.0), 7.0, &aabb));
        assert!(circle_aabb_overlap(Vec2::new(115.0, 115.0), 7.1, &aabb));
    }

    #[test]
    fn test_contact_begins_once() {
        let mut state = GameState::new(1);
        let zone = obstacle_at(&mut state, PLAYER_START_X - SCORE_ZONE_OFFSET, PLAYER_START_Y);

        let contacts = begin_contacts(&mut state);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b, zone);

        // Still overlapping: no new contact
        assert!(begin_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_player_in_gap_only_touches_zone() {
        let mut state = GameState::new(1);
        // Pillars centred on the player, gap centred on the player's height
        let zone = obstacle_at(&mut state, PLAYER_START_X, PLAYER_START_Y);
        let contacts = begin_contacts(&mut state);
        assert!(contacts.is_empty(), "zone sits {SCORE_ZONE_OFFSET} to the right");

        state.obstacles[0].x = PLAYER_START_X - SCORE_ZONE_OFFSET;
        let contacts = begin_contacts(&mut state);
        assert_eq!(contacts, vec![Contact { a: state.player.as_ref().unwrap().id, b: zone }]);
    }

    #[test]
    fn test_pillar_contact() {
        let mut state = GameState::new(1);
        // Gap far above the player: bottom pillar covers the player
        obstacle_at(&mut state, PLAYER_START_X, GAP_CENTER_MAX + 200.0);
        let contacts = begin_contacts(&mut state);
        let bottom = state.obstacles[0].bottom;
        assert!(contacts.iter().any(|c| c.b == bottom));
    }

    #[test]
    fn test_ground_contact() {
        let mut state = GameState::new(1);
        if let Some(player) = state.player.as_mut() {
            player.pos.y = GROUND_HEIGHT + PLAYER_RADIUS - 1.0;
        }
        let contacts = begin_contacts(&mut state);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b, state.ground.id);
    }

    #[test]
    fn test_no_player_no_contacts() {
        let mut state = GameState::new(1);
        state.touching.push(state.ground.id);
        state.remove_player();
        assert!(begin_contacts(&mut state).is_empty());
        assert!(state.touching.is_empty());
    }
}
