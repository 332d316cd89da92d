//! Scene tessellation
//!
//! Turns a `GameState` into one triangle list in screen units (origin at the
//! bottom-left, y up). Draw order is back to front.

use glam::Vec2;

use super::shapes::{circle, rect, rotated_rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, PARTICLE_SMOKE, PillarSide, Player};

/// Depth of the lip at the open end of each pillar
const CAP_HEIGHT: f32 = 24.0;
const CAP_OVERHANG: f32 = 3.0;
/// Grass band along the top of the ground
const GRASS_HEIGHT: f32 = 14.0;
const STRIPE_SPACING: f32 = 24.0;

/// Backdrop pieces within one screen-wide tile: (x, width, height)
const CITY_BLOCKS: [(f32, f32, f32); 8] = [
    (0.0, 46.0, 70.0),
    (52.0, 30.0, 104.0),
    (88.0, 58.0, 58.0),
    (150.0, 36.0, 88.0),
    (198.0, 64.0, 64.0),
    (270.0, 28.0, 112.0),
    (310.0, 70.0, 76.0),
    (392.0, 80.0, 94.0),
];
/// (x, y above ground, radius)
const CLOUDS: [(f32, f32, f32); 7] = [
    (20.0, 132.0, 34.0),
    (70.0, 124.0, 42.0),
    (130.0, 136.0, 30.0),
    (200.0, 128.0, 38.0),
    (270.0, 134.0, 32.0),
    (340.0, 122.0, 44.0),
    (420.0, 130.0, 36.0),
];

/// Everything visible this frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    vertices.extend(rect(
        Vec2::ZERO,
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        colors::SKY,
    ));
    backdrop(&mut vertices, state.backdrop_scroll);
    for obstacle in &state.obstacles {
        pillar(&mut vertices, obstacle, PillarSide::Top);
        pillar(&mut vertices, obstacle, PillarSide::Bottom);
    }
    ground(&mut vertices, state.ground.scroll);
    if let Some(player) = state.player.as_ref() {
        flyer(&mut vertices, player);
    }
    particles(&mut vertices, state, settings.max_particles());

    vertices
}

fn backdrop(out: &mut Vec<Vertex>, scroll: f32) {
    // Two tiles side by side so the loop seam never shows
    for tile in [-scroll, SCREEN_WIDTH - scroll] {
        for &(x, y, r) in &CLOUDS {
            out.extend(circle(
                Vec2::new(tile + x, GROUND_HEIGHT + y),
                r,
                colors::CLOUD,
                20,
            ));
        }
        for &(x, w, h) in &CITY_BLOCKS {
            out.extend(rect(
                Vec2::new(tile + x, GROUND_HEIGHT),
                Vec2::new(tile + x + w, GROUND_HEIGHT + h),
                colors::CITY,
            ));
        }
        for i in 0..8 {
            let x = tile + i as f32 * 64.0 + 20.0;
            out.extend(circle(Vec2::new(x, GROUND_HEIGHT), 30.0, colors::BUSH, 16));
        }
    }
}

fn pillar(out: &mut Vec<Vertex>, obstacle: &Obstacle, side: PillarSide) {
    let center = obstacle.pillar_center(side);
    let half = Vec2::new(PILLAR_WIDTH, PILLAR_HEIGHT) / 2.0;
    let min = center - half;
    let max = center + half;

    out.extend(rect(min, max, colors::PILLAR));
    out.extend(rect(
        Vec2::new(max.x - 10.0, min.y),
        max,
        colors::PILLAR_SHADE,
    ));

    // Lip faces the opening
    let (cap_min_y, cap_max_y) = match side {
        PillarSide::Top => (min.y, min.y + CAP_HEIGHT),
        PillarSide::Bottom => (max.y - CAP_HEIGHT, max.y),
    };
    out.extend(rect(
        Vec2::new(min.x - CAP_OVERHANG, cap_min_y),
        Vec2::new(max.x + CAP_OVERHANG, cap_max_y),
        colors::PILLAR_CAP,
    ));
}

fn ground(out: &mut Vec<Vertex>, scroll: f32) {
    out.extend(rect(
        Vec2::ZERO,
        Vec2::new(SCREEN_WIDTH, GROUND_HEIGHT),
        colors::GROUND,
    ));
    let grass_min = GROUND_HEIGHT - GRASS_HEIGHT;
    out.extend(rect(
        Vec2::new(0.0, grass_min),
        Vec2::new(SCREEN_WIDTH, GROUND_HEIGHT),
        colors::GROUND_GRASS,
    ));

    let mut x = -(scroll % STRIPE_SPACING);
    while x < SCREEN_WIDTH {
        out.extend(rect(
            Vec2::new(x, grass_min),
            Vec2::new(x + STRIPE_SPACING / 2.0, GROUND_HEIGHT),
            colors::GROUND_STRIPE,
        ));
        x += STRIPE_SPACING;
    }
}

fn flyer(out: &mut Vec<Vertex>, player: &Player) {
    let pos = player.pos;
    let rot = Vec2::from_angle(player.rotation);
    let at = |offset: Vec2| pos + rot.rotate(offset);
    let r = PLAYER_RADIUS;

    out.extend(circle(pos, r * 1.15, colors::PLAYER_BODY, 24));
    out.extend(rotated_rect(
        at(Vec2::new(-r * 0.5, -r * 0.1)),
        Vec2::new(r * 0.9, r * 0.55),
        at(Vec2::new(-r * 0.5, -r * 0.1)),
        player.rotation,
        colors::PLAYER_WING,
    ));
    out.extend(rotated_rect(
        at(Vec2::new(r * 1.05, -r * 0.25)),
        Vec2::new(r * 0.8, r * 0.45),
        at(Vec2::new(r * 1.05, -r * 0.25)),
        player.rotation,
        colors::PLAYER_BEAK,
    ));
    out.extend(circle(at(Vec2::new(r * 0.45, r * 0.4)), r * 0.38, colors::PLAYER_EYE, 12));
    out.extend(circle(at(Vec2::new(r * 0.6, r * 0.4)), r * 0.16, colors::PLAYER_PUPIL, 8));
}

fn particles(out: &mut Vec<Vertex>, state: &GameState, cap: usize) {
    let skip = state.particles.len().saturating_sub(cap);
    for particle in state.particles.iter().skip(skip) {
        let mut color = if particle.color == PARTICLE_SMOKE {
            colors::SMOKE
        } else {
            colors::FIRE
        };
        color[3] = particle.life.clamp(0.0, 1.0);
        out.extend(circle(particle.pos, particle.size, color, 8));
    }
}
