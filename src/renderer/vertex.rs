//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const CLOUD: [f32; 4] = [0.93, 0.97, 0.95, 1.0];
    pub const CITY: [f32; 4] = [0.58, 0.85, 0.78, 1.0];
    pub const BUSH: [f32; 4] = [0.37, 0.78, 0.35, 1.0];
    pub const PILLAR: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PILLAR_CAP: [f32; 4] = [0.55, 0.85, 0.25, 1.0];
    pub const PILLAR_SHADE: [f32; 4] = [0.33, 0.55, 0.13, 1.0];
    pub const GROUND: [f32; 4] = [0.87, 0.85, 0.58, 1.0];
    pub const GROUND_GRASS: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const GROUND_STRIPE: [f32; 4] = [0.62, 0.88, 0.33, 1.0];
    pub const PLAYER_BODY: [f32; 4] = [0.98, 0.82, 0.18, 1.0];
    pub const PLAYER_WING: [f32; 4] = [0.99, 0.95, 0.75, 1.0];
    pub const PLAYER_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const PLAYER_BEAK: [f32; 4] = [0.95, 0.45, 0.15, 1.0];
    pub const FIRE: [f32; 4] = [1.0, 0.55, 0.15, 1.0];
    pub const SMOKE: [f32; 4] = [0.35, 0.33, 0.32, 1.0];
}
