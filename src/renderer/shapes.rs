//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle from its min/max corners
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
    quad(corners, color)
}

/// Filled rectangle of `size` centred on `center`, rotated by `angle` radians
/// (counter-clockwise) about `pivot`
pub fn rotated_rect(
    center: Vec2,
    size: Vec2,
    pivot: Vec2,
    angle: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corners = [
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
    ]
    .map(|c| pivot + rot.rotate(c - pivot));
    quad(corners, color)
}

/// Two triangles covering four corners given in winding order
fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 5.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 5.0);
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        // 4x2 box rotated 90° about its centre becomes 2x4
        let verts = rotated_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), Vec2::ZERO, PI / 2.0, [1.0; 4]);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((max_x - 1.0).abs() < 1e-5);
        assert!((max_y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 16).len(), 48);
    }
}
