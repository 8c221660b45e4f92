//! Shape generation for 2D primitives (triangle lists)

use glam::Vec2;
use std::f32::consts::PI;

use super::Rgba;
use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
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

/// Two triangles covering a quad given in winding order
pub fn quad(corners: [Vec2; 4], color: Rgba) -> Vec<Vertex> {
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

/// Rectangle of `size` centered on `center`, rotated by `rotation` radians
pub fn rotated_rect(center: Vec2, size: Vec2, rotation: f32, color: Rgba) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(rotation);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rot.rotate(c));
    quad(corners, color)
}

/// Line segment drawn as a thin quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: Rgba) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad([from + perp, to + perp, to - perp, from - perp], color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(5.0, 5.0), 2.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        for v in verts.iter().skip(1).step_by(3) {
            let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
            assert!((d - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        let verts = rotated_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), PI / 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        // Width now runs along y
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((max_y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_line() {
        let verts = line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.position == [1.0, 1.0]));
    }
}
