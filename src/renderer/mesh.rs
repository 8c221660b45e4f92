//! Surface that tessellates draw calls into a triangle list
//!
//! Output is ready for a GPU vertex buffer (see [`super::vertex::as_bytes`]).
//! Text has no geometry here and is dropped.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::{Rgba, Sprite, Surface, TextAlign};

/// Minimum circle segments (tiny particles)
const MIN_SEGMENTS: u32 = 6;
/// Maximum circle segments (clouds)
const MAX_SEGMENTS: u32 = 32;

#[derive(Debug, Clone, Default)]
pub struct MeshSurface {
    pub vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// More segments for bigger circles
fn segments_for(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

impl Surface for MeshSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.vertices
            .extend(shapes::rotated_rect(min + size / 2.0, size, 0.0, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::circle(center, radius, color, segments_for(radius)));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        let rot = Vec2::from_angle(rotation);
        for part in sprite.parts() {
            let part_center = center + rot.rotate(part.min + part.size / 2.0);
            self.vertices
                .extend(shapes::rotated_rect(part_center, part.size, rotation, part.color));
        }
    }

    fn fill_text(&mut self, text: &str, _pos: Vec2, _size_px: f32, _align: TextAlign, _color: Rgba) {
        log::trace!("MeshSurface skipping text {:?}", text);
    }
}
