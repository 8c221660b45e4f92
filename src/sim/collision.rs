//! Axis-aligned box collision for the catch game
//!
//! Boxes are described by center and size, matching how items and the paddle
//! store their geometry. Touching edges count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        aabb_overlap(self, other)
    }
}

/// True unless one box lies entirely to one side of the other
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.min.x > b.max.x || a.max.x < b.min.x || a.min.y > b.max.y || a.max.y < b.min.y)
}
