//! Point-body physics shared by rockets and burst particles
//!
//! Constants are tuned per frame, not per second: one call to [`integrate`]
//! is one display refresh.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A drag- and gravity-affected point with a countdown life and shrinking size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Multiplicative velocity damping per frame (< 1)
    pub drag: f32,
    /// Downward acceleration per frame (screen y grows downward)
    pub gravity: f32,
    /// Frames remaining; the body is spent at 0
    pub life: u32,
    pub size: f32,
    /// Multiplicative size change per frame (1.0 = constant)
    pub size_decay: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, drag: f32, gravity: f32, life: u32, size: f32) -> Self {
        Self {
            pos,
            vel,
            drag,
            gravity,
            life,
            size,
            size_decay: 1.0,
        }
    }

    /// Builder-style size decay
    pub fn with_size_decay(mut self, size_decay: f32) -> Self {
        self.size_decay = size_decay;
        self
    }

    /// Advance in place by one frame
    #[inline]
    pub fn step(&mut self) {
        *self = integrate(self);
    }

    pub fn is_spent(&self) -> bool {
        self.life == 0
    }

    /// Opacity for drawing: remaining life over the life that maps to fully opaque
    pub fn alpha(&self, full_life: f32) -> f32 {
        (self.life as f32 / full_life).clamp(0.0, 1.0)
    }
}

/// One frame of motion. Pure: returns the next state.
pub fn integrate(body: &Body) -> Body {
    let mut vel = body.vel * body.drag;
    vel.y += body.gravity;
    Body {
        pos: body.pos + vel,
        vel,
        life: body.life.saturating_sub(1),
        size: body.size * body.size_decay,
        ..*body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate_order() {
        // drag applies before gravity, position uses the updated velocity
        let body = Body::new(Vec2::new(10.0, 20.0), Vec2::new(2.0, -4.0), 0.5, 1.0, 3, 2.0)
            .with_size_decay(0.5);
        let next = integrate(&body);

        assert_eq!(next.vel, Vec2::new(1.0, -1.0));
        assert_eq!(next.pos, Vec2::new(11.0, 19.0));
        assert_eq!(next.life, 2);
        assert_eq!(next.size, 1.0);
        // Input untouched
        assert_eq!(body.life, 3);
    }

    #[test]
    fn test_life_saturates_at_zero() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, 1.0, 0.0, 1, 1.0);
        body.step();
        assert!(body.is_spent());
        body.step();
        assert_eq!(body.life, 0);
    }

    #[test]
    fn test_alpha_fades_with_life() {
        let body = Body::new(Vec2::ZERO, Vec2::ZERO, 1.0, 0.0, 50, 1.0);
        assert!((body.alpha(100.0) - 0.5).abs() < 1e-6);
        let body = Body { life: 150, ..body };
        assert_eq!(body.alpha(100.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_life_and_size_never_grow(
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            drag in 0.5f32..1.0,
            life in 0u32..200,
            size in 0.0f32..10.0,
            decay in 0.5f32..=1.0,
            frames in 1usize..50,
        ) {
            let mut body = Body::new(Vec2::ZERO, Vec2::new(vx, vy), drag, 0.05, life, size)
                .with_size_decay(decay);
            for _ in 0..frames {
                let before = body;
                body.step();
                prop_assert!(body.life <= before.life);
                if before.life > 0 {
                    prop_assert!(body.life < before.life);
                }
                prop_assert!(body.size <= before.size);
            }
        }
    }
}
