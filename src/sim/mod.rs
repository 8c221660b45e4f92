//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update call per frame, constants tuned per frame
//! - Seeded (or injected) RNG only
//! - Side effects queued as events, never performed
//! - No rendering or platform dependencies

pub mod body;
pub mod catch;
pub mod collision;
pub mod events;
pub mod fireworks;

pub use body::{Body, integrate};
pub use catch::{CatchEntity, CatchGame, ExplosionParticle, FallingItem, GamePhase, GameSession, ItemKind, Paddle};
pub use collision::{Aabb, aabb_overlap};
pub use events::{SimEvent, SoundEffect};
pub use fireworks::{Firework, FireworkColor, FireworkState, FireworksShow, PALETTE, Particle};

#[cfg(test)]
pub(crate) mod test_support {
    use rand::RngCore;

    /// RNG that returns the same bits forever
    #[derive(Debug, Clone, Copy)]
    pub struct FixedRng(pub u64);

    impl FixedRng {
        /// All-zero draws: every Bernoulli trial succeeds, ranges yield their low end
        pub const ALWAYS: FixedRng = FixedRng(0);
        /// Mid-range draws: low-probability trials never succeed
        pub const NEVER: FixedRng = FixedRng(u64::MAX / 2);
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            let bytes = self.0.to_le_bytes();
            for (i, b) in dst.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }
}
