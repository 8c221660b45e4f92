//! Observable side effects of a simulation step
//!
//! Simulations never talk to audio or the DOM directly. They queue events and
//! the host drains them after each frame.

use serde::{Deserialize, Serialize};

use super::fireworks::FireworkColor;

/// Sound a simulation wants played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// A firework burst, voiced by its color
    FireworkBurst(FireworkColor),
    /// Collectible caught by the paddle
    Collect,
    /// Hazard hit the paddle
    Explode,
}

/// Event emitted during an update step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Sound(SoundEffect),
    /// Score or lives changed (also sent on reset)
    ScoreChanged { score: u64, lives: u8 },
    /// The last life was lost
    GameOver { score: u64 },
}
