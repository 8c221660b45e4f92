//! Fireworks show: rockets that ascend, burst into particles, and fade out

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::body::Body;
use super::events::{SimEvent, SoundEffect};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Launch palette, in button order
pub const PALETTE: [FireworkColor; 5] = [
    FireworkColor::Red,
    FireworkColor::Gold,
    FireworkColor::Orange,
    FireworkColor::Pink,
    FireworkColor::Blue,
];

/// Fallback for color names we don't recognize
const DEFAULT_CUSTOM_RGB: [u8; 3] = [255, 255, 255];

/// Common CSS color names outside the palette
const NAMED_COLORS: [(&str, [u8; 3]); 12] = [
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("purple", [128, 0, 128]),
    ("violet", [238, 130, 238]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("silver", [192, 192, 192]),
    ("crimson", [220, 20, 60]),
];

/// Firework color. Palette colors get their own burst size and voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireworkColor {
    Red,
    Gold,
    Orange,
    Pink,
    Blue,
    /// Any other color; uses default burst size and voice
    Custom([u8; 3]),
}

impl FireworkColor {
    /// Parse a palette name, a common CSS color name or `#rrggbb`. Never
    /// fails: anything else falls back to white.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        let lower = trimmed.to_lowercase();
        let named = NAMED_COLORS
            .iter()
            .find(|(css, _)| *css == lower)
            .map(|(_, rgb)| *rgb);
        match lower.as_str() {
            "red" => FireworkColor::Red,
            "gold" => FireworkColor::Gold,
            "orange" => FireworkColor::Orange,
            "pink" => FireworkColor::Pink,
            "blue" => FireworkColor::Blue,
            _ => match named.or_else(|| parse_hex_rgb(trimmed)) {
                Some(rgb) => FireworkColor::Custom(rgb),
                None => {
                    log::warn!("Unknown firework color {:?}, using default", name);
                    FireworkColor::Custom(DEFAULT_CUSTOM_RGB)
                }
            },
        }
    }

    /// Number of particles in this color's burst
    pub fn particle_count(&self) -> usize {
        match self {
            FireworkColor::Gold => 150,
            FireworkColor::Pink => 130,
            FireworkColor::Orange => 120,
            FireworkColor::Red => 110,
            FireworkColor::Blue | FireworkColor::Custom(_) => 100,
        }
    }

    /// 8-bit RGB (palette entries match their CSS named colors)
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            FireworkColor::Red => [255, 0, 0],
            FireworkColor::Gold => [255, 215, 0],
            FireworkColor::Orange => [255, 165, 0],
            FireworkColor::Pink => [255, 192, 203],
            FireworkColor::Blue => [0, 0, 255],
            FireworkColor::Custom(rgb) => *rgb,
        }
    }

    /// Linear color with the given alpha, for drawing
    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.rgb();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, alpha]
    }
}

fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// A burst particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub color: FireworkColor,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        self.body.alpha(BURST_FULL_ALPHA_LIFE)
    }
}

/// Rocket phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireworkState {
    /// Rocket in flight
    Ascending,
    /// Burst; the rocket itself no longer moves
    Exploded,
}

/// A rocket and, once it bursts, its particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firework {
    /// Rocket motion. `life` doubles as the fuse countdown.
    pub body: Body,
    pub color: FireworkColor,
    pub state: FireworkState,
    pub particles: Vec<Particle>,
}

impl Firework {
    /// Launch a rocket at `pos` in a random direction
    pub fn launch(pos: Vec2, color: FireworkColor, rng: &mut impl Rng) -> Self {
        let speed = rng.random_range(ROCKET_SPEED_MIN..ROCKET_SPEED_MAX);
        let angle = rng.random_range(0.0..TAU);
        Self {
            body: Body::new(
                pos,
                polar_to_cartesian(speed, angle),
                ROCKET_DRAG,
                ROCKET_GRAVITY,
                ROCKET_FUSE_FRAMES,
                ROCKET_SIZE,
            ),
            color,
            state: FireworkState::Ascending,
            particles: Vec::new(),
        }
    }

    /// Frames left before a forced explosion
    pub fn countdown(&self) -> u32 {
        self.body.life
    }

    pub fn is_exploded(&self) -> bool {
        self.state == FireworkState::Exploded
    }

    /// Burst and all particles gone; safe to drop
    pub fn is_finished(&self) -> bool {
        self.is_exploded() && self.particles.is_empty()
    }

    /// Advance one frame. Returns true on the frame the rocket bursts.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        match self.state {
            FireworkState::Ascending => {
                self.body.step();
                if self.body.is_spent() || rng.random_bool(ROCKET_EXPLODE_CHANCE) {
                    self.explode(rng);
                    return true;
                }
                false
            }
            FireworkState::Exploded => {
                for particle in &mut self.particles {
                    particle.body.step();
                }
                self.particles.retain(|p| !p.body.is_spent());
                false
            }
        }
    }

    /// Switch to the exploded state and emit this color's burst
    pub fn explode(&mut self, rng: &mut impl Rng) {
        if self.is_exploded() {
            return;
        }
        self.state = FireworkState::Exploded;

        let count = self.color.particle_count();
        self.particles.reserve(count);
        for _ in 0..count {
            let speed = rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
            let angle = rng.random_range(0.0..TAU);
            let life = rng.random_range(BURST_LIFE_MIN..BURST_LIFE_MAX);
            let size = rng.random_range(BURST_SIZE_MIN..BURST_SIZE_MAX);
            let body = Body::new(
                self.body.pos,
                polar_to_cartesian(speed, angle),
                BURST_DRAG,
                BURST_GRAVITY,
                life,
                size,
            )
            .with_size_decay(BURST_SIZE_DECAY);
            self.particles.push(Particle {
                body,
                color: self.color,
            });
        }
    }
}

/// A salvo rocket waiting for its frame
#[derive(Debug, Clone, Copy)]
struct ScheduledLaunch {
    due_frame: u64,
}

/// Owns every rocket in the sky
#[derive(Debug, Clone)]
pub struct FireworksShow<R = Pcg32> {
    pub fireworks: Vec<Firework>,
    width: f32,
    height: f32,
    frame: u64,
    scheduled: Vec<ScheduledLaunch>,
    events: Vec<SimEvent>,
    rng: R,
}

impl FireworksShow<Pcg32> {
    /// Seeded show over a `width` x `height` sky
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), width, height)
    }
}

impl<R: Rng> FireworksShow<R> {
    pub fn with_rng(rng: R, width: f32, height: f32) -> Self {
        Self {
            fireworks: Vec::new(),
            width,
            height,
            frame: 0,
            scheduled: Vec::new(),
            events: Vec::new(),
            rng,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Change the sky size; rockets in flight keep their coordinates
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn launch_firework(&mut self, x: f32, y: f32, color: FireworkColor) {
        let firework = Firework::launch(Vec2::new(x, y), color, &mut self.rng);
        self.fireworks.push(firework);
    }

    /// Launch with a color drawn uniformly from the palette
    pub fn launch_random_firework(&mut self, x: f32, y: f32) {
        let color = PALETTE[self.rng.random_range(0..PALETTE.len())];
        self.launch_firework(x, y, color);
    }

    /// Launch from a random point on the ground
    pub fn launch_from_ground(&mut self, color: FireworkColor) {
        let x = if self.width > 0.0 {
            self.rng.random_range(0.0..self.width)
        } else {
            0.0
        };
        self.launch_firework(x, self.height, color);
    }

    /// Queue a staggered volley of random-colored ground launches
    pub fn launch_salvo(&mut self) {
        for i in 0..SALVO_SIZE as u64 {
            self.scheduled.push(ScheduledLaunch {
                due_frame: self.frame + 1 + i * SALVO_SPACING_FRAMES,
            });
        }
        log::info!("Salvo of {} queued", SALVO_SIZE);
    }

    /// Salvo rockets not yet launched
    pub fn pending_launches(&self) -> usize {
        self.scheduled.len()
    }

    /// Drop every rocket and particle immediately, including queued salvo launches
    pub fn clear_fireworks(&mut self) {
        self.fireworks.clear();
        self.scheduled.clear();
    }

    /// Advance the show by one frame
    pub fn update(&mut self) {
        self.frame += 1;

        let frame = self.frame;
        let due = self.scheduled.iter().filter(|s| s.due_frame <= frame).count();
        self.scheduled.retain(|s| s.due_frame > frame);
        for _ in 0..due {
            let color = PALETTE[self.rng.random_range(0..PALETTE.len())];
            self.launch_from_ground(color);
        }

        for firework in &mut self.fireworks {
            if firework.update(&mut self.rng) {
                log::debug!(
                    "Firework {:?} burst into {} particles",
                    firework.color,
                    firework.particles.len()
                );
                self.events
                    .push(SimEvent::Sound(SoundEffect::FireworkBurst(firework.color)));
            }
        }
        self.fireworks.retain(|f| !f.is_finished());
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total live burst particles across all rockets
    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles.len()).sum()
    }
}
