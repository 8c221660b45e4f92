//! Festive Canvas - fireworks show and catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulations (fireworks, catch game, shared particle physics)
//! - `driver`: Frame loop that steps simulations once per display refresh
//! - `renderer`: Drawing surface abstraction, scene painting, mesh tessellation
//! - `audio`: Sound effect parameters and playback backends
//! - `settings`: Player preferences

pub mod audio;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FixedClock, FrameInfo, FrameLoop, FrameSource, LoopHandle, Simulation};
pub use settings::{QualityPreset, Settings};

/// Per-frame tuning constants (one unit = one display refresh)
pub mod consts {
    /// Nominal display refresh used to convert host timings into frames
    pub const FRAMES_PER_SECOND: f64 = 60.0;

    /// Firework rocket launch speed range
    pub const ROCKET_SPEED_MIN: f32 = 2.0;
    pub const ROCKET_SPEED_MAX: f32 = 5.0;
    pub const ROCKET_DRAG: f32 = 0.99;
    pub const ROCKET_GRAVITY: f32 = 0.05;
    /// Frames until a rocket is forced to explode
    pub const ROCKET_FUSE_FRAMES: u32 = 100;
    /// Per-frame chance of an early explosion
    pub const ROCKET_EXPLODE_CHANCE: f64 = 0.02;
    pub const ROCKET_SIZE: f32 = 3.0;

    /// Burst particles
    pub const BURST_SPEED_MIN: f32 = 1.0;
    pub const BURST_SPEED_MAX: f32 = 4.0;
    pub const BURST_LIFE_MIN: u32 = 50;
    pub const BURST_LIFE_MAX: u32 = 100;
    pub const BURST_DRAG: f32 = 0.97;
    pub const BURST_GRAVITY: f32 = 0.05;
    pub const BURST_SIZE_MIN: f32 = 1.0;
    pub const BURST_SIZE_MAX: f32 = 4.0;
    pub const BURST_SIZE_DECAY: f32 = 0.98;
    /// Life value that maps to full opacity
    pub const BURST_FULL_ALPHA_LIFE: f32 = 100.0;

    /// Salvo: five rockets, 200ms apart at 60 Hz
    pub const SALVO_SIZE: usize = 5;
    pub const SALVO_SPACING_FRAMES: u64 = 12;

    /// Catch game session defaults
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const START_SPAWN_INTERVAL: u64 = 60;
    pub const MIN_SPAWN_INTERVAL: u64 = 30;
    pub const SPAWN_INTERVAL_STEP: u64 = 5;
    pub const START_FALL_SPEED: f32 = 2.0;
    pub const FALL_SPEED_STEP: f32 = 0.5;
    /// Random extra fall speed added on top of the base
    pub const FALL_SPEED_JITTER: f32 = 2.0;
    /// Frames between difficulty increases
    pub const DIFFICULTY_RAMP_FRAMES: u64 = 600;
    pub const COLLECTIBLE_CHANCE: f64 = 0.7;
    pub const COLLECT_POINTS: u64 = 10;
    /// A bonus life is granted whenever the score lands on a multiple of this
    pub const BONUS_LIFE_SCORE: u64 = 100;

    /// Falling item geometry
    pub const COLLECTIBLE_WIDTH: f32 = 40.0;
    pub const HAZARD_WIDTH: f32 = 30.0;
    pub const ITEM_HEIGHT: f32 = 60.0;
    pub const ITEM_SPAWN_Y: f32 = -50.0;
    pub const ITEM_SPAWN_MARGIN: f32 = 25.0;
    pub const ITEM_ROTATION_SPEED_MAX: f32 = 0.05;
    /// Items this far below the play area are discarded as missed
    pub const ITEM_EXIT_MARGIN: f32 = 50.0;

    /// Paddle (basket) geometry
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 30.0;
    /// Distance from the bottom of the play area to the paddle center
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Hazard explosion sparks
    pub const SPARK_COUNT: usize = 20;
    pub const SPARK_SPEED_MIN: f32 = 2.0;
    pub const SPARK_SPEED_MAX: f32 = 7.0;
    pub const SPARK_LIFE: u32 = 30;
    pub const SPARK_SIZE_MIN: f32 = 2.0;
    pub const SPARK_SIZE_MAX: f32 = 7.0;
    pub const SPARK_GRAVITY: f32 = 0.1;
    pub const SPARK_SIZE_DECAY: f32 = 0.95;
    /// Sparks are tinted from red (0) to yellow-orange (60)
    pub const SPARK_HUE_MAX: f32 = 60.0;
}

/// Convert polar (speed, angle) to a cartesian velocity
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> glam::Vec2 {
    glam::Vec2::new(r * theta.cos(), r * theta.sin())
}
