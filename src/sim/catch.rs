//! Catch game: falling collectibles and hazards, a pointer-driven paddle,
//! score, lives, and a difficulty ramp

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::collision::Aabb;
use super::events::{SimEvent, SoundEffect};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-game, resumable
    Paused,
    /// Lives ran out
    GameOver,
}

/// What a falling item does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Worth points
    Collectible,
    /// Costs a life
    Hazard,
}

impl ItemKind {
    /// Collision box size
    pub fn size(&self) -> Vec2 {
        match self {
            ItemKind::Collectible => Vec2::new(COLLECTIBLE_WIDTH, ITEM_HEIGHT),
            ItemKind::Hazard => Vec2::new(HAZARD_WIDTH, ITEM_HEIGHT),
        }
    }
}

/// An item dropping from the top of the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub fall_speed: f32,
    /// Radians (visual only)
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl FallingItem {
    pub fn new(kind: ItemKind, pos: Vec2, fall_speed: f32, rotation_speed: f32) -> Self {
        Self {
            pos,
            size: kind.size(),
            fall_speed,
            rotation: 0.0,
            rotation_speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Advance one frame
    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
        self.rotation += self.rotation_speed;
    }
}

/// A spark thrown out when a hazard goes off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub size: f32,
    /// HSL hue in degrees, red through orange
    pub hue: f32,
}

impl ExplosionParticle {
    /// Move first, then fall; horizontal speed never changes
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += SPARK_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.size *= SPARK_SIZE_DECAY;
    }

    pub fn is_spent(&self) -> bool {
        self.life == 0
    }

    pub fn alpha(&self) -> f32 {
        (self.life as f32 / SPARK_LIFE as f32).clamp(0.0, 1.0)
    }
}

/// Anything living in the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatchEntity {
    Collectible(FallingItem),
    Hazard(FallingItem),
    Spark(ExplosionParticle),
}

impl CatchEntity {
    pub fn item(kind: ItemKind, item: FallingItem) -> Self {
        match kind {
            ItemKind::Collectible => CatchEntity::Collectible(item),
            ItemKind::Hazard => CatchEntity::Hazard(item),
        }
    }

    /// The falling item and its kind, if this isn't a spark
    pub fn as_item(&self) -> Option<(ItemKind, &FallingItem)> {
        match self {
            CatchEntity::Collectible(item) => Some((ItemKind::Collectible, item)),
            CatchEntity::Hazard(item) => Some((ItemKind::Hazard, item)),
            CatchEntity::Spark(_) => None,
        }
    }
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x, follows the pointer
    pub x: f32,
    /// Center y, fixed near the bottom of the play area
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(play_width: f32, play_height: f32) -> Self {
        Self {
            x: play_width / 2.0,
            y: play_height - PADDLE_BOTTOM_OFFSET,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Center on `x`, keeping the whole paddle inside the play area
    pub fn follow(&mut self, x: f32, play_width: f32) {
        let half = self.width / 2.0;
        let max = play_width - half;
        self.x = if max < half { play_width / 2.0 } else { x.clamp(half, max) };
    }
}

/// Score, lives and difficulty for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub lives: u8,
    /// Base fall speed; each item adds a random extra
    pub fall_speed_base: f32,
    /// Frames between spawns
    pub spawn_interval: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            fall_speed_base: START_FALL_SPEED,
            spawn_interval: START_SPAWN_INTERVAL,
        }
    }
}

impl GameSession {
    /// Harder: faster falls, more frequent spawns (never below the floor)
    pub fn ramp_difficulty(&mut self) {
        self.fall_speed_base += FALL_SPEED_STEP;
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(MIN_SPAWN_INTERVAL);
    }
}

/// The catch game
#[derive(Debug, Clone)]
pub struct CatchGame<R = Pcg32> {
    pub session: GameSession,
    pub paddle: Paddle,
    /// Items and sparks, in spawn order
    pub entities: Vec<CatchEntity>,
    phase: GamePhase,
    frame: u64,
    width: f32,
    height: f32,
    events: Vec<SimEvent>,
    rng: R,
}

impl CatchGame<Pcg32> {
    /// Seeded game over a `width` x `height` play area
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), width, height)
    }
}

impl<R: Rng> CatchGame<R> {
    pub fn with_rng(rng: R, width: f32, height: f32) -> Self {
        Self {
            session: GameSession::default(),
            paddle: Paddle::new(width, height),
            entities: Vec::new(),
            phase: GamePhase::Idle,
            frame: 0,
            width,
            height,
            events: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Frames simulated since the last reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Begin or resume. A finished game is reset first.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Running => return,
            GamePhase::GameOver => self.reset(),
            GamePhase::Idle | GamePhase::Paused => {}
        }
        self.phase = GamePhase::Running;
        log::info!("Catch game running (score {}, lives {})", self.session.score, self.session.lives);
    }

    /// Freeze in place; `start` resumes
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Catch game paused");
        }
    }

    /// Back to a fresh session. Does not start.
    pub fn reset(&mut self) {
        self.session = GameSession::default();
        self.entities.clear();
        self.frame = 0;
        self.phase = GamePhase::Idle;
        self.notify_score();
        log::info!("Catch game reset");
    }

    /// Reset then start
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Change the play area. Entities keep their coordinates; the paddle
    /// moves to the new bottom and is clamped to the new width (centered if
    /// the old area had no width).
    pub fn resize(&mut self, width: f32, height: f32) {
        let x = if self.width > 0.0 { self.paddle.x } else { width / 2.0 };
        self.width = width;
        self.height = height;
        self.paddle.y = height - PADDLE_BOTTOM_OFFSET;
        self.paddle.follow(x, width);
    }

    /// Pointer moved to `x`. Ignored unless running.
    pub fn move_paddle(&mut self, x: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.paddle.follow(x, self.width);
    }

    /// Advance one frame (no-op unless running)
    pub fn update(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }

        self.frame += 1;
        if self.frame % self.session.spawn_interval == 0 {
            self.spawn_item();
        }
        if self.frame % DIFFICULTY_RAMP_FRAMES == 0 {
            self.session.ramp_difficulty();
            log::debug!(
                "Difficulty up: fall speed {}, spawn every {} frames",
                self.session.fall_speed_base,
                self.session.spawn_interval
            );
        }

        let paddle = self.paddle.bounds();
        let exit_y = self.height + ITEM_EXIT_MARGIN;
        let entities = std::mem::take(&mut self.entities);
        let mut kept = Vec::with_capacity(entities.len());
        let mut sparks = Vec::new();

        for entity in entities {
            // Lives are gone; leave the rest of the frame as it was
            if self.phase == GamePhase::GameOver {
                kept.push(entity);
                continue;
            }

            match entity {
                CatchEntity::Spark(mut spark) => {
                    spark.step();
                    if !spark.is_spent() {
                        kept.push(CatchEntity::Spark(spark));
                    }
                }
                CatchEntity::Collectible(mut item) => {
                    item.fall();
                    if item.bounds().overlaps(&paddle) {
                        self.collect();
                    } else if item.pos.y <= exit_y {
                        kept.push(CatchEntity::Collectible(item));
                    }
                }
                CatchEntity::Hazard(mut item) => {
                    item.fall();
                    if item.bounds().overlaps(&paddle) {
                        self.explode_hazard(item.pos, &mut sparks);
                    } else if item.pos.y <= exit_y {
                        kept.push(CatchEntity::Hazard(item));
                    }
                }
            }
        }

        kept.extend(sparks);
        self.entities = kept;
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Falling items currently in play (sparks excluded)
    pub fn falling_items(&self) -> impl Iterator<Item = (ItemKind, &FallingItem)> {
        self.entities.iter().filter_map(CatchEntity::as_item)
    }

    fn spawn_item(&mut self) {
        let kind = if self.rng.random_bool(COLLECTIBLE_CHANCE) {
            ItemKind::Collectible
        } else {
            ItemKind::Hazard
        };
        let (lo, hi) = (ITEM_SPAWN_MARGIN, self.width - ITEM_SPAWN_MARGIN);
        let x = if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            self.width / 2.0
        };
        let fall_speed = self.session.fall_speed_base + self.rng.random_range(0.0..FALL_SPEED_JITTER);
        let rotation_speed = self
            .rng
            .random_range(-ITEM_ROTATION_SPEED_MAX..ITEM_ROTATION_SPEED_MAX);

        let item = FallingItem::new(kind, Vec2::new(x, ITEM_SPAWN_Y), fall_speed, rotation_speed);
        self.entities.push(CatchEntity::item(kind, item));
    }

    fn collect(&mut self) {
        self.session.score += COLLECT_POINTS;
        self.events.push(SimEvent::Sound(SoundEffect::Collect));
        // Exact with fixed +10 steps; larger increments could skip a boundary
        if self.session.score % BONUS_LIFE_SCORE == 0 {
            self.session.lives = (self.session.lives + 1).min(MAX_LIVES);
        }
        self.notify_score();
    }

    fn explode_hazard(&mut self, at: Vec2, sparks: &mut Vec<CatchEntity>) {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.events.push(SimEvent::Sound(SoundEffect::Explode));

        for _ in 0..SPARK_COUNT {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(SPARK_SPEED_MIN..SPARK_SPEED_MAX);
            sparks.push(CatchEntity::Spark(ExplosionParticle {
                pos: at,
                vel: polar_to_cartesian(speed, angle),
                life: SPARK_LIFE,
                size: self.rng.random_range(SPARK_SIZE_MIN..SPARK_SIZE_MAX),
                hue: self.rng.random_range(0.0..SPARK_HUE_MAX),
            }));
        }
        self.notify_score();

        if self.session.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(SimEvent::GameOver {
                score: self.session.score,
            });
            log::info!("Game over with score {}", self.session.score);
        }
    }

    fn notify_score(&mut self) {
        self.events.push(SimEvent::ScoreChanged {
            score: self.session.score,
            lives: self.session.lives,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::FixedRng;
    use proptest::prelude::*;

    fn running_game() -> CatchGame {
        let mut game = CatchGame::new(12345, 800.0, 600.0);
        game.start();
        game.drain_events();
        game
    }

    /// Item sitting right on the paddle, not moving
    fn on_paddle(game: &CatchGame, kind: ItemKind) -> CatchEntity {
        let pos = Vec2::new(game.paddle.x, game.paddle.y);
        CatchEntity::item(kind, FallingItem::new(kind, pos, 0.0, 0.0))
    }

    fn sounds(events: &[SimEvent]) -> Vec<SoundEffect> {
        events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_phases() {
        let mut game = CatchGame::new(1, 800.0, 600.0);
        assert_eq!(game.phase(), GamePhase::Idle);

        game.pause();
        assert_eq!(game.phase(), GamePhase::Idle);

        game.start();
        assert!(game.is_running());

        game.pause();
        assert_eq!(game.phase(), GamePhase::Paused);

        game.start();
        assert!(game.is_running());
    }

    #[test]
    fn test_reset_then_start() {
        let mut game = running_game();
        for _ in 0..200 {
            game.update();
        }
        game.session.score = 70;
        game.session.lives = 1;

        game.reset();
        assert_eq!(game.phase(), GamePhase::Idle);
        game.start();

        assert_eq!(game.session.score, 0);
        assert_eq!(game.session.lives, 3);
        assert!(game.entities.is_empty());
        assert!(game.is_running());
        assert!(!game.is_over());
        assert_eq!(game.session, GameSession::default());
    }

    #[test]
    fn test_reset_notifies_score() {
        let mut game = running_game();
        game.reset();
        assert_eq!(
            game.drain_events(),
            vec![SimEvent::ScoreChanged { score: 0, lives: 3 }]
        );
    }

    #[test]
    fn test_paused_game_does_not_advance() {
        let mut game = running_game();
        for _ in 0..61 {
            game.update();
        }
        game.pause();
        let frame = game.frame();
        let ys: Vec<f32> = game.falling_items().map(|(_, i)| i.pos.y).collect();

        for _ in 0..100 {
            game.update();
        }
        assert_eq!(game.frame(), frame);
        let after: Vec<f32> = game.falling_items().map(|(_, i)| i.pos.y).collect();
        assert_eq!(ys, after);
    }

    #[test]
    fn test_spawn_policy() {
        let mut game = running_game();
        for _ in 0..START_SPAWN_INTERVAL - 1 {
            game.update();
        }
        assert!(game.entities.is_empty());

        game.update();
        let items: Vec<_> = game.falling_items().collect();
        assert_eq!(items.len(), 1);

        let (kind, item) = items[0];
        assert_eq!(item.size, kind.size());
        assert!(item.pos.x >= ITEM_SPAWN_MARGIN && item.pos.x < 800.0 - ITEM_SPAWN_MARGIN);
        assert!(item.fall_speed >= 2.0 && item.fall_speed < 4.0);
        // Spawned and moved in the same frame
        assert!((item.pos.y - (ITEM_SPAWN_Y + item.fall_speed)).abs() < 1e-4);
        assert!(item.rotation_speed.abs() <= ITEM_ROTATION_SPEED_MAX);
    }

    #[test]
    fn test_spawn_kind_follows_rng() {
        let mut game = CatchGame::with_rng(FixedRng::ALWAYS, 800.0, 600.0);
        game.start();
        for _ in 0..START_SPAWN_INTERVAL {
            game.update();
        }
        let kinds: Vec<_> = game.falling_items().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ItemKind::Collectible]);
    }

    #[test]
    fn test_catch_collectible() {
        let mut game = running_game();
        let item = on_paddle(&game, ItemKind::Collectible);
        game.entities.push(item);

        game.update();
        assert_eq!(game.session.score, 10);
        assert_eq!(game.session.lives, 3);
        assert!(game.entities.is_empty());

        let events = game.drain_events();
        assert_eq!(sounds(&events), vec![SoundEffect::Collect]);
        assert!(events.contains(&SimEvent::ScoreChanged { score: 10, lives: 3 }));
    }

    #[test]
    fn test_bonus_life_on_hundred() {
        let mut game = running_game();
        game.session.score = 90;
        let item = on_paddle(&game, ItemKind::Collectible);
        game.entities.push(item);
        game.update();
        assert_eq!(game.session.score, 100);
        assert_eq!(game.session.lives, 4);
    }

    #[test]
    fn test_no_bonus_off_boundary() {
        let mut game = running_game();
        game.session.score = 95;
        let item = on_paddle(&game, ItemKind::Collectible);
        game.entities.push(item);
        game.update();
        assert_eq!(game.session.score, 105);
        assert_eq!(game.session.lives, 3);
    }

    #[test]
    fn test_lives_capped() {
        let mut game = running_game();
        game.session.score = 190;
        game.session.lives = MAX_LIVES;
        let item = on_paddle(&game, ItemKind::Collectible);
        game.entities.push(item);
        game.update();
        assert_eq!(game.session.lives, MAX_LIVES);
    }

    #[test]
    fn test_hazard_hit() {
        let mut game = running_game();
        let item = on_paddle(&game, ItemKind::Hazard);
        let at = Vec2::new(game.paddle.x, game.paddle.y);
        game.entities.push(item);

        game.update();
        assert_eq!(game.session.lives, 2);
        assert_eq!(game.session.score, 0);
        assert!(game.is_running());
        assert_eq!(game.falling_items().count(), 0);

        let sparks: Vec<_> = game
            .entities
            .iter()
            .filter_map(|e| match e {
                CatchEntity::Spark(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(sparks.len(), SPARK_COUNT);
        for spark in sparks {
            assert_eq!(spark.pos, at);
            assert_eq!(spark.life, SPARK_LIFE);
            assert!(spark.hue >= 0.0 && spark.hue < SPARK_HUE_MAX);
            assert!(spark.size >= SPARK_SIZE_MIN && spark.size < SPARK_SIZE_MAX);
            let speed = spark.vel.length();
            assert!(speed > SPARK_SPEED_MIN - 0.01 && speed < SPARK_SPEED_MAX + 0.01);
        }

        assert_eq!(sounds(&game.drain_events()), vec![SoundEffect::Explode]);
    }

    #[test]
    fn test_sparks_burn_out() {
        let mut game = running_game();
        let item = on_paddle(&game, ItemKind::Hazard);
        game.entities.push(item);
        game.update();

        for _ in 0..SPARK_LIFE - 1 {
            game.update();
        }
        assert!(game.entities.iter().any(|e| matches!(e, CatchEntity::Spark(_))));
        game.update();
        assert!(!game.entities.iter().any(|e| matches!(e, CatchEntity::Spark(_))));
    }

    #[test]
    fn test_spark_step() {
        let mut spark = ExplosionParticle {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(1.0, 2.0),
            life: SPARK_LIFE,
            size: 4.0,
            hue: 10.0,
        };
        spark.step();
        assert_eq!(spark.pos, Vec2::new(1.0, 2.0));
        assert!((spark.vel.y - 2.1).abs() < 1e-6);
        assert_eq!(spark.vel.x, 1.0);
        assert_eq!(spark.life, SPARK_LIFE - 1);
        assert!((spark.size - 3.8).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut game = running_game();
        game.session.lives = 1;
        game.session.score = 40;
        let first = on_paddle(&game, ItemKind::Hazard);
        let second = on_paddle(&game, ItemKind::Hazard);
        game.entities.push(first);
        game.entities.push(second);

        game.update();
        assert!(game.is_over());
        assert!(!game.is_running());
        assert_eq!(game.session.lives, 0);
        let events = game.drain_events();
        assert!(events.contains(&SimEvent::GameOver { score: 40 }));
        assert_eq!(sounds(&events), vec![SoundEffect::Explode]);

        // Frozen until restarted
        let frame = game.frame();
        game.update();
        assert_eq!(game.frame(), frame);

        game.start();
        assert!(game.is_running());
        assert_eq!(game.session, GameSession::default());
        assert!(game.entities.is_empty());
    }

    #[test]
    fn test_missed_item_removed() {
        let mut game = running_game();
        // Far from the paddle, just above the exit line
        let item = FallingItem::new(ItemKind::Collectible, Vec2::new(700.0, 649.0), 2.0, 0.0);
        game.paddle.x = 50.0;
        game.entities.push(CatchEntity::Collectible(item));

        game.update();
        assert!(game.entities.is_empty());
        assert_eq!(game.session.score, 0);
    }

    #[test]
    fn test_difficulty_ramp() {
        // Tall play area so nothing reaches the paddle
        let mut game = CatchGame::new(77, 800.0, 100_000.0);
        game.start();
        for _ in 0..DIFFICULTY_RAMP_FRAMES - 1 {
            game.update();
        }
        assert_eq!(game.session.spawn_interval, 60);
        assert_eq!(game.session.fall_speed_base, 2.0);

        game.update();
        assert_eq!(game.session.spawn_interval, 55);
        assert_eq!(game.session.fall_speed_base, 2.5);

        for _ in 0..DIFFICULTY_RAMP_FRAMES {
            game.update();
        }
        assert_eq!(game.session.spawn_interval, 50);
        assert_eq!(game.session.fall_speed_base, 3.0);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut session = GameSession::default();
        for _ in 0..20 {
            session.ramp_difficulty();
        }
        assert_eq!(session.spawn_interval, MIN_SPAWN_INTERVAL);
        assert_eq!(session.fall_speed_base, 2.0 + 20.0 * 0.5);
    }

    #[test]
    fn test_paddle_clamped() {
        let mut game = running_game();
        game.move_paddle(-500.0);
        assert_eq!(game.paddle.x, 50.0);
        game.move_paddle(10_000.0);
        assert_eq!(game.paddle.x, 750.0);
        game.move_paddle(321.0);
        assert_eq!(game.paddle.x, 321.0);
    }

    #[test]
    fn test_paddle_ignores_pointer_when_not_running() {
        let mut game = CatchGame::new(3, 800.0, 600.0);
        game.move_paddle(100.0);
        assert_eq!(game.paddle.x, 400.0);

        game.start();
        game.pause();
        game.move_paddle(100.0);
        assert_eq!(game.paddle.x, 400.0);
    }

    #[test]
    fn test_resize_moves_paddle() {
        let mut game = running_game();
        let item = FallingItem::new(ItemKind::Hazard, Vec2::new(10.0, 20.0), 1.0, 0.0);
        game.entities.push(CatchEntity::Hazard(item));

        game.resize(400.0, 300.0);
        assert_eq!(game.paddle.y, 250.0);
        assert_eq!(game.falling_items().next().map(|(_, i)| i.pos), Some(Vec2::new(10.0, 20.0)));

        game.move_paddle(1000.0);
        assert_eq!(game.paddle.x, 350.0);
    }

    #[test]
    fn test_resize_keeps_paddle_inside() {
        // Host creates the game before the canvas has a size
        let mut game = CatchGame::new(1, 0.0, 0.0);
        game.resize(800.0, 600.0);
        assert_eq!(game.paddle.x, 400.0);

        game.start();
        game.move_paddle(10_000.0);
        assert_eq!(game.paddle.x, 750.0);

        // Shrinking pulls the paddle back in, even while paused
        game.pause();
        game.resize(400.0, 300.0);
        let half = PADDLE_WIDTH / 2.0;
        assert_eq!(game.paddle.x, 400.0 - half);
        assert!(game.paddle.x >= half && game.paddle.x <= 400.0 - half);

        // Growing keeps the current position
        game.resize(1000.0, 300.0);
        assert_eq!(game.paddle.x, 350.0);
    }

    proptest! {
        #[test]
        fn prop_session_bounds(seed in any::<u64>(), commands in prop::collection::vec(0u8..6, 1..100)) {
            let mut game = CatchGame::new(seed, 400.0, 300.0);
            game.start();
            let mut last_score = 0;
            for cmd in commands {
                match cmd {
                    0 => game.move_paddle(seed as f32 % 400.0),
                    1 => game.pause(),
                    2 => game.start(),
                    _ => {
                        for _ in 0..20 {
                            game.update();
                        }
                    }
                }
                let s = &game.session;
                prop_assert!(s.lives <= MAX_LIVES);
                prop_assert_eq!(s.score % COLLECT_POINTS, 0);
                prop_assert_eq!(game.is_over(), s.lives == 0);
                if !game.is_over() && game.frame() > 0 {
                    prop_assert!(s.score >= last_score);
                }
                last_score = s.score;
                prop_assert!(s.spawn_interval >= MIN_SPAWN_INTERVAL);
            }
        }
    }
}
