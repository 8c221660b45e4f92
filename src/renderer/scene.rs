//! Paints simulation state onto a surface

use glam::Vec2;
use rand::Rng;

use super::{DrawContext, Sprite, Surface, TextAlign, colors, hsl_to_rgba};
use crate::sim::{CatchEntity, CatchGame, FireworkState, FireworksShow, GamePhase};

/// Base star count behind the fireworks
const SKY_STARS: usize = 50;
/// Base star count behind the catch game
const CATCH_STARS: usize = 20;
const CLOUDS: usize = 3;
/// Rocket trail length in frames of velocity
const TRAIL_FRAMES: f32 = 3.0;

/// Draw one frame of the fireworks show
pub fn draw_fireworks<R: Rng>(show: &FireworksShow<R>, surface: &mut dyn Surface, ctx: &DrawContext) {
    let size = show.size();
    surface.fill_rect(Vec2::ZERO, size, colors::NIGHT_FADE);

    let stars = (SKY_STARS as f32 * ctx.star_density) as usize;
    draw_stars(surface, ctx, stars, |i| {
        let pos = Vec2::new((i * 37) as f32 % size.x, (i * 23) as f32 % size.y);
        (pos, 1.5, 1.5)
    }, size, colors::SKY_STAR);

    for firework in &show.fireworks {
        match firework.state {
            FireworkState::Ascending => {
                let body = &firework.body;
                let color = firework.color.rgba(1.0);
                surface.fill_circle(body.pos, body.size, color);
                surface.stroke_line(body.pos, body.pos - body.vel * TRAIL_FRAMES, 1.0, color);
            }
            FireworkState::Exploded => {
                for particle in &firework.particles {
                    let color = particle.color.rgba(particle.alpha());
                    surface.fill_circle(particle.body.pos, particle.body.size, color);
                }
            }
        }
    }
}

/// Draw one frame of the catch game, including status text and overlays
pub fn draw_catch<R: Rng>(game: &CatchGame<R>, surface: &mut dyn Surface, ctx: &DrawContext) {
    let size = game.size();
    surface.fill_rect(Vec2::ZERO, size, colors::CATCH_BACKGROUND);

    let stars = (CATCH_STARS as f32 * ctx.star_density) as usize;
    draw_stars(surface, ctx, stars, |i| {
        let pos = Vec2::new((i * 79) as f32 % size.x, (i * 47) as f32 % (size.y / 2.0));
        (pos, 1.0, 1.0)
    }, size, colors::CATCH_STAR);
    if ctx.star_density > 0.0 && size.x > 0.0 {
        draw_clouds(surface, ctx, size);
    }

    for entity in &game.entities {
        match entity {
            CatchEntity::Collectible(item) => {
                surface.draw_sprite(Sprite::Collectible, item.pos, item.rotation)
            }
            CatchEntity::Hazard(item) => surface.draw_sprite(Sprite::Hazard, item.pos, item.rotation),
            CatchEntity::Spark(spark) => {
                let color = hsl_to_rgba(spark.hue, 1.0, 0.5, spark.alpha());
                surface.fill_circle(spark.pos, spark.size, color);
            }
        }
    }

    let paddle = &game.paddle;
    surface.draw_sprite(Sprite::Paddle, Vec2::new(paddle.x, paddle.y), 0.0);

    draw_status(game, surface, size);
}

fn draw_stars(
    surface: &mut dyn Surface,
    ctx: &DrawContext,
    count: usize,
    place: impl Fn(usize) -> (Vec2, f32, f32),
    size: Vec2,
    color: [f32; 4],
) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    for i in 0..count {
        let (pos, amplitude, base) = place(i);
        let twinkle = (ctx.time_ms * 0.001 + i as f64).sin() as f32;
        let radius = twinkle * amplitude + base;
        if radius > 0.0 {
            surface.fill_circle(pos, radius, color);
        }
    }
}

/// Puffy clouds drifting right, wrapping around
fn draw_clouds(surface: &mut dyn Surface, ctx: &DrawContext, size: Vec2) {
    let span = size.x as f64 + 200.0;
    for i in 0..CLOUDS {
        let x = ((ctx.time_ms * 0.01 + i as f64 * 200.0) % span - 100.0) as f32;
        let y = 50.0 + i as f32 * 40.0;
        surface.fill_circle(Vec2::new(x, y), 20.0, colors::CLOUD);
        surface.fill_circle(Vec2::new(x + 25.0, y - 10.0), 25.0, colors::CLOUD);
        surface.fill_circle(Vec2::new(x + 50.0, y), 20.0, colors::CLOUD);
    }
}

fn draw_status<R: Rng>(game: &CatchGame<R>, surface: &mut dyn Surface, size: Vec2) {
    let session = &game.session;
    surface.fill_text(
        &format!("Score: {}", session.score),
        Vec2::new(20.0, 40.0),
        24.0,
        TextAlign::Left,
        colors::TEXT,
    );
    surface.fill_text(
        &format!("Lives: {}", session.lives),
        Vec2::new(20.0, 70.0),
        24.0,
        TextAlign::Left,
        colors::TEXT,
    );

    let center = size / 2.0;
    match game.phase() {
        GamePhase::Idle | GamePhase::Paused => {
            surface.fill_text("Press Start to play", center, 32.0, TextAlign::Center, colors::PROMPT);
        }
        GamePhase::GameOver => {
            surface.fill_rect(Vec2::ZERO, size, colors::OVERLAY);
            surface.fill_text(
                "Game Over!",
                center - Vec2::new(0.0, 50.0),
                48.0,
                TextAlign::Center,
                colors::TEXT,
            );
            surface.fill_text(
                &format!("Final score: {}", session.score),
                center + Vec2::new(0.0, 20.0),
                32.0,
                TextAlign::Center,
                colors::TEXT,
            );
            surface.fill_text(
                "Press Restart to try again",
                center + Vec2::new(0.0, 70.0),
                24.0,
                TextAlign::Center,
                colors::TEXT,
            );
        }
        GamePhase::Running => {}
    }
}
