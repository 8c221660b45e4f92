//! Drawing layer
//!
//! Simulations never issue draw calls themselves. `scene` reads their state
//! and paints it onto a [`Surface`], which is a pure sink: the browser's 2D
//! canvas on wasm, a vertex buffer via [`mesh::MeshSurface`], or a
//! [`CommandRecorder`] in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::settings::Settings;

/// Linear RGBA, each channel 0-1
pub type Rgba = [f32; 4];

/// Procedurally painted sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// Red envelope with gold trim
    Collectible,
    /// Firecracker with a fuse
    Hazard,
    /// Basket
    Paddle,
}

impl Sprite {
    /// Drawn size in pixels, centered on the sprite position
    pub fn size(&self) -> Vec2 {
        match self {
            Sprite::Collectible => Vec2::new(40.0, 60.0),
            Sprite::Hazard => Vec2::new(30.0, 60.0),
            Sprite::Paddle => Vec2::new(100.0, 30.0),
        }
    }

    /// Filled rectangles making up the sprite, back to front
    pub fn parts(&self) -> &'static [SpritePart] {
        match self {
            Sprite::Collectible => &COLLECTIBLE_PARTS,
            Sprite::Hazard => &HAZARD_PARTS,
            Sprite::Paddle => &PADDLE_PARTS,
        }
    }
}

/// Rectangle of a sprite, relative to the sprite center (unrotated)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePart {
    pub min: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

const fn part(x: f32, y: f32, w: f32, h: f32, color: Rgba) -> SpritePart {
    SpritePart {
        min: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color,
    }
}

// Envelope body with a gold flap
static COLLECTIBLE_PARTS: [SpritePart; 2] = [
    part(-15.0, -30.0, 30.0, 50.0, colors::ENVELOPE_RED),
    part(-15.0, -30.0, 30.0, 10.0, colors::TRIM_GOLD),
];

// Firecracker tube with three gold bands
static HAZARD_PARTS: [SpritePart; 4] = [
    part(-5.0, -30.0, 10.0, 50.0, colors::ENVELOPE_RED),
    part(-5.0, -30.0, 10.0, 10.0, colors::TRIM_GOLD),
    part(-5.0, -10.0, 10.0, 5.0, colors::TRIM_GOLD),
    part(-5.0, 5.0, 10.0, 5.0, colors::TRIM_GOLD),
];

static PADDLE_PARTS: [SpritePart; 2] = [
    part(-50.0, -15.0, 100.0, 20.0, colors::BASKET_BROWN),
    part(-45.0, -10.0, 90.0, 10.0, colors::BASKET_INSIDE),
];

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing sink. Nothing is ever read back.
pub trait Surface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    /// Sprite centered on `center`, rotated by `rotation` radians
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, rotation: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Rgba);
}

/// Per-frame drawing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    /// Host clock, drives twinkling and drifting backdrop
    pub time_ms: f64,
    /// Multiplier on backdrop star count (0 disables the backdrop)
    pub star_density: f32,
}

impl DrawContext {
    pub fn new(time_ms: f64, settings: &Settings) -> Self {
        Self {
            time_ms,
            star_density: settings.star_density(),
        }
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            time_ms: 0.0,
            star_density: 1.0,
        }
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { min: Vec2, size: Vec2, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    Sprite { sprite: Sprite, center: Vec2, rotation: f32 },
    Text { text: String, pos: Vec2, size_px: f32, align: TextAlign, color: Rgba },
}

/// Surface that just remembers what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, Vec2, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite {
                sprite,
                center,
                rotation,
            } => Some((*sprite, *center, *rotation)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandRecorder {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Rect { min, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            center,
            rotation,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size_px,
            align,
            color,
        });
    }
}

/// HSL (hue in degrees, saturation and lightness 0-1) to linear RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Colors for scene elements
pub mod colors {
    /// Translucent black painted over the sky each frame, leaves trails
    pub const NIGHT_FADE: [f32; 4] = [0.0, 0.0, 0.0, 0.1];
    /// Catch game backdrop (#1a1a2e)
    pub const CATCH_BACKGROUND: [f32; 4] = [0.102, 0.102, 0.18, 1.0];
    pub const SKY_STAR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const CATCH_STAR: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PROMPT: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    /// #ff4444
    pub const ENVELOPE_RED: [f32; 4] = [1.0, 0.267, 0.267, 1.0];
    /// #ffd700
    pub const TRIM_GOLD: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    /// #8b4513
    pub const BASKET_BROWN: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    /// #654321
    pub const BASKET_RIM: [f32; 4] = [0.396, 0.263, 0.129, 1.0];
    /// #d2691e
    pub const BASKET_INSIDE: [f32; 4] = [0.824, 0.412, 0.118, 1.0];
    /// #333333
    pub const FUSE: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
}
