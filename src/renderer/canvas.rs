//! Browser 2D canvas surface

use glam::Vec2;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Rgba, Sprite, Surface, TextAlign, colors};

/// CSS color string for an RGBA value
fn css(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the element's CSS size, returns the new size
    pub fn fit_to_client(&self) -> Vec2 {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Vec2::new(width as f32, height as f32)
    }

    /// Pointer position relative to the canvas
    pub fn local_point(&self, client_x: i32, client_y: i32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(
            (client_x as f64 - rect.left()) as f32,
            (client_y as f64 - rect.top()) as f32,
        )
    }

    fn stroke_path(&self, width: f32, color: Rgba) {
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.stroke();
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, PI * 2.0)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.stroke_path(width, color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        self.ctx.save();
        let placed = self
            .ctx
            .translate(center.x as f64, center.y as f64)
            .and_then(|_| self.ctx.rotate(rotation as f64));

        if placed.is_ok() {
            for part in sprite.parts() {
                self.fill_rect(part.min, part.size, part.color);
            }
            let half = sprite.size() / 2.0;
            match sprite {
                Sprite::Collectible => {
                    self.ctx.set_line_width(2.0);
                    self.ctx.set_stroke_style_str(&css(colors::TRIM_GOLD));
                    self.ctx.stroke_rect(-15.0, -half.y as f64, 30.0, 50.0);
                    self.ctx.set_font("bold 20px Arial");
                    self.ctx.set_text_align("center");
                    self.ctx.set_text_baseline("middle");
                    self.ctx.set_fill_style_str(&css(colors::TRIM_GOLD));
                    let _ = self.ctx.fill_text("福", 0.0, 0.0);
                }
                Sprite::Hazard => {
                    self.stroke_line(
                        Vec2::new(0.0, -half.y),
                        Vec2::new(0.0, -half.y - 10.0),
                        2.0,
                        colors::FUSE,
                    );
                }
                Sprite::Paddle => {
                    self.ctx.set_line_width(2.0);
                    self.ctx.set_stroke_style_str(&css(colors::BASKET_RIM));
                    self.ctx.stroke_rect(-half.x as f64, -half.y as f64, 100.0, 20.0);
                    // Handle
                    self.ctx.begin_path();
                    if self
                        .ctx
                        .arc_with_anticlockwise(0.0, -half.y as f64 - 5.0, 15.0, 0.0, PI, true)
                        .is_ok()
                    {
                        self.stroke_path(3.0, colors::BASKET_RIM);
                    }
                }
            }
        } else {
            log::warn!("Could not place {:?} sprite", sprite);
        }
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Rgba) {
        self.ctx.set_font(&format!("{}px Arial", size_px));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline("alphabetic");
        self.ctx.set_fill_style_str(&css(color));
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
