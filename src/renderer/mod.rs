//! Canvas 2D rendering
//!
//! Draws one frame from the current `GameState`. Pure presentation: the
//! simulation never observes anything this module does, and any canvas
//! call that fails is simply skipped for the frame.

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::ground_line;
use crate::sim::{Bird, Cloud, GamePhase, GameState, Pipe};

const PIPE_CAP_HEIGHT: f64 = 30.0;
const PIPE_CAP_OVERHANG: f64 = 5.0;
const TAU: f64 = std::f64::consts::TAU;

/// Renderer over a 2D canvas context
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Grab the 2D context from the given canvas
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one complete frame
    pub fn draw(&self, state: &GameState) {
        self.draw_background();
        for cloud in &state.clouds {
            self.draw_cloud(cloud);
        }
        for pipe in &state.pipes {
            self.draw_pipe(pipe);
        }
        self.draw_ground(state.ground_offset as f64);

        let flapping = state.phase == GamePhase::Playing && state.bird.velocity < 0.0;
        self.draw_bird(&state.bird, flapping);
    }

    fn draw_background(&self) {
        let sky = self
            .ctx
            .create_linear_gradient(0.0, 0.0, 0.0, PLAYFIELD_HEIGHT as f64);
        let _ = sky.add_color_stop(0.0, "#87CEEB");
        let _ = sky.add_color_stop(0.7, "#B0E0E6");
        let _ = sky.add_color_stop(1.0, "#E0F4FF");
        self.ctx.set_fill_style_canvas_gradient(&sky);
        self.ctx
            .fill_rect(0.0, 0.0, PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
    }

    fn draw_cloud(&self, cloud: &Cloud) {
        self.ctx.save();
        let _ = self
            .ctx
            .translate(cloud.pos.x as f64, cloud.pos.y as f64);
        let _ = self.ctx.scale(cloud.scale as f64, cloud.scale as f64);

        self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
        self.ctx.begin_path();
        let _ = self.ctx.arc(0.0, 0.0, 25.0, 0.0, TAU);
        let _ = self.ctx.arc(25.0, -5.0, 20.0, 0.0, TAU);
        let _ = self.ctx.arc(50.0, 0.0, 25.0, 0.0, TAU);
        let _ = self.ctx.arc(20.0, 10.0, 20.0, 0.0, TAU);
        let _ = self.ctx.arc(35.0, 8.0, 18.0, 0.0, TAU);
        self.ctx.fill();

        self.ctx.restore();
    }

    fn pipe_gradient(&self, pipe: &Pipe) -> CanvasGradient {
        let gradient = self.ctx.create_linear_gradient(
            pipe.x as f64,
            0.0,
            (pipe.x + pipe.width) as f64,
            0.0,
        );
        let _ = gradient.add_color_stop(0.0, "#4A9D4A");
        let _ = gradient.add_color_stop(0.3, "#6BBF6B");
        let _ = gradient.add_color_stop(0.7, "#4A9D4A");
        let _ = gradient.add_color_stop(1.0, "#357A35");
        gradient
    }

    fn draw_pipe(&self, pipe: &Pipe) {
        let ctx = &self.ctx;
        let x = pipe.x as f64;
        let w = pipe.width as f64;
        let top = pipe.top_height as f64;
        let bottom = pipe.bottom_y as f64;
        let gradient = self.pipe_gradient(pipe);

        // Upper barrier body and cap
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(x, 0.0, w, top - PIPE_CAP_HEIGHT);
        ctx.fill_rect(
            x - PIPE_CAP_OVERHANG,
            top - PIPE_CAP_HEIGHT,
            w + PIPE_CAP_OVERHANG * 2.0,
            PIPE_CAP_HEIGHT,
        );

        ctx.set_stroke_style_str("#2D5A2D");
        ctx.set_line_width(3.0);
        ctx.stroke_rect(
            x - PIPE_CAP_OVERHANG,
            top - PIPE_CAP_HEIGHT,
            w + PIPE_CAP_OVERHANG * 2.0,
            PIPE_CAP_HEIGHT,
        );

        ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        ctx.fill_rect(x + 5.0, 0.0, 8.0, top - PIPE_CAP_HEIGHT);

        // Lower barrier body and cap
        let lower_body_h = PLAYFIELD_HEIGHT as f64 - bottom - PIPE_CAP_HEIGHT - GROUND_HEIGHT as f64;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(x, bottom + PIPE_CAP_HEIGHT, w, lower_body_h);
        ctx.fill_rect(
            x - PIPE_CAP_OVERHANG,
            bottom,
            w + PIPE_CAP_OVERHANG * 2.0,
            PIPE_CAP_HEIGHT,
        );
        ctx.stroke_rect(
            x - PIPE_CAP_OVERHANG,
            bottom,
            w + PIPE_CAP_OVERHANG * 2.0,
            PIPE_CAP_HEIGHT,
        );

        ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        ctx.fill_rect(x + 5.0, bottom + PIPE_CAP_HEIGHT, 8.0, lower_body_h);
    }

    fn draw_ground(&self, offset: f64) {
        let ctx = &self.ctx;
        let ground_y = ground_line() as f64;
        let width = PLAYFIELD_WIDTH as f64;
        let pattern = GROUND_PATTERN as f64;

        // Grass band with sawtooth pattern scrolling at pipe speed
        ctx.set_fill_style_str("#7EC850");
        ctx.fill_rect(0.0, ground_y, width, 15.0);

        ctx.set_fill_style_str("#5EAA30");
        let mut x = (offset % 20.0) - 20.0;
        while x < width {
            ctx.begin_path();
            ctx.move_to(x, ground_y + 15.0);
            ctx.line_to(x + 10.0, ground_y);
            ctx.line_to(x + 20.0, ground_y + 15.0);
            ctx.fill();
            x += 20.0;
        }

        // Dirt
        let dirt = self
            .ctx
            .create_linear_gradient(0.0, ground_y + 15.0, 0.0, PLAYFIELD_HEIGHT as f64);
        let _ = dirt.add_color_stop(0.0, "#C4A35A");
        let _ = dirt.add_color_stop(1.0, "#8B7355");
        ctx.set_fill_style_canvas_gradient(&dirt);
        ctx.fill_rect(0.0, ground_y + 15.0, width, GROUND_HEIGHT as f64 - 15.0);

        ctx.set_fill_style_str("#A68B5B");
        let mut x = (offset % pattern) - pattern;
        while x < width {
            ctx.fill_rect(x, ground_y + 30.0, 20.0, 10.0);
            ctx.fill_rect(x + 20.0, ground_y + 50.0, 20.0, 10.0);
            x += pattern;
        }
    }

    fn draw_bird(&self, bird: &Bird, flapping: bool) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(bird.pos.x as f64, bird.pos.y as f64);
        let _ = ctx.rotate(bird.rotation as f64);

        // Body
        if let Ok(body) = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, 20.0) {
            let _ = body.add_color_stop(0.0, "#FFE566");
            let _ = body.add_color_stop(1.0, "#FFB800");
            ctx.set_fill_style_canvas_gradient(&body);
        } else {
            ctx.set_fill_style_str("#FFB800");
        }
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, 20.0, 16.0, 0.0, 0.0, TAU);
        ctx.fill();

        // Belly
        ctx.set_fill_style_str("#FFF5CC");
        ctx.begin_path();
        let _ = ctx.ellipse(5.0, 5.0, 10.0, 8.0, 0.0, 0.0, TAU);
        ctx.fill();

        // Wing, lifted while flapping
        ctx.set_fill_style_str("#E69500");
        ctx.begin_path();
        let (wing_y, wing_tilt) = if flapping { (-5.0, -0.3) } else { (2.0, 0.2) };
        let _ = ctx.ellipse(-5.0, wing_y, 10.0, 6.0, wing_tilt, 0.0, TAU);
        ctx.fill();

        // Eye
        ctx.set_fill_style_str("#FFFFFF");
        ctx.begin_path();
        let _ = ctx.arc(10.0, -5.0, 8.0, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str("#1A1A1A");
        ctx.begin_path();
        let _ = ctx.arc(12.0, -5.0, 4.0, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str("#FFFFFF");
        ctx.begin_path();
        let _ = ctx.arc(13.0, -7.0, 2.0, 0.0, TAU);
        ctx.fill();

        // Beak
        ctx.set_fill_style_str("#FF6B35");
        ctx.begin_path();
        ctx.move_to(18.0, 0.0);
        ctx.line_to(28.0, 3.0);
        ctx.line_to(18.0, 6.0);
        ctx.close_path();
        ctx.fill();

        // Blush
        ctx.set_fill_style_str("rgba(255, 150, 150, 0.5)");
        ctx.begin_path();
        let _ = ctx.ellipse(5.0, 5.0, 5.0, 3.0, 0.0, 0.0, TAU);
        ctx.fill();

        ctx.restore();
    }
}
