//! Canvas 2D renderer
//!
//! Draws the whole frame from a snapshot: scrolling background, ground,
//! player (spinning while airborne), obstacles, score HUD, and the
//! game-over card.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{GamePhase, ObstacleVisual, Snapshot};

/// Per-frame HUD values the simulation doesn't own
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    /// Persisted best score
    pub best: u64,
    /// The run that just ended set a new best
    pub new_best: bool,
    /// Smoothed frames per second
    pub fps: f64,
    /// Whether to draw the FPS counter
    pub show_fps: bool,
}

/// Renderer over a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attach to the canvas element with the given id
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into()?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        Ok(Self { ctx })
    }

    /// Draw one complete frame
    pub fn render(&self, snapshot: &Snapshot, hud: &HudInfo) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        self.draw_background(snapshot.background_x);
        self.draw_player(snapshot);
        self.draw_obstacles(snapshot);
        self.draw_score(snapshot.score);

        if hud.show_fps {
            self.draw_fps(hud.fps);
        }

        if snapshot.phase == GamePhase::GameOver {
            self.draw_game_over(snapshot.score, hud);
        }
    }

    /// Two panes of sky and ground, wrapping at one field width
    fn draw_background(&self, background_x: f32) {
        for pane in 0..2 {
            let x = (background_x + pane as f32 * FIELD_WIDTH) as f64;

            self.ctx.set_fill_style_str("#87ceeb");
            self.ctx.fill_rect(x, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

            // A distant hill per pane so the scroll reads
            self.ctx.set_fill_style_str("#b0d890");
            self.ctx.begin_path();
            let _ = self.ctx.ellipse(
                x + FIELD_WIDTH as f64 * 0.5,
                (GROUND_Y + PLAYER_HEIGHT) as f64,
                FIELD_WIDTH as f64 * 0.45,
                60.0,
                0.0,
                0.0,
                TAU,
            );
            self.ctx.fill();
        }

        // Ground band under the resting line
        let ground_top = (GROUND_Y + PLAYER_HEIGHT) as f64;
        self.ctx.set_fill_style_str("#5c8a3a");
        self.ctx.fill_rect(
            0.0,
            ground_top,
            FIELD_WIDTH as f64,
            FIELD_HEIGHT as f64 - ground_top,
        );
    }

    fn draw_player(&self, snapshot: &Snapshot) {
        let ctx = &self.ctx;
        let player = snapshot.player;
        let (w, h) = (player.width as f64, player.height as f64);
        let (cx, cy) = (player.pos.x as f64 + w / 2.0, player.pos.y as f64 + h / 2.0);

        ctx.save();
        let _ = ctx.translate(cx, cy);
        if player.spinning {
            // One full revolution over the spin frame cycle
            let angle = (player.spin_frame / SPIN_FRAME_COUNT) as f64 * TAU;
            let _ = ctx.rotate(angle);
        }
        ctx.set_fill_style_str("#e8a33d");
        ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
        ctx.set_fill_style_str("#1c1c1c");
        ctx.fill_rect(w * 0.1, -h * 0.3, 8.0, 8.0);
        ctx.restore();
    }

    fn draw_obstacles(&self, snapshot: &Snapshot) {
        for obstacle in snapshot.obstacles {
            let color = match obstacle.visual {
                ObstacleVisual::Normal => "#8a6d3b",
                ObstacleVisual::Collided => "#d04034",
            };
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                obstacle.pos.x as f64,
                obstacle.pos.y as f64,
                obstacle.width as f64,
                obstacle.height as f64,
            );
        }
    }

    fn draw_score(&self, score: u64) {
        self.ctx.set_fill_style_str("black");
        self.ctx.set_font("20px Arial");
        self.ctx.set_text_align("left");
        let _ = self.ctx.fill_text(&format!("Score: {}", score), 10.0, 30.0);
    }

    fn draw_fps(&self, fps: f64) {
        self.ctx.set_fill_style_str("black");
        self.ctx.set_font("14px monospace");
        self.ctx.set_text_align("right");
        let _ = self
            .ctx
            .fill_text(&format!("{:.0} fps", fps), FIELD_WIDTH as f64 - 10.0, 20.0);
    }

    fn draw_game_over(&self, score: u64, hud: &HudInfo) {
        let ctx = &self.ctx;
        let (cx, cy) = (FIELD_WIDTH as f64 / 2.0, FIELD_HEIGHT as f64 / 2.0);

        ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        ctx.set_fill_style_str("black");
        ctx.set_font("30px Arial");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&format!("Score: {}", score), cx, cy);
        let _ = ctx.fill_text(&format!("Best: {}", hud.best), cx, cy + 40.0);

        if hud.new_best {
            ctx.set_fill_style_str("red");
            ctx.set_font("40px Arial");
            let _ = ctx.fill_text("New Best!", cx, cy + 80.0);
        }
    }
}
