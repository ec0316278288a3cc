//! Canvas2D frame drawing
//!
//! One `draw` call per tick: full clear, play-area boundary, metrics panel,
//! player, rocks, then any phase overlay. Entities are plain data; how each
//! one looks is decided here.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Left edge of the metrics panel text
const PANEL_TEXT_X: f64 = (PLAY_AREA_WIDTH + 35.0) as f64;

const METRICS_FONT: &str = "20pt Consolas, monospace";
const OVERLAY_FONT: &str = "24pt Consolas, monospace";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Optional sprite; the outline rect is drawn either way
    player_img: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(PLAY_AREA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let player_img = HtmlImageElement::new().ok().map(|img| {
            img.set_src("images/player.png");
            img
        });

        Ok(Self {
            canvas,
            ctx,
            player_img,
        })
    }

    /// Draw one complete frame
    pub fn draw(&self, state: &GameState, settings: &Settings, fps: u32, best: Option<u32>) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        ctx.set_stroke_style_str("#000");
        ctx.stroke_rect(0.0, 0.0, PLAY_AREA_WIDTH as f64, PLAY_AREA_HEIGHT as f64);

        self.draw_metrics(state, settings, fps, best);
        self.draw_rocks(state, settings);
        self.draw_player(state);

        match state.phase {
            GamePhase::GameOver => self.draw_banner("Game Over!", "#f00"),
            GamePhase::Paused => self.draw_banner("Paused", "#555"),
            GamePhase::NotStarted | GamePhase::Running => {}
        }
    }

    /// Score/level panel to the right of the play area
    fn draw_metrics(&self, state: &GameState, settings: &Settings, fps: u32, best: Option<u32>) {
        let ctx = &self.ctx;
        let h = PLAY_AREA_HEIGHT as f64;

        ctx.set_fill_style_str("#000");
        ctx.set_font(METRICS_FONT);
        ctx.fill_text("Score", PANEL_TEXT_X, h / 4.0).ok();
        ctx.fill_text(&state.score.to_string(), PANEL_TEXT_X, h / 3.0)
            .ok();
        ctx.fill_text("Level", PANEL_TEXT_X, h / 2.0).ok();
        ctx.fill_text(&state.level.to_string(), PANEL_TEXT_X, h / 1.7)
            .ok();

        if let Some(best) = best {
            ctx.fill_text("Best", PANEL_TEXT_X, h / 1.4).ok();
            ctx.fill_text(&best.to_string(), PANEL_TEXT_X, h / 1.25)
                .ok();
        }

        if settings.show_fps {
            ctx.set_font("10pt Consolas, monospace");
            ctx.fill_text(&format!("{fps} fps"), PANEL_TEXT_X, h - 14.0)
                .ok();
        }
    }

    fn draw_player(&self, state: &GameState) {
        let ctx = &self.ctx;
        let p = state.player.pos;
        let size = PLAYER_SIZE as f64;

        ctx.set_stroke_style_str("#000");
        ctx.stroke_rect(p.x as f64, p.y as f64, size, size);

        match self.player_img.as_ref().filter(|img| img.complete()) {
            Some(img) => {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img, p.x as f64, p.y as f64, size, size,
                );
            }
            None => {
                ctx.set_fill_style_str("#333");
                ctx.fill_rect(p.x as f64, p.y as f64, size, size);
            }
        }
    }

    fn draw_rocks(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        for rock in &state.rocks {
            if settings.high_contrast {
                ctx.set_fill_style_str("#000");
            } else {
                ctx.set_fill_style_str(&rock.color.to_css());
            }
            ctx.fill_rect(
                rock.pos.x as f64,
                rock.pos.y as f64,
                rock.size as f64,
                rock.size as f64,
            );
        }
    }

    /// Centered message over the play area
    fn draw_banner(&self, text: &str, color: &str) {
        let ctx = &self.ctx;
        ctx.set_font(OVERLAY_FONT);
        ctx.set_fill_style_str(color);
        ctx.fill_text(
            text,
            (PLAY_AREA_WIDTH / 3.0) as f64,
            (PLAY_AREA_HEIGHT / 2.0) as f64,
        )
        .ok();
    }
}
