//! Canvas 2D renderer

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::ground::{self, MOUNTAIN_OUTLINE, MOUNTAINS, SKY_HORIZON, SKY_TOP};
use crate::error::WalkError;
use crate::sim::{Footprint, FootprintTrail, TerrainTrack};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl CanvasRenderer {
    /// Acquire the 2D context. Failing here is fatal for the page.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, WalkError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| WalkError::MissingRenderContext("getContext('2d') threw".into()))?
            .ok_or_else(|| WalkError::MissingRenderContext("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| {
                WalkError::MissingRenderContext("context is not a CanvasRenderingContext2d".into())
            })?;
        let size = (canvas.width(), canvas.height());
        Ok(Self { canvas, ctx, size })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.size = (width, height);
    }

    /// Draw one frame as seen from `camera`
    pub fn render(&self, track: &TerrainTrack, camera: f64, footprints: &FootprintTrail) {
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        let horizon = ground::horizon_y(h);
        self.draw_sky(w, horizon);
        self.draw_mountains(w, horizon);

        for (y, height, color) in ground::ground_bands(track, camera, h) {
            self.ctx.set_fill_style_str(&color.to_hex());
            self.ctx.fill_rect(0.0, y, w, height);
        }

        for print in footprints.prints() {
            self.draw_footprint(print);
        }
    }

    fn draw_sky(&self, w: f64, horizon: f64) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, horizon);
        gradient.add_color_stop(0.0, &SKY_TOP.to_hex()).ok();
        gradient.add_color_stop(1.0, &SKY_HORIZON.to_hex()).ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, horizon);
    }

    fn draw_mountains(&self, w: f64, horizon: f64) {
        self.ctx.set_fill_style_str(&MOUNTAINS.to_hex());
        self.ctx.begin_path();
        for (i, (fx, fy)) in MOUNTAIN_OUTLINE.iter().enumerate() {
            let (x, y) = (w * fx, horizon * fy);
            if i == 0 {
                self.ctx.move_to(x, y);
            } else {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_footprint(&self, print: &Footprint) {
        let alpha = print.opacity * 0.2;
        let rot = print.rotation as f64;
        let toe = print.toe_pos();

        self.ctx
            .set_fill_style_str(&format!("rgba(0, 0, 0, {:.3})", alpha));
        self.ctx.begin_path();
        self.ctx
            .ellipse(print.pos.x as f64, print.pos.y as f64, 10.0, 20.0, rot, 0.0, TAU)
            .ok();
        self.ctx
            .ellipse(toe.x as f64, toe.y as f64, 15.0, 12.0, rot, 0.0, TAU)
            .ok();
        self.ctx.fill();
    }
}
