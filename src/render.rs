//! 2D-canvas presentation sink
//!
//! Draws the playfield letterboxed into whatever shape the canvas has:
//! normalized coordinates span 0..1 in x and 0..0.75 in y, scaled to the
//! largest 4:3 region that fits. Pure presentation; nothing here feeds
//! back into the simulation.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::FIELD_HEIGHT;
use crate::sim::GameState;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Render one frame of gameplay
    pub fn draw(&self, state: &GameState) {
        let Some(ctx) = self.setup_context() else {
            return;
        };

        ctx.save();
        self.draw_rect(
            &ctx,
            state.left_bat.pos.x,
            state.left_bat.pos.y,
            state.left_bat.size.x,
            state.left_bat.size.y,
        );
        self.draw_rect(
            &ctx,
            state.right_bat.pos.x,
            state.right_bat.pos.y,
            state.right_bat.size.x,
            state.right_bat.size.y,
        );
        self.draw_rect(
            &ctx,
            state.ball.pos.x,
            state.ball.pos.y,
            state.ball.size.x,
            state.ball.size.y,
        );
        ctx.restore();
    }

    /// Render the idle screen shown between rounds
    pub fn draw_start_screen(&self) {
        let Some(ctx) = self.clear() else { return };
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        ctx.set_text_align("center");
        ctx.set_font("50px serif");
        ctx.set_fill_style_str("white");
        let _ = ctx.fill_text_with_max_width("Press A on your controller", w / 2.0, h / 2.0, w / 2.0);
    }

    /// Blank the canvas, returning a context sized to the element
    fn clear(&self) -> Option<CanvasRenderingContext2d> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        self.canvas.set_width(self.canvas.client_width().max(0) as u32);
        self.canvas.set_height(self.canvas.client_height().max(0) as u32);
        ctx.set_fill_style_str("black");
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        Some(ctx)
    }

    /// Blank the canvas and map it so the playfield spans 0..1 x 0..0.75,
    /// letterboxed and outlined in white.
    fn setup_context(&self) -> Option<CanvasRenderingContext2d> {
        let ctx = self.clear()?;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let max_size = w.min(h * 4.0 / 3.0);

        ctx.set_stroke_style_str("white");
        ctx.stroke_rect(
            (w - max_size) / 2.0,
            (h - max_size * FIELD_HEIGHT as f64) / 2.0,
            max_size,
            max_size * FIELD_HEIGHT as f64,
        );

        let _ = ctx.scale(max_size, max_size);
        if max_size == w {
            let full_y = h / max_size;
            let _ = ctx.translate(0.0, (full_y - FIELD_HEIGHT as f64) / 2.0);
        } else {
            let full_x = w / max_size;
            let _ = ctx.translate((full_x - 1.0) / 2.0, 0.0);
        }
        Some(ctx)
    }

    /// Hollow white rectangle centered at (x, y) in playfield coordinates
    fn draw_rect(&self, ctx: &CanvasRenderingContext2d, x: f32, y: f32, w: f32, h: f32) {
        ctx.begin_path();
        ctx.set_stroke_style_str("white");
        ctx.set_line_width(0.002);
        ctx.rect(
            (x - w / 2.0) as f64,
            (y - h / 2.0) as f64,
            w as f64,
            h as f64,
        );
        ctx.stroke();
    }
}
