//! Drawing helpers in framebuffer coordinates
//!
//! Overlays are laid out against the 640x360 frame and scaled to wherever
//! `present` put it in the window, so text stays aligned with the world.

use macroquad::prelude::*;
use crate::game::Viewport;
use crate::rasterizer::{HEIGHT, WIDTH};
use super::theme::*;

/// Immediate-mode painter over the presented frame
pub struct Canvas {
    vp: Viewport,
}

impl Canvas {
    pub fn new(vp: Viewport) -> Self {
        Self { vp }
    }

    pub fn width(&self) -> f32 {
        WIDTH as f32
    }

    pub fn height(&self) -> f32 {
        HEIGHT as f32
    }

    /// Text with its baseline at (x, y)
    pub fn text(&self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let (sx, sy) = self.vp.to_screen(x, y);
        draw_text(text, sx, sy, size * self.vp.scale, color);
    }

    /// Width of `text` in framebuffer pixels
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = (size * self.vp.scale).max(1.0);
        measure_text(text, None, scaled as u16, 1.0).width / self.vp.scale.max(f32::EPSILON)
    }

    pub fn text_centered(&self, text: &str, y: f32, size: f32, color: Color) {
        let w = self.measure(text, size);
        self.text(text, (self.width() - w) * 0.5, y, size, color);
    }

    pub fn text_right(&self, text: &str, right: f32, y: f32, size: f32, color: Color) {
        let w = self.measure(text, size);
        self.text(text, right - w, y, size, color);
    }

    pub fn fill(&self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (sx, sy) = self.vp.to_screen(x, y);
        draw_rectangle(sx, sy, w * self.vp.scale, h * self.vp.scale, color);
    }

    /// Bordered panel
    pub fn panel(&self, x: f32, y: f32, w: f32, h: f32) {
        self.fill(x, y, w, h, PANEL_BG);
        let (sx, sy) = self.vp.to_screen(x, y);
        draw_rectangle_lines(sx, sy, w * self.vp.scale, h * self.vp.scale, 1.0, PANEL_BORDER);
    }

    /// Panel centered on the frame
    pub fn panel_centered(&self, w: f32, h: f32) -> (f32, f32) {
        let x = (self.width() - w) * 0.5;
        let y = (self.height() - h) * 0.5;
        self.panel(x, y, w, h);
        (x, y)
    }

    /// Dim the whole frame
    pub fn scrim(&self) {
        self.fill(0.0, 0.0, self.width(), self.height(), SCRIM);
    }
}
