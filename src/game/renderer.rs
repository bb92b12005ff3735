//! Level renderer
//!
//! Composites the current level into the software framebuffer through the
//! camera transform, then uploads the frame as one texture and letterboxes
//! it into the window.

use macroquad::prelude::*;
use crate::asset::{SpriteId, SpriteLibrary};
use crate::rasterizer::{Color as RasterColor, Framebuffer, Rect as RasterRect};
use super::actor::KinematicActor;
use super::camera::Camera;
use super::orchestrator::LevelState;

const SKY_TOP: RasterColor = RasterColor::new(24, 26, 44);
const SKY_BOTTOM: RasterColor = RasterColor::new(58, 46, 72);
const LETTERBOX: Color = Color::new(10.0 / 255.0, 10.0 / 255.0, 12.0 / 255.0, 1.0);

/// Where the framebuffer landed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    /// Screen pixels per framebuffer pixel
    pub scale: f32,
}

impl Viewport {
    /// Framebuffer coordinates to window coordinates
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y + y * self.scale)
    }
}

/// Largest rect with the framebuffer's aspect ratio centered in `area`
pub fn fit_rect(fb_w: usize, fb_h: usize, area: RasterRect) -> RasterRect {
    let fb_aspect = fb_w as f32 / fb_h as f32;
    let area_aspect = area.w / area.h;
    if fb_aspect > area_aspect {
        let h = area.w / fb_aspect;
        RasterRect::new(area.x, area.y + (area.h - h) * 0.5, area.w, h)
    } else {
        let w = area.h * fb_aspect;
        RasterRect::new(area.x + (area.w - w) * 0.5, area.y, w, area.h)
    }
}

/// Tile an obstacle rect with the obstacle sprite, one blit per tile cell
fn draw_tiled(fb: &mut Framebuffer, camera: &Camera, sprites: &SpriteLibrary, id: SpriteId, rect: &RasterRect, tile: f32) {
    let sprite = sprites.get(id);
    let view = camera.view_size();
    let visible = RasterRect::new(camera.scroll.x, camera.scroll.y, view.x, view.y);
    if !rect.overlaps(&visible) {
        return;
    }

    // Only walk the cells inside the view
    let x0 = rect.x.max(visible.x - tile);
    let x1 = rect.right().min(visible.right() + tile);
    let y0 = rect.y.max(visible.y - tile);
    let y1 = rect.bottom().min(visible.bottom() + tile);
    let first_col = ((x0 - rect.x) / tile).floor().max(0.0);
    let first_row = ((y0 - rect.y) / tile).floor().max(0.0);

    let mut y = rect.y + first_row * tile;
    while y < y1 {
        let h = tile.min(rect.bottom() - y);
        let mut x = rect.x + first_col * tile;
        while x < x1 {
            let w = tile.min(rect.right() - x);
            fb.blit(sprite, camera.rect_to_screen(&RasterRect::new(x, y, w, h)), false);
            x += tile;
        }
        y += tile;
    }
}

fn draw_actor(fb: &mut Framebuffer, camera: &Camera, sprites: &SpriteLibrary, actor: &KinematicActor) {
    let mut dest = camera.rect_to_screen(&actor.bbox());
    // Two-frame walk bob
    if actor.anim_frame % 2 == 1 {
        dest.y -= camera.zoom();
    }
    fb.blit(sprites.get(actor.sprite), dest, actor.facing.mirrored());
}

/// Draw the level as seen by `camera` into `fb`
pub fn render_level(fb: &mut Framebuffer, level: &LevelState, camera: &Camera, sprites: &SpriteLibrary) {
    fb.clear_gradient(SKY_TOP, SKY_BOTTOM);

    let tile = level.world.tile_size.max(1.0);
    for obstacle in &level.world.obstacles {
        draw_tiled(fb, camera, sprites, SpriteId::Obstacle, obstacle, tile);
    }
    for hazard in &level.world.hazards {
        fb.blit(sprites.get(SpriteId::Hazard), camera.rect_to_screen(hazard), false);
    }

    let portal_sprite = if level.portal.open { SpriteId::PortalOpen } else { SpriteId::PortalClosed };
    fb.blit(sprites.get(portal_sprite), camera.rect_to_screen(&level.portal.rect), false);
    if level.portal.armed && !level.portal.open {
        fb.stroke_rect(camera.rect_to_screen(&level.portal.rect.pad(-2.0)), RasterColor::WHITE);
    }

    for (_, rect) in level.collectibles.live() {
        fb.blit(sprites.get(SpriteId::Collectible), camera.rect_to_screen(rect), false);
    }

    for hostile in &level.hostiles {
        draw_actor(fb, camera, sprites, &hostile.actor);
    }

    // Blink while invulnerable
    let blink = level.health.map_or(false, |hp| hp.is_invulnerable() && (hp.invulnerable_ticks / 4) % 2 == 1);
    if !blink {
        draw_actor(fb, camera, sprites, &level.player);
    }
}

/// Upload the framebuffer and draw it letterboxed into `area` (window pixels)
pub fn present(fb: &Framebuffer, area: RasterRect) -> Viewport {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);

    let dest = fit_rect(fb.width, fb.height, area);
    draw_rectangle(area.x, area.y, area.w, area.h, LETTERBOX);
    draw_texture_ex(
        &texture,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(dest.w, dest.h)),
            ..Default::default()
        },
    );

    Viewport { x: dest.x, y: dest.y, scale: dest.w / fb.width as f32 }
}
