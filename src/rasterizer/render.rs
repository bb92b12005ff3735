//! Framebuffer and blitting

use super::math::Rect;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Interpolate between two colors (alpha taken from self)
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a,
        }
    }
}

/// Decoded RGBA image, drawn with nearest-neighbor scaling
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Sprite {
    /// 1x1 solid sprite. Scaled up it fills its destination rect.
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: color.to_bytes().to_vec(),
        }
    }

    fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width + x) * 4;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]]
    }
}

pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Clear with a vertical gradient, top_color at y=0
    pub fn clear_gradient(&mut self, top_color: Color, bottom_color: Color) {
        let h = self.height;
        for y in 0..h {
            let t = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
            let bytes = top_color.lerp(bottom_color, t).to_bytes();
            let row = y * self.width * 4;
            for px in self.pixels[row..row + self.width * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&bytes);
            }
        }
    }

    /// Alpha-blend a single pixel. Out-of-bounds writes are ignored.
    fn blend_pixel(&mut self, x: i32, y: i32, src: [u8; 4]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        match src[3] {
            0 => {}
            255 => self.pixels[idx..idx + 4].copy_from_slice(&src),
            a => {
                let a = a as u16;
                for c in 0..3 {
                    let dst = self.pixels[idx + c] as u16;
                    self.pixels[idx + c] = ((src[c] as u16 * a + dst * (255 - a)) / 255) as u8;
                }
                self.pixels[idx + 3] = 255;
            }
        }
    }

    /// Pixel bounds of a screen-space rect, clipped to the framebuffer
    fn clip(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.floor().max(0.0) as i32;
        let y0 = rect.y.floor().max(0.0) as i32;
        let x1 = rect.right().ceil().min(self.width as f32) as i32;
        let y1 = rect.bottom().ceil().min(self.height as f32) as i32;
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }

    /// Fill a screen-space rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        let bytes = color.to_bytes();
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, bytes);
            }
        }
    }

    /// One-pixel rectangle outline
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let t = 1.0;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.h), color);
    }

    /// Draw a sprite stretched over a screen-space rectangle.
    /// `flip_x` mirrors it horizontally (left-facing actors).
    pub fn blit(&mut self, sprite: &Sprite, dest: Rect, flip_x: bool) {
        if sprite.width == 0 || sprite.height == 0 || dest.w <= 0.0 || dest.h <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dest) else { return };
        for y in y0..y1 {
            let v = ((y as f32 + 0.5 - dest.y) / dest.h * sprite.height as f32) as usize;
            let v = v.min(sprite.height - 1);
            for x in x0..x1 {
                let u = ((x as f32 + 0.5 - dest.x) / dest.w * sprite.width as f32) as usize;
                let u = u.min(sprite.width - 1);
                let u = if flip_x { sprite.width - 1 - u } else { u };
                self.blend_pixel(x, y, sprite.texel(u, v));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(fb: &Framebuffer, x: usize, y: usize) -> [u8; 4] {
        let i = (y * fb.width + x) * 4;
        [fb.pixels[i], fb.pixels[i + 1], fb.pixels[i + 2], fb.pixels[i + 3]]
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Color::BLACK);
        fb.fill_rect(Rect::new(-4.0, 6.0, 6.0, 10.0), Color::WHITE);
        assert_eq!(pixel(&fb, 0, 7), [255, 255, 255, 255]);
        assert_eq!(pixel(&fb, 2, 7), [0, 0, 0, 255]);
        assert_eq!(pixel(&fb, 0, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn test_blit_flip() {
        let sprite = Sprite {
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 255, 0, 0, 255, 255],
        };
        let mut fb = Framebuffer::new(2, 1);
        fb.blit(&sprite, Rect::new(0.0, 0.0, 2.0, 1.0), true);
        assert_eq!(pixel(&fb, 0, 0), [0, 0, 255, 255]);
        assert_eq!(pixel(&fb, 1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_texels_skip() {
        let sprite = Sprite::solid(Color::with_alpha(10, 10, 10, 0));
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Color::WHITE);
        fb.blit(&sprite, Rect::new(0.0, 0.0, 2.0, 2.0), false);
        assert_eq!(pixel(&fb, 1, 1), [255, 255, 255, 255]);
    }
}
