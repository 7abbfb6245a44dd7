//! Framebuffer and primitive drawing
//!
//! Everything in the scene is drawn as splats: round discs for acupoints,
//! glows and sparks, single pixels for the body cloud, and Bresenham lines
//! for needles. No depth buffer; callers draw back to front.

use super::types::{BlendMode, Color};

pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
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

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Read back a pixel (None when out of bounds)
    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    /// Set pixel with blending
    pub fn set_pixel_blended(&mut self, x: usize, y: usize, color: Color, mode: BlendMode, alpha: f32) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;

            let back = Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]);
            let bytes = color.blend(back, mode, alpha).to_bytes();
            self.pixels[idx..idx + 4].copy_from_slice(&bytes);
        }
    }

    fn set_pixel_safe(&mut self, x: i32, y: i32, color: Color, mode: BlendMode, alpha: f32) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            self.set_pixel_blended(x as usize, y as usize, color, mode, alpha);
        }
    }

    /// Fill a disc centered at (cx, cy). Discs smaller than a pixel collapse
    /// to a single pixel with coverage scaled by their area.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color, mode: BlendMode, alpha: f32) {
        if alpha <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }

        if radius < 0.5 {
            let coverage = (std::f32::consts::PI * radius * radius).min(1.0);
            self.set_pixel_safe(cx.floor() as i32, cy.floor() as i32, color, mode, alpha * coverage.max(0.25));
            return;
        }

        let min_x = (cx - radius).floor().max(0.0) as i32;
        let max_x = (cx + radius).ceil().min(self.width as f32 - 1.0) as i32;
        let min_y = (cy - radius).floor().max(0.0) as i32;
        let max_y = (cy + radius).ceil().min(self.height as f32 - 1.0) as i32;
        let r2 = radius * radius;

        for y in min_y..=max_y {
            let dy = y as f32 + 0.5 - cy;
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel_safe(x, y, color, mode, alpha);
                }
            }
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line_blended(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, mode: BlendMode, alpha: f32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel_safe(x, y, color, mode, alpha);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_and_read() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Color::from_hex(0x050505));
        assert_eq!(fb.get_pixel(3, 2), Some(Color::new(5, 5, 5)));
        assert_eq!(fb.get_pixel(4, 0), None);
        assert!(fb.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = Framebuffer::new(4, 3);
        fb.resize(8, 6);
        assert_eq!(fb.pixels.len(), 8 * 6 * 4);
        assert_eq!((fb.width, fb.height), (8, 6));
    }

    #[test]
    fn test_fill_disc_covers_center_not_corner() {
        let mut fb = Framebuffer::new(20, 20);
        fb.clear(Color::BLACK);
        fb.fill_disc(10.0, 10.0, 4.0, Color::WHITE, BlendMode::Alpha, 1.0);
        assert_eq!(fb.get_pixel(10, 10), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(14, 14), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_disc_offscreen_is_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Color::BLACK);
        fb.fill_disc(-50.0, -50.0, 3.0, Color::WHITE, BlendMode::Add, 1.0);
        fb.fill_disc(f32::NAN, 2.0, 3.0, Color::WHITE, BlendMode::Add, 1.0);
        assert!(fb.pixels.chunks_exact(4).all(|p| p[0] == 0));
    }

    #[test]
    fn test_line_endpoints() {
        let mut fb = Framebuffer::new(10, 10);
        fb.clear(Color::BLACK);
        fb.draw_line_blended(1, 1, 8, 5, Color::WHITE, BlendMode::Alpha, 1.0);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(8, 5), Some(Color::WHITE));
    }
}
