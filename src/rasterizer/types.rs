//! Core types for the rasterizer

use serde::{Deserialize, Serialize};

/// How a drawn color combines with the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// back * (1 - a) + front * a
    #[default]
    Alpha,
    /// back + front * a, clamped to 255 (glow, sparks)
    Add,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[cfg(test)]
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    #[cfg(test)]
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Interpolate between two colors
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        Self {
            r: (self.r as f32 * inv_t + other.r as f32 * t) as u8,
            g: (self.g as f32 * inv_t + other.g as f32 * t) as u8,
            b: (self.b as f32 * inv_t + other.b as f32 * t) as u8,
        }
    }

    /// Blend this color (front) over `back` with coverage `alpha` (0.0-1.0)
    pub fn blend(self, back: Color, mode: BlendMode, alpha: f32) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        match mode {
            BlendMode::Alpha => back.lerp(self, a),
            BlendMode::Add => Color {
                r: (back.r as f32 + self.r as f32 * a).min(255.0) as u8,
                g: (back.g as f32 + self.g as f32 * a).min(255.0) as u8,
                b: (back.b as f32 + self.b as f32 * a).min(255.0) as u8,
            },
        }
    }

    /// Convert to [u8; 4] for framebuffer (RGBA, always opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let gold = Color::from_hex(0xffcc33);
        assert_eq!(gold, Color::new(255, 204, 51));
    }

    #[test]
    fn test_alpha_blend() {
        let c = Color::WHITE.blend(Color::BLACK, BlendMode::Alpha, 0.5);
        assert!((c.r as i32 - 127).abs() <= 1);
        let full = Color::WHITE.blend(Color::BLACK, BlendMode::Alpha, 1.0);
        assert_eq!(full, Color::WHITE);
        let none = Color::WHITE.blend(Color::BLACK, BlendMode::Alpha, 0.0);
        assert_eq!(none, Color::BLACK);
    }

    #[test]
    fn test_additive_blend_clamps() {
        let back = Color::new(200, 10, 0);
        let c = Color::new(100, 100, 100).blend(back, BlendMode::Add, 1.0);
        assert_eq!(c, Color::new(255, 110, 100));
    }
}
