//! Layout helpers and theme for the 2D overlay

use macroquad::prelude::*;

pub const CYAN: Color = Color::new(0.0, 0.953, 1.0, 1.0);
pub const GOLD: Color = Color::new(1.0, 0.8, 0.2, 1.0);
pub const CRIMSON: Color = Color::new(0.86, 0.15, 0.15, 1.0);
pub const TEXT_COLOR: Color = Color::new(0.92, 0.92, 0.92, 1.0);
pub const MUTED_COLOR: Color = Color::new(0.45, 0.45, 0.5, 1.0);
pub const PANEL_BG: Color = Color::new(0.0, 0.0, 0.0, 0.6);
pub const PANEL_BORDER: Color = Color::new(0.2, 0.2, 0.22, 1.0);

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of size (w, h) centered on (cx, cy)
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w * 0.5, cy - h * 0.5, w, h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if any press this frame landed inside
    pub fn pressed(&self, presses: &[(f32, f32)]) -> bool {
        presses.iter().any(|&(x, y)| self.contains(x, y))
    }
}

/// Approximate width of a line of text
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.55
}

/// Wrap text to fit within a given pixel width
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in words {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            if text_width(&test_line, font_size) <= max_width || current_line.is_empty() {
                current_line = test_line;
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }
        lines.push(current_line);
    }

    lines
}

/// Text horizontally centered on `cx`
pub fn draw_text_centered(text: &str, cx: f32, baseline: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (cx - dims.width * 0.5).round(), baseline.round(), font_size, color);
}

pub fn draw_panel(rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);
}

/// Outlined button that fills in on hover
pub fn draw_button(rect: Rect, label: &str, accent: Color, font_size: f32) {
    let (mx, my) = mouse_position();
    let hovered = rect.contains(mx, my);
    if hovered {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, accent);
    }
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, accent);
    let text_color = if hovered { Color::new(0.02, 0.02, 0.02, 1.0) } else { accent };
    draw_text_centered(label, rect.center_x(), rect.center_y() + font_size * 0.3, font_size, text_color);
}
