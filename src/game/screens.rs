//! Start and game-over screens

use macroquad::prelude::*;
use super::layout::{
    draw_button, draw_text_centered, text_width, Rect, CRIMSON, CYAN, GOLD, MUTED_COLOR,
};

/// Numbers shown on the start screen
#[derive(Debug, Clone, Copy)]
pub struct StartStats {
    pub particles: usize,
    pub points: usize,
    pub cases: usize,
}

/// Compact particle count ("12k")
pub fn format_count(n: usize) -> String {
    if n >= 1000 {
        format!("{}k", n / 1000)
    } else {
        n.to_string()
    }
}

fn start_button_rect() -> Rect {
    Rect::centered(screen_width() * 0.5, screen_height() * 0.5 + 150.0, 260.0, 56.0)
}

/// Returns true when the player starts the game
pub fn draw_start_screen(stats: StartStats, presses: &[(f32, f32)]) -> bool {
    clear_background(Color::new(0.02, 0.02, 0.02, 1.0));
    let cx = screen_width() * 0.5;
    let cy = screen_height() * 0.5;

    let title_size = 72.0;
    let acu_w = text_width("ACU", title_size);
    let total_w = text_width("ACUCYBER", title_size);
    let left = cx - total_w * 0.5;
    draw_text("ACU", left, cy - 120.0, title_size, CYAN);
    draw_text("CYBER", left + acu_w, cy - 120.0, title_size, GOLD);

    draw_text_centered("\"Ancient paths, cyber light\"", cx, cy - 70.0, 22.0, MUTED_COLOR);

    // Stat row between two rules
    let row = Rect::centered(cx, cy, 540.0_f32.min(screen_width() - 40.0), 110.0);
    draw_line(row.x, row.y, row.right(), row.y, 1.0, Color::new(0.2, 0.2, 0.2, 1.0));
    draw_line(row.x, row.bottom(), row.right(), row.bottom(), 1.0, Color::new(0.2, 0.2, 0.2, 1.0));
    let stats = [
        (format!("{}+", format_count(stats.particles)), "QI PARTICLES", CYAN),
        (stats.points.to_string(), "ACTIVE POINTS", GOLD),
        (stats.cases.to_string(), "TREATMENT CASES", CRIMSON),
    ];
    let col_w = row.w / stats.len() as f32;
    for (i, (value, label, color)) in stats.iter().enumerate() {
        let col_cx = row.x + col_w * (i as f32 + 0.5);
        draw_text_centered(value, col_cx, row.center_y(), 32.0, *color);
        draw_text_centered(label, col_cx, row.center_y() + 28.0, 13.0, MUTED_COLOR);
    }

    let button = start_button_rect();
    draw_button(button, "OPEN THE PATH", CYAN, 22.0);

    button.pressed(presses) || is_key_pressed(KeyCode::Enter)
}

fn restart_button_rect() -> Rect {
    Rect::centered(screen_width() * 0.5, screen_height() * 0.5 + 70.0, 220.0, 48.0)
}

/// Overlay drawn over the still-running scene. Returns true on restart.
pub fn draw_game_over(score: i32, presses: &[(f32, f32)]) -> bool {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.9));
    let cx = screen_width() * 0.5;
    let cy = screen_height() * 0.5;

    draw_text_centered("QI DISPERSED", cx, cy - 50.0, 56.0, CRIMSON);
    draw_text_centered(
        "Your qi ran out before the patient recovered.",
        cx,
        cy - 10.0,
        20.0,
        MUTED_COLOR,
    );
    draw_text_centered(&format!("FINAL SCORE {}", score), cx, cy + 20.0, 16.0, MUTED_COLOR);

    let button = restart_button_rect();
    draw_button(button, "RESTORE SPIRIT", CRIMSON, 20.0);

    button.pressed(presses) || is_key_pressed(KeyCode::Enter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(12000), "12k");
        assert_eq!(format_count(1999), "1k");
        assert_eq!(format_count(361), "361");
    }
}
