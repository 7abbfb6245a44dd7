//! In-game HUD
//!
//! Title and level, score readout, case panel with the required points,
//! the wisdom terminal and a controls hint. Drawn over the 3D frame.

use macroquad::prelude::*;
use crate::data::PointRegistry;
use super::layout::{
    draw_button, draw_panel, text_width, wrap_text, Rect, CRIMSON, CYAN, GOLD, MUTED_COLOR,
    TEXT_COLOR,
};
use super::session::GameSession;

/// Score below which the readout pulses red
pub const LOW_SCORE: i32 = 30;

const MARGIN: f32 = 24.0;
const PANEL_WIDTH: f32 = 320.0;
const PADDING: f32 = 16.0;

/// Something the player asked for from the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    None,
    Restart,
}

/// Screen rect of the reset button, so the frame loop can keep presses on it
/// from also throwing a needle
pub fn reset_button_rect() -> Rect {
    Rect::new(screen_width() - MARGIN - 96.0, screen_height() - MARGIN - 30.0, 96.0, 30.0)
}

/// Every rect that swallows pointer presses
pub fn blocking_rects() -> Vec<Rect> {
    vec![reset_button_rect()]
}

pub fn draw_hud(
    session: &GameSession,
    registry: &PointRegistry,
    wisdom: &str,
    presses: &[(f32, f32)],
    time: f32,
) -> HudAction {
    draw_title(session);
    draw_score(session.score(), time);
    draw_case_panel(session, registry, wisdom);
    draw_controls_hint();

    let reset = reset_button_rect();
    draw_button(reset, "RESET", MUTED_COLOR, 14.0);
    if reset.pressed(presses) {
        HudAction::Restart
    } else {
        HudAction::None
    }
}

fn draw_title(session: &GameSession) {
    let y = MARGIN + 30.0;
    draw_text("ACU", MARGIN, y, 40.0, WHITE);
    draw_text("CYBER", MARGIN + text_width("ACU", 40.0), y, 40.0, CYAN);

    let case = session.case();
    let subtitle = format!("LEVEL {}: {}", session.level() + 1, case.title.to_uppercase());
    draw_text(&subtitle, MARGIN, y + 26.0, 18.0, GOLD);
}

fn draw_score(score: i32, time: f32) {
    let rect = Rect::new(screen_width() - MARGIN - 140.0, MARGIN, 140.0, 76.0);
    draw_panel(rect);
    draw_text("QI", rect.x + PADDING, rect.y + 22.0, 14.0, MUTED_COLOR);

    let color = if score < LOW_SCORE {
        let pulse = 0.6 + 0.4 * (time * 6.0).sin();
        Color::new(CRIMSON.r, CRIMSON.g, CRIMSON.b, pulse)
    } else {
        WHITE
    };
    let text = score.to_string();
    draw_text(&text, rect.right() - PADDING - text_width(&text, 40.0), rect.bottom() - 16.0, 40.0, color);
}

fn draw_case_panel(session: &GameSession, registry: &PointRegistry, wisdom: &str) {
    let width = PANEL_WIDTH.min(screen_width() - MARGIN * 2.0).max(120.0);
    let inner = width - PADDING * 2.0;
    let case = session.case();

    let symptom_lines = wrap_text(&case.symptoms, 18.0, inner);
    let wisdom_lines = wrap_text(&format!("\"{}\"", wisdom), 15.0, inner);

    let line_h = 22.0;
    let entry_h = 24.0;
    let case_h = PADDING * 2.0
        + 20.0
        + symptom_lines.len() as f32 * line_h
        + 16.0
        + 20.0
        + case.required_points.len() as f32 * entry_h;
    let wisdom_h = PADDING * 2.0 + 16.0 + wisdom_lines.len() as f32 * 20.0;
    let total_h = case_h + 12.0 + wisdom_h;

    let x = screen_width() - MARGIN - width;
    let y = ((screen_height() - total_h) * 0.5).max(MARGIN + 90.0);

    // Case details
    let case_rect = Rect::new(x, y, width, case_h);
    draw_panel(case_rect);
    let tx = x + PADDING;
    let mut ty = y + PADDING + 12.0;
    draw_text("SYMPTOMS", tx, ty, 14.0, GOLD);
    ty += 20.0;
    for line in &symptom_lines {
        draw_text(line, tx, ty + 4.0, 18.0, TEXT_COLOR);
        ty += line_h;
    }
    ty += 16.0;
    draw_text("REQUIRED POINTS", tx, ty, 14.0, CYAN);
    ty += 20.0;

    for id in &case.required_points {
        let hit = session.is_hit(id);
        let label = match registry.get(id) {
            Some(p) => format!("{} ({})", p.name, p.id),
            None => id.clone(),
        };
        let dot = if hit { GOLD } else { Color::new(0.3, 0.3, 0.32, 1.0) };
        draw_circle(tx + 6.0, ty, 6.0, dot);

        let text_x = tx + 22.0;
        if hit {
            let faded = Color::new(GOLD.r, GOLD.g, GOLD.b, 0.5);
            draw_text(&label, text_x, ty + 5.0, 16.0, faded);
            draw_line(text_x, ty, text_x + text_width(&label, 16.0), ty, 1.5, faded);
        } else {
            draw_text(&label, text_x, ty + 5.0, 16.0, TEXT_COLOR);
        }
        ty += entry_h;
    }

    // Wisdom terminal
    let term = Rect::new(x, case_rect.bottom() + 12.0, width, wisdom_h);
    draw_rectangle(term.x, term.y, term.w, term.h, Color::new(0.0, 0.95, 1.0, 0.05));
    draw_rectangle_lines(term.x, term.y, term.w, term.h, 1.0, Color::new(0.0, 0.95, 1.0, 0.2));
    let mut wy = term.y + PADDING + 8.0;
    draw_text("WISDOM TERMINAL:", tx, wy, 12.0, Color::new(0.0, 0.95, 1.0, 0.5));
    wy += 20.0;
    for line in &wisdom_lines {
        draw_text(line, tx, wy, 15.0, CYAN);
        wy += 20.0;
    }
}

fn draw_controls_hint() {
    let rect = Rect::new(MARGIN, screen_height() - MARGIN - 44.0, 420.0, 44.0);
    draw_panel(rect);
    let key = Rect::new(rect.x + 12.0, rect.y + 8.0, 58.0, 28.0);
    draw_rectangle_lines(key.x, key.y, key.w, key.h, 1.0, MUTED_COLOR);
    draw_text("CLICK", key.x + 8.0, key.y + 19.0, 14.0, WHITE);
    draw_text("THROW NEEDLE", key.right() + 10.0, key.y + 19.0, 14.0, MUTED_COLOR);
    draw_text("|  BODY ROTATES ON ITS OWN", key.right() + 130.0, key.y + 19.0, 14.0, MUTED_COLOR);
}
