//! Game glue around the engine
//!
//! - `session` - Score, level progression and the live frame inputs
//! - `hud` - In-game overlay
//! - `screens` - Start and game-over screens
//! - `layout` - Rect, text wrapping and theme colors

pub mod hud;
pub mod layout;
pub mod screens;
pub mod session;

pub use hud::{draw_hud, HudAction};
pub use screens::{draw_game_over, draw_start_screen, StartStats};
pub use session::GameSession;
