//! Immediate-mode overlays drawn over the presented frame
//!
//! Nothing here owns game state: every screen is a function of the
//! orchestrator, leaderboard or challenge it is handed, rebuilt each frame.
//! The few pieces of widget state (pause selection, name field) live in the
//! app's screen stack.

mod theme;
mod widgets;
mod menu;
mod hud;
mod screens;
mod text_input;

pub use theme::*;
pub use widgets::Canvas;
pub use menu::{PauseItem, PauseMenu};
pub use hud::{draw_dialogue, draw_hud, format_time, HudInfo};
pub use screens::*;
pub use text_input::TextInputState;
