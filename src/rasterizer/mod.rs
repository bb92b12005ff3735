//! 2D software framebuffer
//!
//! The world is composited into an RGBA byte buffer each frame (solid rects
//! and nearest-neighbor sprite blits), then uploaded to a GPU texture once.
//!
//! # Module Organization
//!
//! - `math` - Vec2, Rect
//! - `render` - Color, Sprite, Framebuffer
//! - `constants` - Framebuffer resolution

pub mod constants;
pub mod math;
pub mod render;

pub use constants::{HEIGHT, WIDTH};
pub use math::{Rect, Vec2};
pub use render::{Color, Framebuffer, Sprite};
