//! Rasterizer constants
//!
//! Framebuffer resolution. The world is rendered at this fixed size and
//! letterboxed to the window.

/// Framebuffer width
pub const WIDTH: usize = 640;

/// Framebuffer height
pub const HEIGHT: usize = 360;
