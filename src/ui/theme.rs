//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Panel background behind overlays
pub const PANEL_BG: Color = Color::new(0.06, 0.06, 0.09, 0.85);

/// Full-screen dim behind modal screens
pub const SCRIM: Color = Color::new(0.0, 0.0, 0.0, 0.55);

pub const PANEL_BORDER: Color = Color::new(0.45, 0.42, 0.6, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.95, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.55, 0.55, 0.62, 1.0);

/// Selected menu item / highlighted value
pub const ACCENT_COLOR: Color = Color::new(1.0, 0.82, 0.3, 1.0);

pub const GOOD_COLOR: Color = Color::new(0.45, 0.9, 0.5, 1.0);

pub const BAD_COLOR: Color = Color::new(0.95, 0.35, 0.35, 1.0);

// =============================================================================
// Font Sizes (framebuffer pixels, scaled to the window)
// =============================================================================

pub const FONT_SIZE_TITLE: f32 = 40.0;

pub const FONT_SIZE_HEADER: f32 = 22.0;

pub const FONT_SIZE_CONTENT: f32 = 16.0;

pub const FONT_SIZE_SMALL: f32 = 12.0;
