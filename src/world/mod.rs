//! World module - tile-based level geometry
//!
//! - Level definitions in tile units (RON, optionally brotli-packed)
//! - Per-level static collision world with hazard detection
//! - Portal and collectible placement
//! - The built-in campaign

mod campaign;
mod geometry;
mod level;
mod placement;

pub use campaign::*;
pub use geometry::*;
pub use level::*;
pub use placement::*;
