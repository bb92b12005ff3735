//! Input handling with gamepad support
//!
//! Action-based input that works with both keyboard and gamepad. Gameplay
//! code only ever sees `InputFrame` snapshots, so it can be driven from
//! tests without a window.
//!
//! Native: gilrs for gamepads. WASM: keyboard only.

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use state::*;
