//! Gamepad support
//!
//! Native: gilrs. WASM: no gamepad, every query reports nothing held.

// Standard gamepad button indices (Xbox layout)
pub mod button {
    pub const A: u32 = 0;
    pub const B: u32 = 1;
    pub const X: u32 = 2;
    pub const Y: u32 = 3;
    pub const LB: u32 = 4;
    pub const RB: u32 = 5;
    pub const SELECT: u32 = 8;
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Stick deflection that counts as a direction
const STICK_THRESHOLD: f32 = 0.5;

#[cfg(target_arch = "wasm32")]
mod platform {
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn button_mask(&self) -> u32 {
            0
        }

        pub fn left_stick(&self) -> (f32, f32) {
            (0.0, 0.0)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use super::button;

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                // Drain events so gilrs updates its cached state
                while gilrs.next_event().is_some() {}
            }
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        pub fn button_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::B; }
            if gp.is_pressed(GilrsButton::West) { mask |= 1 << button::X; }
            if gp.is_pressed(GilrsButton::North) { mask |= 1 << button::Y; }
            if gp.is_pressed(GilrsButton::LeftTrigger) { mask |= 1 << button::LB; }
            if gp.is_pressed(GilrsButton::RightTrigger) { mask |= 1 << button::RB; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        /// Left stick, y up
        pub fn left_stick(&self) -> (f32, f32) {
            let Some(gp) = self.active() else { return (0.0, 0.0) };
            (gp.value(Axis::LeftStickX), gp.value(Axis::LeftStickY))
        }
    }
}

pub use platform::Gamepad;

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold the left stick into d-pad bits
pub fn stick_as_dpad(x: f32, y: f32) -> u32 {
    let mut mask = 0;
    if x <= -STICK_THRESHOLD { mask |= 1 << button::DPAD_LEFT; }
    if x >= STICK_THRESHOLD { mask |= 1 << button::DPAD_RIGHT; }
    if y >= STICK_THRESHOLD { mask |= 1 << button::DPAD_UP; }
    if y <= -STICK_THRESHOLD { mask |= 1 << button::DPAD_DOWN; }
    mask
}
