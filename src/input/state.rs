//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad once per frame and folds both into
//! a single `InputFrame` of held/pressed/released actions. Edges are derived
//! from consecutive snapshots so keyboard and gamepad behave the same.

use macroquad::prelude::{is_key_down, KeyCode};
use super::gamepad::{button, stick_as_dpad, Gamepad};
use super::{Action, InputFrame};

/// Unified keyboard + gamepad input
pub struct InputState {
    gamepad: Gamepad,
    previous: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new(), previous: 0 }
    }

    /// Call once per frame; returns this frame's snapshot
    pub fn poll(&mut self) -> InputFrame {
        self.gamepad.poll();

        let pad = self.gamepad.button_mask() | {
            let (x, y) = self.gamepad.left_stick();
            stick_as_dpad(x, y)
        };

        let held = Action::ALL
            .iter()
            .filter(|a| keyboard_down(**a) || gamepad_down(pad, **a))
            .fold(0u32, |mask, a| mask | a.bit());

        let frame = InputFrame::from_masks(held, self.previous);
        self.previous = held;
        frame
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn keyboard_down(action: Action) -> bool {
    match action {
        Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        Action::Up => is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        Action::Down => is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        Action::Jump => is_key_down(KeyCode::Space),
        Action::Advance => is_key_down(KeyCode::Enter) || is_key_down(KeyCode::KpEnter),
        Action::ZoomOut => is_key_down(KeyCode::Z),
        Action::Pause => is_key_down(KeyCode::Escape) || is_key_down(KeyCode::P),
        Action::Restart => is_key_down(KeyCode::R),
        Action::Quit => is_key_down(KeyCode::Q),
    }
}

/// Map a gamepad button mask onto an action
fn gamepad_down(mask: u32, action: Action) -> bool {
    let b = match action {
        Action::MoveLeft => button::DPAD_LEFT,
        Action::MoveRight => button::DPAD_RIGHT,
        Action::Up => button::DPAD_UP,
        Action::Down => button::DPAD_DOWN,
        Action::Jump => button::A,
        Action::Advance => button::B,
        Action::ZoomOut => button::LB,
        Action::Pause => button::START,
        Action::Restart => button::Y,
        Action::Quit => button::SELECT,
    };
    mask & (1 << b) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamepad_mapping() {
        let mask = (1 << button::A) | (1 << button::DPAD_LEFT);
        assert!(gamepad_down(mask, Action::Jump));
        assert!(gamepad_down(mask, Action::MoveLeft));
        assert!(!gamepad_down(mask, Action::MoveRight));
        assert!(!gamepad_down(0, Action::Pause));
    }
}
