//! Logical input actions
//!
//! Button mappings (Xbox/PlayStation):
//! - A/X = Jump / confirm
//! - B/O = Advance dialogue
//! - LB/L1 = Zoom out (hold)
//! - Y/Triangle = Restart
//! - Start = Pause
//! - Select = Quit
//! - D-pad / left stick = Move, and Up/Down in menus and puzzles

/// All actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Up,
    Down,
    Jump,
    Advance,
    ZoomOut,
    Pause,
    Restart,
    Quit,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Advance,
        Action::ZoomOut,
        Action::Pause,
        Action::Restart,
        Action::Quit,
    ];

    pub(crate) fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Short prompt label for on-screen hints
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveLeft => "Left",
            Action::MoveRight => "Right",
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Jump => "Space",
            Action::Advance => "Enter",
            Action::ZoomOut => "Z",
            Action::Pause => "Esc",
            Action::Restart => "R",
            Action::Quit => "Q",
        }
    }
}

/// Snapshot of action state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    held: u32,
    pressed: u32,
    released: u32,
}

impl InputFrame {
    /// Build from this tick's held set and last tick's
    pub fn from_masks(held: u32, previous: u32) -> Self {
        Self {
            held,
            pressed: held & !previous,
            released: previous & !held,
        }
    }

    pub fn held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Went down this tick
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    pub fn released(&self, action: Action) -> bool {
        self.released & action.bit() != 0
    }

    /// Same held state with the edges consumed. Used for the extra ticks
    /// when one frame runs several, so a press only fires once.
    pub fn without_edges(&self) -> Self {
        Self { held: self.held, pressed: 0, released: 0 }
    }

    /// Fold in edges from an earlier frame that ran no ticks.
    /// Held state is always the newer frame's.
    pub fn with_carried_edges(&self, earlier: &InputFrame) -> Self {
        Self {
            held: self.held,
            pressed: self.pressed | earlier.pressed,
            released: self.released | earlier.released,
        }
    }

    /// Test/scripting helper: mark an action held and pressed
    pub fn press(mut self, action: Action) -> Self {
        self.held |= action.bit();
        self.pressed |= action.bit();
        self
    }

    /// Test/scripting helper: mark an action held without an edge
    pub fn hold(mut self, action: Action) -> Self {
        self.held |= action.bit();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carried_edges() {
        let skipped = InputFrame::default().press(Action::Jump);
        let now = InputFrame::default().hold(Action::MoveRight);
        let merged = now.with_carried_edges(&skipped);
        assert!(merged.pressed(Action::Jump));
        assert!(!merged.held(Action::Jump));
        assert!(merged.held(Action::MoveRight));
    }

    #[test]
    fn test_edges_from_masks() {
        let prev = Action::Jump.bit() | Action::MoveLeft.bit();
        let now = Action::MoveLeft.bit() | Action::Pause.bit();
        let f = InputFrame::from_masks(now, prev);
        assert!(f.held(Action::MoveLeft));
        assert!(!f.pressed(Action::MoveLeft));
        assert!(f.pressed(Action::Pause));
        assert!(f.released(Action::Jump));
        assert!(!f.held(Action::Jump));
    }

    #[test]
    fn test_without_edges_keeps_held() {
        let f = InputFrame::default().press(Action::Jump).hold(Action::MoveRight);
        let rest = f.without_edges();
        assert!(rest.held(Action::Jump));
        assert!(rest.held(Action::MoveRight));
        assert!(!rest.pressed(Action::Jump));
    }

    #[test]
    fn test_bits_are_distinct() {
        let all = Action::ALL.iter().fold(0u32, |acc, a| {
            assert_eq!(acc & a.bit(), 0);
            acc | a.bit()
        });
        assert_eq!(all.count_ones() as usize, Action::ALL.len());
    }
}
