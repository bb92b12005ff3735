//! Directional sequence-memory puzzle
//!
//! A run of arrows is shown one at a time; the player then repeats it. One
//! wrong arrow fails. Longer sequences on later levels. The sequence comes
//! from an RNG seeded by the level id, so a retry sees the same puzzle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::input::{Action, InputFrame};
use super::ChallengeError;

const BASE_LENGTH: usize = 3;
const MAX_LENGTH: usize = 12;
/// Seconds each arrow is visible
const SHOW_SECONDS: f32 = 0.6;
/// Blank between arrows so repeats are distinguishable
const GAP_SECONDS: f32 = 0.2;
/// Result stays on screen this long before the screen closes
const RESULT_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn from_input(input: &InputFrame) -> Option<Direction> {
        if input.pressed(Action::Up) {
            Some(Direction::Up)
        } else if input.pressed(Action::Down) {
            Some(Direction::Down)
        } else if input.pressed(Action::MoveLeft) {
            Some(Direction::Left)
        } else if input.pressed(Action::MoveRight) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceStage {
    Showing { index: usize, timer: f32 },
    Input { index: usize },
    Result { passed: bool, timer: f32 },
}

pub struct SequenceChallenge {
    level_id: u32,
    sequence: Vec<Direction>,
    stage: SequenceStage,
    /// Left with Esc rather than by answering
    abandoned: bool,
}

/// Puzzle length for a level
pub fn sequence_length(level_id: u32) -> usize {
    (BASE_LENGTH + level_id as usize).min(MAX_LENGTH)
}

impl SequenceChallenge {
    pub fn new(level_id: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(0x5e9_0000 ^ level_id as u64);
        let sequence = (0..sequence_length(level_id))
            .map(|_| Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
            .collect();
        log::info!("Sequence challenge for level {} started", level_id);
        Self {
            level_id,
            sequence,
            stage: SequenceStage::Showing { index: 0, timer: 0.0 },
            abandoned: false,
        }
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn sequence(&self) -> &[Direction] {
        &self.sequence
    }

    pub fn stage(&self) -> SequenceStage {
        self.stage
    }

    /// Arrow to display right now, if any
    pub fn current_cue(&self) -> Option<Direction> {
        match self.stage {
            SequenceStage::Showing { index, timer } if timer < SHOW_SECONDS => self.sequence.get(index).copied(),
            _ => None,
        }
    }

    /// Arrows repeated correctly so far
    pub fn progress(&self) -> usize {
        match self.stage {
            SequenceStage::Input { index } => index,
            SequenceStage::Result { passed: true, .. } => self.sequence.len(),
            _ => 0,
        }
    }

    /// Pass/fail once decided
    pub fn verdict(&self) -> Option<bool> {
        match self.stage {
            SequenceStage::Result { passed, .. } => Some(passed),
            _ => None,
        }
    }

    /// Result to report once it has been shown long enough to close.
    /// Abandoning reports `ChallengeError::Abandoned`.
    pub fn outcome(&self) -> Option<Result<bool, ChallengeError>> {
        match self.stage {
            SequenceStage::Result { .. } if self.abandoned => Some(Err(ChallengeError::Abandoned)),
            SequenceStage::Result { passed, timer } if timer >= RESULT_SECONDS => Some(Ok(passed)),
            _ => None,
        }
    }

    pub fn update(&mut self, input: &InputFrame, dt: f32) {
        self.stage = match self.stage {
            SequenceStage::Showing { index, timer } => {
                let timer = timer + dt;
                if timer < SHOW_SECONDS + GAP_SECONDS {
                    SequenceStage::Showing { index, timer }
                } else if index + 1 < self.sequence.len() {
                    SequenceStage::Showing { index: index + 1, timer: 0.0 }
                } else {
                    SequenceStage::Input { index: 0 }
                }
            }
            SequenceStage::Input { index } => {
                if input.pressed(Action::Pause) {
                    log::info!("Sequence challenge abandoned");
                    self.abandoned = true;
                    SequenceStage::Result { passed: false, timer: 0.0 }
                } else {
                    match Direction::from_input(input) {
                        Some(dir) if self.sequence.get(index) == Some(&dir) => {
                            if index + 1 == self.sequence.len() {
                                log::info!("Sequence challenge passed");
                                SequenceStage::Result { passed: true, timer: 0.0 }
                            } else {
                                SequenceStage::Input { index: index + 1 }
                            }
                        }
                        Some(_) => {
                            log::info!("Sequence challenge failed at {}", index);
                            SequenceStage::Result { passed: false, timer: 0.0 }
                        }
                        None => SequenceStage::Input { index },
                    }
                }
            }
            SequenceStage::Result { passed, timer } => SequenceStage::Result { passed, timer: timer + dt },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn action_for(dir: Direction) -> Action {
        match dir {
            Direction::Up => Action::Up,
            Direction::Down => Action::Down,
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        }
    }

    fn wait_for_input(c: &mut SequenceChallenge) {
        for _ in 0..10_000 {
            if matches!(c.stage(), SequenceStage::Input { .. }) {
                return;
            }
            c.update(&InputFrame::default(), DT);
        }
        panic!("never reached input stage");
    }

    fn finish(c: &mut SequenceChallenge) -> bool {
        for _ in 0..200 {
            if let Some(outcome) = c.outcome() {
                return outcome.unwrap();
            }
            c.update(&InputFrame::default(), DT);
        }
        panic!("no outcome");
    }

    #[test]
    fn test_length_grows_and_caps() {
        assert_eq!(sequence_length(1), 4);
        assert_eq!(sequence_length(3), 6);
        assert_eq!(sequence_length(500), MAX_LENGTH);
        assert_eq!(SequenceChallenge::new(2).sequence().len(), 5);
    }

    #[test]
    fn test_same_level_same_sequence() {
        assert_eq!(SequenceChallenge::new(4).sequence(), SequenceChallenge::new(4).sequence());
    }

    #[test]
    fn test_input_ignored_while_showing() {
        let mut c = SequenceChallenge::new(1);
        let first = c.sequence()[0];
        assert_eq!(c.current_cue(), Some(first));
        c.update(&InputFrame::default().press(action_for(first)), DT);
        assert_eq!(c.progress(), 0);
        assert!(matches!(c.stage(), SequenceStage::Showing { .. }));
    }

    #[test]
    fn test_correct_repeat_passes() {
        let mut c = SequenceChallenge::new(1);
        wait_for_input(&mut c);
        for dir in c.sequence().to_vec() {
            c.update(&InputFrame::default().press(action_for(dir)), DT);
        }
        assert_eq!(c.verdict(), Some(true));
        assert!(finish(&mut c));
    }

    #[test]
    fn test_one_mistake_fails() {
        let mut c = SequenceChallenge::new(2);
        wait_for_input(&mut c);
        let wrong = Direction::ALL.iter().copied().find(|d| *d != c.sequence()[0]).unwrap();
        c.update(&InputFrame::default().press(action_for(wrong)), DT);
        assert_eq!(c.verdict(), Some(false));
        assert!(!finish(&mut c));
    }

    #[test]
    fn test_pause_abandons() {
        let mut c = SequenceChallenge::new(1);
        wait_for_input(&mut c);
        c.update(&InputFrame::default().press(Action::Pause), DT);
        assert_eq!(c.verdict(), Some(false));
        // Reported straight away, no result screen
        assert!(matches!(c.outcome(), Some(Err(ChallengeError::Abandoned))));
    }
}
