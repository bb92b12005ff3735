//! Mini-challenges that gate level advancement
//!
//! A challenge is a self-contained activity that answers one question: did
//! the player pass? The orchestrator asks it exactly once per portal pass.
//!
//! Two ways to drive one:
//! - `MiniChallenge::run_minigame` for challenges that can run to completion
//!   in a single call (tests, scripted runs)
//! - A screen pushed by the app (`SequenceChallenge`) that reports back
//!   through the orchestrator's gate when it finishes

mod sequence;

pub use sequence::*;

use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("challenge fault: {0}")]
    Fault(String),
    #[error("challenge panicked: {0}")]
    Panicked(String),
    #[error("challenge abandoned")]
    Abandoned,
}

/// External activity gating level advancement
pub trait MiniChallenge {
    /// Run to completion for `level_id`; Ok(true) means passed
    fn run_minigame(&mut self, level_id: u32) -> Result<bool, ChallengeError>;
}

impl<F> MiniChallenge for F
where
    F: FnMut(u32) -> Result<bool, ChallengeError>,
{
    fn run_minigame(&mut self, level_id: u32) -> Result<bool, ChallengeError> {
        self(level_id)
    }
}

/// Run a challenge once, turning a panic inside it into an error
pub fn run_guarded(challenge: &mut dyn MiniChallenge, level_id: u32) -> Result<bool, ChallengeError> {
    match catch_unwind(AssertUnwindSafe(|| challenge.run_minigame(level_id))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ChallengeError::Panicked(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_challenge() {
        let mut calls = Vec::new();
        let mut challenge = |id: u32| -> Result<bool, ChallengeError> {
            calls.push(id);
            Ok(id % 2 == 0)
        };
        assert!(run_guarded(&mut challenge, 2).unwrap());
        assert!(!run_guarded(&mut challenge, 3).unwrap());
        assert_eq!(calls, vec![2, 3]);
    }

    #[test]
    fn test_panic_becomes_error() {
        let mut challenge = |_: u32| -> Result<bool, ChallengeError> { panic!("boom") };
        match run_guarded(&mut challenge, 1) {
            Err(ChallengeError::Panicked(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
