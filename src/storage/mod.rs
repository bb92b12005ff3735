//! Persistence
//!
//! Local files only. `LocalStorage` resolves paths against a base directory
//! (the user data dir on native builds); the leaderboard is the only record
//! written through it.

pub mod leaderboard;
pub mod local;

pub use leaderboard::{Leaderboard, RunRecord, LEADERBOARD_FILE, MAX_NAME_LEN};
pub use local::LocalStorage;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("I/O error: {0}")]
    IoError(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerdeError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

impl From<ron::error::SpannedError> for StorageError {
    fn from(e: ron::error::SpannedError) -> Self {
        StorageError::SerdeError(e.to_string())
    }
}

impl From<ron::Error> for StorageError {
    fn from(e: ron::Error) -> Self {
        StorageError::SerdeError(e.to_string())
    }
}
