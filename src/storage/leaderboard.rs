//! Ranked run times
//!
//! Fastest first. Equal times keep insertion order, so an earlier run
//! outranks a later one with the same time. Persisted as RON.

use serde::{Deserialize, Serialize};
use super::{LocalStorage, StorageError};

pub const LEADERBOARD_FILE: &str = "leaderboard.ron";
pub const MAX_NAME_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub player_name: String,
    pub total_seconds: f32,
}

impl RunRecord {
    /// Trimmed, length-capped name; blank names become "???"
    pub fn new(player_name: &str, total_seconds: f32) -> Self {
        let trimmed: String = player_name.trim().chars().take(MAX_NAME_LEN).collect();
        Self {
            player_name: if trimmed.is_empty() { "???".to_string() } else { trimmed },
            total_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<RunRecord>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[RunRecord] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `seconds` would make the board
    pub fn qualifies(&self, seconds: f32) -> bool {
        seconds.is_finite()
            && (self.entries.len() < self.capacity
                || self.entries.last().map_or(true, |last| seconds < last.total_seconds))
    }

    /// Insert a record; returns its 0-based rank if it made the board
    pub fn insert(&mut self, record: RunRecord) -> Option<usize> {
        if !self.qualifies(record.total_seconds) {
            return None;
        }
        let rank = self.entries
            .iter()
            .position(|e| record.total_seconds < e.total_seconds)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, record);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    fn from_ron(s: &str, capacity: usize) -> Result<Self, StorageError> {
        let records: Vec<RunRecord> = ron::from_str(s)?;
        let mut board = Self::new(capacity);
        for record in records {
            board.insert(record);
        }
        Ok(board)
    }

    /// Read the board from storage. Missing or unreadable files give an
    /// empty board.
    pub fn load(storage: &LocalStorage, capacity: usize) -> Self {
        let result = storage
            .read_to_string(LEADERBOARD_FILE)
            .and_then(|s| Self::from_ron(&s, capacity));
        match result {
            Ok(board) => {
                log::info!("Loaded leaderboard ({} entries)", board.entries.len());
                board
            }
            Err(StorageError::NotFound(_)) => Self::new(capacity),
            Err(e) => {
                log::warn!("Leaderboard unreadable, starting empty: {}", e);
                Self::new(capacity)
            }
        }
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<(), StorageError> {
        let text = ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())?;
        storage.write(LEADERBOARD_FILE, text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sorted_and_capped() {
        let mut board = Leaderboard::new(3);
        assert_eq!(board.insert(RunRecord::new("b", 20.0)), Some(0));
        assert_eq!(board.insert(RunRecord::new("a", 10.0)), Some(0));
        assert_eq!(board.insert(RunRecord::new("c", 30.0)), Some(2));
        assert_eq!(board.insert(RunRecord::new("slow", 40.0)), None);
        assert_eq!(board.insert(RunRecord::new("d", 15.0)), Some(1));

        let names: Vec<&str> = board.entries().iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["a", "d", "b"]);
    }

    #[test]
    fn test_ties_keep_first() {
        let mut board = Leaderboard::new(5);
        board.insert(RunRecord::new("first", 12.5));
        assert_eq!(board.insert(RunRecord::new("second", 12.5)), Some(1));
        assert_eq!(board.entries()[0].player_name, "first");
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut board = Leaderboard::new(5);
        assert_eq!(board.insert(RunRecord::new("nan", f32::NAN)), None);
        assert_eq!(board.insert(RunRecord::new("inf", f32::INFINITY)), None);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_name_trimmed_and_capped() {
        assert_eq!(RunRecord::new("  abcdefghijklmnop ", 1.0).player_name, "abcdefghijkl");
        assert_eq!(RunRecord::new("   ", 1.0).player_name, "???");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        let mut board = Leaderboard::new(10);
        board.insert(RunRecord::new("ada", 61.25));
        board.insert(RunRecord::new("bob", 48.0));
        board.save(&storage).unwrap();

        let loaded = Leaderboard::load(&storage, 10);
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_load_missing_or_corrupt_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        assert!(Leaderboard::load(&storage, 10).entries().is_empty());

        storage.write(LEADERBOARD_FILE, b"not ron at all [").unwrap();
        assert!(Leaderboard::load(&storage, 10).entries().is_empty());
    }
}
