//! Local filesystem storage backend
//!
//! All operations complete immediately.

use super::StorageError;
use std::path::PathBuf;

/// Local filesystem storage rooted at a base directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Storage rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Per-user data directory (`<data dir>/tilerunner`), or the current
    /// directory where there is none
    pub fn user_data() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(dir) = dirs::data_dir() {
            return Self::with_base_dir(dir.join("tilerunner"));
        }
        Self::new()
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    /// Resolve a path relative to the base directory
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    pub fn read_to_string(&self, path: &str) -> Result<String, StorageError> {
        Ok(std::fs::read_to_string(self.resolve(path))?)
    }

    /// Create or overwrite a file, creating parent directories as needed
    pub fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, data)?;
        Ok(())
    }

    /// Delete a file. Missing files are not an error.
    pub fn delete(&self, path: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_creates_parents() {
        let (dir, storage) = setup_test_dir();
        storage.write("scores/board.ron", b"hello").unwrap();
        assert!(dir.path().join("scores").is_dir());
        assert_eq!(storage.read("scores/board.ron").unwrap(), b"hello");
        assert_eq!(storage.read_to_string("scores/board.ron").unwrap(), "hello");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();
        assert!(matches!(storage.read("nonexistent.txt"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (dir, storage) = setup_test_dir();
        std::fs::write(dir.path().join("delete_me.txt"), "x").unwrap();

        storage.delete("delete_me.txt").unwrap();
        assert!(!storage.exists("delete_me.txt"));
        storage.delete("delete_me.txt").unwrap();
    }
}
