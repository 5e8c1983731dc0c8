//! Key/value persistence
//!
//! Learner state is stored as whole-value JSON snapshots under string
//! keys, last write wins. The file-backed store keeps one file per key in
//! the app data directory; the in-memory store backs tests and ephemeral
//! runs.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Whole-value snapshot store
pub trait Storage {
    /// Read the value for a key, if present
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, replacing any previous value
    fn put(&mut self, key: &str, value: String) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Storage backed by a plain map, nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage keeping one JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {dir:?}"))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {path:?}"))?;
        Ok(Some(contents))
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {path:?}"))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {path:?}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_roundtrips() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("progress").unwrap(), None);

        storage.put("progress", "{}".to_string()).unwrap();
        assert_eq!(storage.get("progress").unwrap().as_deref(), Some("{}"));

        storage.put("progress", "[1]".to_string()).unwrap();
        assert_eq!(storage.get("progress").unwrap().as_deref(), Some("[1]"));

        storage.remove("progress").unwrap();
        assert_eq!(storage.get("progress").unwrap(), None);
    }

    #[test]
    fn memory_storage_remove_missing_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("nope").is_ok());
    }

    #[test]
    fn file_storage_roundtrips() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.get("completed_lessons").unwrap(), None);
        storage.put("completed_lessons", "[\"lesson1-vowels\"]".to_string()).unwrap();
        assert_eq!(
            storage.get("completed_lessons").unwrap().as_deref(),
            Some("[\"lesson1-vowels\"]")
        );

        storage.remove("completed_lessons").unwrap();
        assert_eq!(storage.get("completed_lessons").unwrap(), None);
        assert!(storage.remove("completed_lessons").is_ok());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = TempDir::new().unwrap();

        let mut first = FileStorage::new(dir.path().to_path_buf()).unwrap();
        first.put("progress", "{\"beginner\":{}}".to_string()).unwrap();

        let second = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(second.get("progress").unwrap().as_deref(), Some("{\"beginner\":{}}"));
    }
}
