//! Storage layer for Spendwise
//!
//! Durable state is a small key-value store of named JSON records
//! (`budgets`, `entries`), each overwritten wholesale on every change.
//! [`FileStore`] keeps one file per record in the data directory;
//! [`MemoryStore`] backs session-only operation and tests.
//!
//! A record that cannot be decoded is never overwritten in place: it is set
//! aside under a new name first, so the user's data survives for inspection.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_json_atomic};
pub use records::{BUDGETS_KEY, ENTRIES_KEY, SCHEMA_VERSION};

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;

use crate::config::paths::SpendwisePaths;
use crate::error::SpendwiseError;

/// A key-value store of whole JSON records
pub trait RecordStore {
    /// Read a record, `None` if it has never been written
    fn load(&self, key: &str) -> Result<Option<Value>, SpendwiseError>;

    /// Replace a record
    fn save(&mut self, key: &str, value: &Value) -> Result<(), SpendwiseError>;

    /// Whether records survive a restart
    fn is_durable(&self) -> bool;

    /// Move a record out of the way so later saves cannot clobber it
    ///
    /// Returns a description of where the record now lives.
    fn set_aside(&mut self, key: &str) -> Result<String, SpendwiseError>;
}

/// Records stored as `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: SpendwisePaths,
}

impl FileStore {
    /// Create a file store, making sure the data directory exists
    pub fn new(paths: SpendwisePaths) -> Result<Self, SpendwiseError> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }
}

impl RecordStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, SpendwiseError> {
        read_json(self.paths.record_file(key))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), SpendwiseError> {
        write_json_atomic(self.paths.record_file(key), value)
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn set_aside(&mut self, key: &str) -> Result<String, SpendwiseError> {
        let path = self.paths.record_file(key);
        let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
        let target = path.with_file_name(format!("{}.json.rejected-{}", key, stamp));

        std::fs::rename(&path, &target).map_err(|e| {
            SpendwiseError::Storage(format!("Failed to move {} aside: {}", path.display(), e))
        })?;

        Ok(target.display().to_string())
    }
}

/// In-memory records, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, as if an earlier session had written it
    pub fn with_record(mut self, key: &str, value: Value) -> Self {
        self.records.insert(key.to_string(), value);
        self
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, SpendwiseError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), SpendwiseError> {
        self.records.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn set_aside(&mut self, key: &str) -> Result<String, SpendwiseError> {
        let target = format!("{}.rejected", key);
        if let Some(value) = self.records.remove(key) {
            self.records.insert(target.clone(), value);
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = FileStore::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(store.is_durable());
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut store = FileStore::new(paths.clone()).unwrap();

        assert!(store.load("budgets").unwrap().is_none());

        let value = json!({"schema_version": 1, "budgets": {"dining": 3.5}});
        store.save("budgets", &value).unwrap();
        assert!(paths.record_file("budgets").exists());

        let reopened = FileStore::new(paths).unwrap();
        assert_eq!(reopened.load("budgets").unwrap(), Some(value));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new().with_record("entries", json!([]));
        assert_eq!(store.load("entries").unwrap(), Some(json!([])));
        assert!(store.load("budgets").unwrap().is_none());

        store.save("budgets", &json!({})).unwrap();
        assert_eq!(store.load("budgets").unwrap(), Some(json!({})));
        assert!(!store.is_durable());
    }

    #[test]
    fn test_file_store_set_aside_keeps_contents() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut store = FileStore::new(paths.clone()).unwrap();
        store.save("entries", &json!(["unreadable"])).unwrap();

        let moved_to = store.set_aside("entries").unwrap();

        assert!(!paths.record_file("entries").exists());
        assert!(store.load("entries").unwrap().is_none());
        let name = std::path::Path::new(&moved_to)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("entries.json.rejected-"));
        let kept = std::fs::read_to_string(&moved_to).unwrap();
        assert!(kept.contains("unreadable"));
    }

    #[test]
    fn test_memory_store_set_aside() {
        let mut store = MemoryStore::new().with_record("budgets", json!("garbage"));

        assert_eq!(store.set_aside("budgets").unwrap(), "budgets.rejected");
        assert!(store.load("budgets").unwrap().is_none());
        assert_eq!(store.load("budgets.rejected").unwrap(), Some(json!("garbage")));
    }
}
