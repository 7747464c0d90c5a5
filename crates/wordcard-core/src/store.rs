//! Progress store implementations.
//!
//! `MemoryStore` backs tests and throwaway sessions. `JsonFileStore` keeps
//! every key in one JSON object on disk and rewrites the file on each change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::traits::ProgressStore;

/// In-memory key/value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: a single JSON object of key to value.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read progress from {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse progress JSON: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json =
            serde_json::to_string_pretty(&self.entries).context("failed to serialize progress")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write progress to {}", self.path.display()))
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ProgressStoreExt;
    use serde_json::json;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::default();
        store.save("k", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.load::<Vec<u32>>("k"), Some(vec![1, 2, 3]));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn undecodable_value_loads_as_none() {
        let mut store = MemoryStore::default();
        store.set("k", json!("not a number")).unwrap();
        assert_eq!(store.load::<usize>("k"), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/progress.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("deck-curQuestionIndex", json!(3)).unwrap();
        store.set("deck-gradeForAll", json!([])).unwrap();
        store.remove("deck-gradeForAll").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("deck-curQuestionIndex"), Some(json!(3)));
        assert!(reopened.get("deck-gradeForAll").is_none());
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse progress JSON"));
    }
}
