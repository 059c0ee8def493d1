//! Metadata store - the persisted mapping behind the tracker
//!
//! Serialized as a single JSON object `{ path: { "mtime": ..., "related":
//! [...] } }`. A missing or corrupt cache file loads as an empty store; the
//! cache is a best-effort optimization, never correctness-critical state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};

/// Recorded state for a single tracked path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Last observed modification time, unix seconds. Zero means the path was
    /// never recorded, or its last reading was unknown.
    #[serde(default)]
    pub mtime: i64,

    /// Declared related paths, checked alongside this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

/// Mapping from tracked path to its recorded metadata.
///
/// A BTreeMap keeps iteration deterministic and the serialized form stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    pub entries: BTreeMap<String, FileMetadata>,
}

impl MetadataStore {
    /// Get the record for `path`, creating an empty one if absent.
    pub fn entry(&mut self, path: &str) -> &mut FileMetadata {
        self.entries.entry(path.to_string()).or_default()
    }

    pub fn get(&self, path: &str) -> Option<&FileMetadata> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a store from `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// also treated as empty, with a warning, so a damaged cache degrades to
    /// a full recomputation instead of a hard failure.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            return Self::default();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = ?path, error = %err, "unreadable cache file, starting with an empty store");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(store) => store,
            Err(err) => {
                warn!(path = ?path, error = %err, "corrupt cache file, starting with an empty store");
                Self::default()
            }
        }
    }

    /// Serialize the whole store to `path`, fully overwriting prior contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::WriteCache {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = tempdir().unwrap();
        let store = MetadataStore::load(&temp.path().join("absent.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = MetadataStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");

        let mut store = MetadataStore::default();
        store.entry("a.txt").mtime = 1700000000;
        store.entry("a.txt").related = vec!["b.txt".to_string()];
        store.entry("b.txt").mtime = 1700000001;
        store.save(&path).unwrap();

        let read = MetadataStore::load(&path);
        assert_eq!(read, store);
        assert_eq!(read.get("a.txt").unwrap().related, vec!["b.txt"]);
    }

    #[test]
    fn test_entry_overwrites_in_place() {
        let mut store = MetadataStore::default();
        store.entry("a.txt").mtime = 1;
        store.entry("a.txt").mtime = 2;
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a.txt").unwrap().mtime, 2);
    }

    #[test]
    fn test_missing_fields_default() {
        // Entries written by older versions may lack "related".
        let store: MetadataStore = serde_json::from_str(r#"{"a.txt":{"mtime":42}}"#).unwrap();
        let meta = store.get("a.txt").unwrap();
        assert_eq!(meta.mtime, 42);
        assert!(meta.related.is_empty());
    }
}
