//! In-memory record store, optionally loaded from a JSON snapshot.
//!
//! Snapshot format:
//! ```json
//! { "<key>": { "result": "<rhs>", "sprofile foo.c:3": "12" } }
//! ```

use super::{Fields, RecordStore};
use crate::utils::error::StoreError;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Record store holding every entry in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Fields>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot file
    pub fn from_snapshot(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        info!("Reading store snapshot: {}", path.display());

        let file = File::open(path).map_err(|source| StoreError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: BTreeMap<String, Fields> = serde_json::from_reader(BufReader::new(file))?;

        debug!("Snapshot holds {} keys", entries.len());

        Ok(Self { entries })
    }

    /// Set one field of `key`, creating the key if needed
    pub fn insert_field(&mut self, key: &str, field: &str, value: &str) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    /// Builder-style variant of `insert_field`
    pub fn with_field(mut self, key: &str, field: &str, value: &str) -> Self {
        self.insert_field(key, field, value);
        self
    }
}

impl RecordStore for MemoryStore {
    fn ping(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn list_keys(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn get_fields(&mut self, key: &str) -> Result<Fields, StoreError> {
        Ok(self.entries.get(key).cloned().unwrap_or_default())
    }
}
