//! Openness store: which nested chip occurrences are shown expanded.
//!
//! Entries are path-ids (`"2"`, `"2.0"`); absence means collapsed. The set is
//! loaded from a storage backend at mount and written back at teardown.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::circuit::{CircuitState, Component};
use crate::definition::parse_path_id;
use crate::error::StorageError;

/// Default storage key for the persisted set.
pub const OPEN_SUBCOMPONENT_IDS_KEY: &str = "openSubcomponentIds";

// ─── Store ───────────────────────────────────────────────────────────────────

/// Insertion-ordered set of open path-ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpennessStore {
    ids: Vec<String>,
}

impl OpennessStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `persisted`, dropping duplicates.
    pub fn load(&mut self, persisted: impl IntoIterator<Item = String>) {
        self.ids.clear();
        for id in persisted {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn is_open(&self, path_id: &str) -> bool {
        self.ids.iter().any(|id| id == path_id)
    }

    /// Returns `true` if the set changed.
    pub fn open(&mut self, path_id: &str) -> bool {
        if self.is_open(path_id) {
            return false;
        }
        self.ids.push(path_id.to_string());
        true
    }

    /// Returns `true` if the set changed.
    pub fn close(&mut self, path_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != path_id);
        self.ids.len() != before
    }

    /// Flip one entry; returns whether it is open afterwards.
    pub fn toggle(&mut self, path_id: &str) -> bool {
        if self.close(path_id) {
            false
        } else {
            self.open(path_id)
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop ids that do not name a chip occurrence in `state`.
    /// Returns the removed ids.
    pub fn prune(&mut self, state: &CircuitState) -> Vec<String> {
        let (keep, stale): (Vec<String>, Vec<String>) = std::mem::take(&mut self.ids)
            .into_iter()
            .partition(|id| names_chip(state, id));
        self.ids = keep;
        if !stale.is_empty() {
            debug!("pruned stale open ids: {stale:?}");
        }
        stale
    }

    /// Load the set persisted under `key`; a missing entry is an empty set.
    pub fn load_from(storage: &dyn OpennessStorage, key: &str) -> Result<Self, StorageError> {
        let mut store = Self::new();
        if let Some(ids) = storage.load(key)? {
            store.load(ids);
        }
        Ok(store)
    }

    pub fn flush(&self, storage: &mut dyn OpennessStorage, key: &str) -> Result<(), StorageError> {
        storage.save(key, &self.ids)
    }
}

fn names_chip(state: &CircuitState, path_id: &str) -> bool {
    match parse_path_id(path_id) {
        Some(path) if !path.is_empty() => state
            .resolve_path(&path)
            .and_then(|id| state.component(id))
            .is_some_and(Component::is_chip),
        _ => false,
    }
}

// ─── Storage ─────────────────────────────────────────────────────────────────

/// Durable key/value storage for the open set.
pub trait OpennessStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<String>>, StorageError>;
    fn save(&mut self, key: &str, ids: &[String]) -> Result<(), StorageError>;
}

/// Process-local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(key: &str, ids: &[String]) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), ids.to_vec());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl OpennessStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, ids: &[String]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), ids.to_vec());
        Ok(())
    }
}

/// A JSON settings file: a top-level object whose `key` entry holds the ids.
/// Other entries in the file (display settings) are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl OpennessStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        match self.read_object()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, ids: &[String]) -> Result<(), StorageError> {
        let mut object = self.read_object()?;
        object.insert(key.to_string(), serde_json::to_value(ids)?);
        fs::write(&self.path, serde_json::to_string_pretty(&object)?)?;
        debug!("saved {} open ids to {}", ids.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_openness.rs"]
mod tests;
