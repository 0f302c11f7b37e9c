//! Storage APIs
//!
//! localStorage and sessionStorage implementations.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is not a string map: {0}")]
    Format(#[from] serde_json::Error),
}

/// Named string slots the helper layer can persist into
pub trait PersistentSlots {
    /// Read a slot
    fn read_slot(&self, key: &str) -> Option<String>;

    /// Write a slot, persisting synchronously
    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Erase a slot, reporting whether it existed
    fn erase_slot(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// Storage backend
#[derive(Debug, Default)]
pub struct Storage {
    data: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl Storage {
    /// Create in-memory storage (sessionStorage)
    pub fn session() -> Self {
        Self::default()
    }

    /// Create persistent storage (localStorage) backed by a JSON file
    pub fn local(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Loaded {} storage items from {}", data.len(), path.display());
        Ok(Self {
            data,
            path: Some(path),
        })
    }

    /// Backing file, if persistent
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether writes reach disk
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Get item
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    /// Set item
    ///
    /// On a persistence failure the previous contents are kept.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    /// Remove item
    pub fn remove_item(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.data.contains_key(key) {
            return Ok(None);
        }
        let mut next = self.data.clone();
        let removed = next.remove(key);
        self.commit(next)?;
        Ok(removed)
    }

    /// Clear all items
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.commit(BTreeMap::new())
    }

    /// Get key at index
    pub fn key(&self, index: usize) -> Option<&str> {
        self.data.keys().nth(index).map(|s| s.as_str())
    }

    /// Get number of items
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Persist `next` to disk if persistent, then make it current
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(path) = &self.path {
            let contents = serde_json::to_string(&next)?;
            fs::write(path, contents)?;
            tracing::trace!("Persisted {} storage items to {}", next.len(), path.display());
        }
        self.data = next;
        Ok(())
    }
}

impl PersistentSlots for Storage {
    fn read_slot(&self, key: &str) -> Option<String> {
        self.get_item(key).map(str::to_string)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_item(key, value)
    }

    fn erase_slot(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.remove_item(key)?.is_some())
    }
}
