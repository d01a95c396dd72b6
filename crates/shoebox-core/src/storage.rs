//! Storage abstraction for Shoebox.
//!
//! The [`Storage`] trait defines the durable operations the document
//! lifecycle needs, enabling pluggable backends (filesystem in the
//! `shoebox` crate, in-memory here). Durable storage, not the in-memory
//! collection, is the authority for content reads.
//!
//! All operations are synchronous and may block on I/O; an operation either
//! completes or fails, with no cancellation concept.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;

/// Abstract durable backend holding one unit per document id.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`write`](Storage::write) | Create or overwrite a unit in full |
/// | [`read`](Storage::read) | Read a whole unit |
/// | [`delete`](Storage::delete) | Remove a unit |
/// | [`exists`](Storage::exists) | Probe for a unit |
pub trait Storage {
    /// Create or overwrite the unit for `id` with `content` in full
    /// (truncate-then-write, never append).
    fn write(&self, id: &str, content: &str) -> Result<(), StoreError>;

    /// Read the entire unit for `id`.
    /// Absent id yields [`StoreError::NotFound`].
    fn read(&self, id: &str) -> Result<String, StoreError>;

    /// Remove the unit for `id`.
    /// Absent id yields [`StoreError::NotFound`] and removes nothing.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Whether a unit exists for `id`.
    fn exists(&self, id: &str) -> bool;
}

/// In-memory [`Storage`] implementation for tests.
#[derive(Default)]
pub struct MemoryStorage {
    units: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored units.
    pub fn len(&self) -> usize {
        self.units.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn write(&self, id: &str, content: &str) -> Result<(), StoreError> {
        self.units
            .write()
            .unwrap()
            .insert(id.to_string(), content.to_string());
        Ok(())
    }

    fn read(&self, id: &str) -> Result<String, StoreError> {
        self.units
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self.units.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn exists(&self, id: &str) -> bool {
        self.units.read().unwrap().contains_key(id)
    }
}
