//! Document lifecycle orchestration.
//!
//! Wires the key generator, the in-memory collection, and a [`Storage`]
//! backend into the create/read/update/delete flow. Durable storage is the
//! authority for content reads; the in-memory record is a coherent cache,
//! refreshed on update and dropped on delete.

use log::{debug, info};

use shoebox_core::collection::Collection;
use shoebox_core::error::StoreError;
use shoebox_core::index::HashIndex;
use shoebox_core::keygen::KeyGenerator;
use shoebox_core::models::Document;
use shoebox_core::storage::Storage;

use crate::config::Config;
use crate::fs_storage::{validate_id, FsStorage};

/// A single-node document store over a pluggable durable backend.
///
/// Not designed for concurrent use: operations take `&mut self` and no
/// two may run against the same store at once.
pub struct DocumentStore<S: Storage> {
    collection: Collection,
    keygen: KeyGenerator,
    storage: S,
}

impl DocumentStore<FsStorage> {
    /// Open a filesystem-backed store from configuration, creating the data
    /// directory if missing.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let storage = FsStorage::open(config.store.data_dir.clone())?;
        info!("opened store at {}", storage.data_dir().display());
        Ok(Self::with_index(
            storage,
            HashIndex::with_policy(config.index.buckets, config.index.max_load),
        ))
    }
}

impl<S: Storage> DocumentStore<S> {
    /// Store over an explicit backend with the default index policy.
    pub fn new(storage: S) -> Self {
        Self::with_index(storage, HashIndex::new())
    }

    /// Store over an explicit backend and index.
    pub fn with_index(storage: S, index: HashIndex) -> Self {
        Self {
            collection: Collection::with_index(index),
            keygen: KeyGenerator::new(),
            storage,
        }
    }

    /// Create a document from `content`, returning the stored record with
    /// its generated id.
    ///
    /// The document counts as created only once the durable write has
    /// succeeded: a failed write rolls the in-memory insertion back, so no
    /// index entry ever references a never-persisted document.
    pub fn create(&mut self, content: &str) -> Result<Document, StoreError> {
        let id = self.keygen.next_id();
        let document = Document::new(id.clone(), content);
        self.collection.insert(document.clone());
        if let Err(e) = self.storage.write(&id, content) {
            self.collection.remove(&id);
            return Err(e);
        }
        debug!("created document {}", id);
        Ok(document)
    }

    /// Content for `id`, read from durable storage.
    ///
    /// This path deliberately bypasses the in-memory record: disk is the
    /// authority, so a store instance can read documents it never created.
    pub fn read(&self, id: &str) -> Result<String, StoreError> {
        validate_id(id)?;
        self.storage.read(id)
    }

    /// Overwrite the unit for `id` with `new_content` in full, refreshing
    /// the in-memory record in the same operation.
    pub fn update(&mut self, id: &str, new_content: &str) -> Result<(), StoreError> {
        validate_id(id)?;
        if !self.storage.exists(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.storage.write(id, new_content)?;
        if let Some(document) = self.collection.get_mut(id) {
            document.content = new_content.to_string();
        }
        debug!("updated document {}", id);
        Ok(())
    }

    /// Remove the unit for `id` and unlink the in-memory record.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        validate_id(id)?;
        self.storage.delete(id)?;
        self.collection.remove(id);
        debug!("deleted document {}", id);
        Ok(())
    }

    /// Cached in-memory record for `id`, if this store instance holds one.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.collection.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.collection.contains(id)
    }

    /// Number of live in-memory records.
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Ids of live in-memory records, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.collection.iter().map(|d| d.id.as_str())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
