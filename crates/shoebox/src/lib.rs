//! # Shoebox
//!
//! **A single-node, file-backed document store.**
//!
//! Shoebox keeps an in-memory index over documents identified by generated
//! unique keys and persists each document individually to disk. Memory is
//! the fast path; disk is the durable copy and the authority for reads.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌─────────────┐
//! │ KeyGenerator │──▶│     Collection       │──▶│  Storage    │
//! │ ts + counter │   │ slot arena + index  │   │ <id>.json   │
//! └──────────────┘   └─────────────────────┘   └─────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. `create` obtains a key from the [`KeyGenerator`](shoebox_core::keygen::KeyGenerator),
//!    inserts the record into the [`Collection`](shoebox_core::collection::Collection)
//!    (arena slot + hash-index entry), then durably writes the payload. A
//!    failed write rolls the in-memory insertion back.
//! 2. `read` consults durable storage directly, bypassing the in-memory
//!    record.
//! 3. `update` and `delete` touch disk and the in-memory record in the same
//!    operation, so the two never diverge.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`fs_storage`] | Filesystem backend: one `<id>.json` unit per document |
//! | [`store`] | `DocumentStore`: create/read/update/delete lifecycle |
//!
//! The data-structure layer (models, key generation, hash index, collection,
//! storage trait) lives in `shoebox-core`.
//!
//! ## Quick Start
//!
//! ```rust
//! use shoebox::{Config, DocumentStore};
//!
//! # fn main() -> Result<(), shoebox::StoreError> {
//! # let tmp = std::env::temp_dir().join("shoebox-doc-example");
//! let mut config = Config::default();
//! # config.store.data_dir = tmp.clone();
//! let mut store = DocumentStore::open(&config)?;
//!
//! let document = store.create("{\"title\": \"hello\"}")?;
//! assert_eq!(store.read(&document.id)?, "{\"title\": \"hello\"}");
//!
//! store.update(&document.id, "{\"title\": \"world\"}")?;
//! store.delete(&document.id)?;
//! # let _ = std::fs::remove_dir_all(tmp);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fs_storage;
pub mod store;

pub use config::{load_config, Config};
pub use fs_storage::{validate_id, FsStorage};
pub use shoebox_core::collection::Collection;
pub use shoebox_core::error::StoreError;
pub use shoebox_core::models::Document;
pub use shoebox_core::storage::{MemoryStorage, Storage};
pub use store::DocumentStore;
