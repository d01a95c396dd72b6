use std::io;

use thiserror::Error;

/// Storage and lookup failures surfaced by the store.
///
/// `NotFound` is a normal result for reads, updates, and deletes against an
/// id that has no storage unit, not a fatal condition. Every variant is
/// recoverable by the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("invalid document id: {0:?}")]
    InvalidId(String),

    #[error("storage write failed: {0}")]
    StorageWrite(#[source] io::Error),

    #[error("storage read failed: {0}")]
    StorageRead(#[source] io::Error),
}

impl StoreError {
    /// Whether this error is the absent-id result rather than an I/O fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
