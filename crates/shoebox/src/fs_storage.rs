//! Filesystem [`Storage`] implementation: one `<id>.json` unit per document.
//!
//! The payload is written verbatim, no envelope and no checksum; the `.json`
//! suffix is layout convention, nothing is parsed. Ids are validated before
//! any path is derived from them.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shoebox_core::error::StoreError;
use shoebox_core::storage::Storage;

/// Accepts only ids safe to embed in a filename: non-empty, ASCII
/// alphanumerics and `-`. Everything else (separators, dots, empty) is
/// rejected before a path exists, closing the traversal hole of deriving
/// storage paths from caller-supplied ids.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    let ok = !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

/// File-per-document backend rooted at a data directory.
pub struct FsStorage {
    data_dir: PathBuf,
}

impl FsStorage {
    /// Open a backend at `data_dir`, creating the directory if missing.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(StoreError::StorageWrite)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn unit_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.data_dir.join(format!("{}.json", id)))
    }
}

impl Storage for FsStorage {
    fn write(&self, id: &str, content: &str) -> Result<(), StoreError> {
        let path = self.unit_path(id)?;
        fs::write(&path, content).map_err(StoreError::StorageWrite)?;
        debug!("wrote unit {}", path.display());
        Ok(())
    }

    fn read(&self, id: &str) -> Result<String, StoreError> {
        let path = self.unit_path(id)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(StoreError::StorageRead(e)),
        }
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.unit_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("deleted unit {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(StoreError::StorageWrite(e)),
        }
    }

    fn exists(&self, id: &str) -> bool {
        match self.unit_path(id) {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, FsStorage) {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::open(tmp.path().join("data")).unwrap();
        (tmp, storage)
    }

    #[test]
    fn test_write_creates_unit_file() {
        let (_tmp, storage) = open_tmp();
        storage.write("abc-1", "hello").unwrap();
        let path = storage.data_dir().join("abc-1.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_round_trip_verbatim() {
        let (_tmp, storage) = open_tmp();
        let payload = "{\"k\": \"v\"}\nline two\n";
        storage.write("abc-2", payload).unwrap();
        assert_eq!(storage.read("abc-2").unwrap(), payload);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let (_tmp, storage) = open_tmp();
        assert!(storage.read("ghost-0").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_removes_unit() {
        let (_tmp, storage) = open_tmp();
        storage.write("abc-3", "x").unwrap();
        storage.delete("abc-3").unwrap();
        assert!(!storage.exists("abc-3"));
        assert!(storage.delete("abc-3").unwrap_err().is_not_found());
    }

    #[test]
    fn test_traversal_shaped_ids_rejected() {
        let (_tmp, storage) = open_tmp();
        for id in ["../evil", "a/b", "a\\b", "..", ".", "", "a.json"] {
            let err = storage.write(id, "x").unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidId(_)),
                "id {:?} was not rejected",
                id
            );
            assert!(!storage.exists(id));
        }
    }

    #[test]
    fn test_generated_id_shape_is_accepted() {
        assert!(validate_id("689c9a3e-42").is_ok());
    }
}
