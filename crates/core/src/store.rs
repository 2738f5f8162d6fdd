//! Record-store persistence scaffolding.
//!
//! One JSON blob per named collection, kept under a single data
//! directory. Absent blobs are an expected state and load as `None`;
//! a blob that exists but fails to parse is a fatal error, never
//! silently replaced with an empty collection.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Blob path involved in the failed access.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A persisted blob exists but could not be encoded or decoded.
    #[error("malformed collection {path}: {source}")]
    Malformed {
        /// Blob path holding the malformed payload.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Envelope every entity collection is persisted in.
///
/// `next_id` is a monotonic counter stored alongside the records so
/// ids are never derived from current contents; deleting the
/// highest-id record does not cause its id to be reissued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCollection<T> {
    /// Next id to hand out.
    #[serde(default = "first_id")]
    pub next_id: u64,
    /// The records, in insertion order.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

fn first_id() -> u64 {
    1
}

impl<T> Default for StoredCollection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl<T> StoredCollection<T> {
    /// Hand out the next id and advance the counter.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Generic load/save primitive over named collections in the data
/// directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location under the user's data directory.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gamedex")
    }

    /// Root directory holding the collection blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Load the named blob, returning `None` when it does not exist.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.blob_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let value =
            serde_json::from_str(&contents).map_err(|source| StoreError::Malformed { path, source })?;
        Ok(Some(value))
    }

    /// Persist the named blob, replacing any previous contents.
    ///
    /// The payload is written to a temporary file and renamed into
    /// place, so a reader never observes a partial write.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.blob_path(name);
        let serialised = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        let mut staged = NamedTempFile::new_in(&self.root).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        staged.write_all(&serialised).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        staged.persist(&path).map_err(|err| StoreError::Io {
            path,
            source: err.error,
        })?;
        Ok(())
    }

    /// Remove the named blob. Returns whether anything was removed.
    pub fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.blob_path(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u64,
        body: String,
    }

    #[test]
    fn load_of_absent_blob_is_none() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let loaded: Option<StoredCollection<Note>> = store.load("notes").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        let mut collection = StoredCollection::default();
        let id = collection.allocate_id();
        collection.records.push(Note {
            id,
            body: "first".to_string(),
        });
        let id = collection.allocate_id();
        collection.records.push(Note {
            id,
            body: "second".to_string(),
        });
        store.save("notes", &collection).unwrap();

        let loaded: StoredCollection<Note> = store.load("notes").unwrap().unwrap();
        assert_eq!(loaded.next_id, collection.next_id);
        assert_eq!(loaded.records, collection.records);

        // Serialising a freshly-loaded collection must be a no-op.
        store.save("notes", &loaded).unwrap();
        let reloaded: StoredCollection<Note> = store.load("notes").unwrap().unwrap();
        assert_eq!(reloaded.records, loaded.records);
        assert_eq!(reloaded.next_id, loaded.next_id);
    }

    #[test]
    fn malformed_blob_is_fatal() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        std::fs::write(dir.path().join("notes.json"), "{not json").unwrap();

        let result: Result<Option<StoredCollection<Note>>, _> = store.load("notes");
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn remove_reports_whether_blob_existed() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        assert!(!store.remove("notes").unwrap());
        store.save("notes", &StoredCollection::<Note>::default()).unwrap();
        assert!(store.remove("notes").unwrap());
        assert!(!store.remove("notes").unwrap());
    }
}
