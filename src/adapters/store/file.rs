//! JSON dataset file store
//!
//! Every transaction reads and parses the dataset file afresh, so each
//! transaction sees the file as it was when the transaction opened and
//! changes made by other processes become visible at the next transaction.

use super::dataset::{Dataset, DatasetSession};
use super::traits::{StoreSession, TransactionalStore};
use crate::domain::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

/// Realm store backed by a JSON dataset file
///
/// The file holds a [`Dataset`]:
///
/// ```json
/// { "realms": [ { "id": "r-1", "realm": "acme", "users": [ { "id": "u-1", "username": "alice" } ] } ] }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::Unavailable(format!(
                "dataset file not found: {}",
                path.display()
            ))
            .into());
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `dataset` to `path` as pretty-printed JSON
    pub fn write_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
        let json = serde_json::to_string_pretty(dataset)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn load(&self) -> std::result::Result<Dataset, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Unavailable(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let mut dataset: Dataset = serde_json::from_str(&contents).map_err(|e| {
            StoreError::Corrupted(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        dataset.validate()?;
        dataset.sort_users();
        Ok(dataset)
    }
}

impl TransactionalStore for FileStore {
    fn run_in_transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        let dataset = self.load()?;
        tracing::trace!(
            path = %self.path.display(),
            realms = dataset.realms.len(),
            "File store transaction opened"
        );

        let session = DatasetSession::new(&dataset);
        work(&session)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
