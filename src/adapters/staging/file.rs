//! File-backed staging slot.
//!
//! Persists the pending profile as a JSON file so the slot survives a
//! process restart within the same storage scope. One file, one slot.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::profile::PendingProfile;
use crate::ports::{StagingStore, StoreError};

/// JSON-file staging store.
#[derive(Debug, Clone)]
pub struct FileStagingStore {
    path: PathBuf,
}

impl FileStagingStore {
    /// Creates a store backed by the given file path.
    ///
    /// # Example
    /// ```ignore
    /// let staging = FileStagingStore::new("./data/pending_profile.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl StagingStore for FileStagingStore {
    async fn set(&self, record: PendingProfile) -> Result<(), StoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    async fn get(&self) -> Result<Option<PendingProfile>, StoreError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        // Fail closed: a payload that does not parse is treated as
        // absent so a malformed shape never reaches the profile record.
        match serde_json::from_str(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding malformed staged profile");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}
