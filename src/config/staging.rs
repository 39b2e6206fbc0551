//! Staging store configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Staging store configuration (file-backed slot location).
#[derive(Debug, Clone, Deserialize)]
pub struct StagingConfig {
    /// Path of the JSON file holding the pending profile slot.
    #[serde(default = "default_staging_path")]
    pub path: PathBuf,
}

impl StagingConfig {
    /// Validate staging configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyStagingPath);
        }
        Ok(())
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            path: default_staging_path(),
        }
    }
}

fn default_staging_path() -> PathBuf {
    PathBuf::from("./data/pending_profile.json")
}
