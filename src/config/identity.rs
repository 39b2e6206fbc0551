//! Identity provider configuration.

use serde::Deserialize;

use super::error::ValidationError;
use super::Environment;

/// Identity provider configuration (project and API credentials for the
/// external provider; unused by the in-memory adapter).
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Provider project identifier.
    #[serde(default)]
    pub project_id: String,

    /// Provider API key.
    #[serde(default)]
    pub api_key: String,
}

impl IdentityConfig {
    /// Validate identity configuration.
    ///
    /// Development tolerates empty values (the in-memory provider needs
    /// none); production requires both.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production {
            if self.project_id.is_empty() {
                return Err(ValidationError::MissingRequired("IDENTITY_PROJECT_ID"));
            }
            if self.api_key.is_empty() {
                return Err(ValidationError::MissingRequired("IDENTITY_API_KEY"));
            }
        }
        Ok(())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
        }
    }
}
