//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FlowError;

/// Unique identifier for an identity-provider account.
///
/// The provider issues these as opaque strings; the only local invariant
/// is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new AccountId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, FlowError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FlowError::validation("account_id", "cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_rejects_empty_string() {
        assert!(AccountId::new("").is_err());
    }

    #[test]
    fn account_id_preserves_value() {
        let id = AccountId::new("uid-42").unwrap();
        assert_eq!(id.as_str(), "uid-42");
        assert_eq!(id.to_string(), "uid-42");
    }

    #[test]
    fn account_id_serializes_transparently() {
        let id = AccountId::new("uid-42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-42\"");
    }
}
