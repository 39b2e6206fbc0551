//! Pending and durable profile records.
//!
//! A `PendingProfile` is staged locally at registration time and consumed
//! at most once, after the first verified sign-in. A `ProfileRecord` is
//! the durable entity created from it, keyed by account identity.

use serde::{Deserialize, Serialize};

use crate::domain::account::Account;

/// Profile fields collected at registration but not yet persisted.
///
/// Held in the staging store's single slot. The schema is strict: every
/// field is a string, and a payload missing fields deserializes with
/// empty-string defaults rather than propagating a malformed shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
}

impl PendingProfile {
    /// Creates a staged profile from registration input.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: gender.into(),
            email: email.into(),
        }
    }
}

/// Durable profile record keyed by account identifier.
///
/// Invariant: at most one record exists per account. Creation is guarded
/// by an existence check, with the check-then-create sequence treated as
/// a critical section by the provisioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
}

impl ProfileRecord {
    /// Builds the record to persist for `account`.
    ///
    /// Takes names and gender from the staged fields when present,
    /// otherwise empty strings. The email is always the account's own
    /// address; a staged email is never trusted, since the slot may hold
    /// a leftover entry from a registration that never signed in here.
    pub fn from_staged(staged: Option<PendingProfile>, account: &Account) -> Self {
        let staged = staged.unwrap_or_default();
        Self {
            first_name: staged.first_name,
            last_name: staged.last_name,
            gender: staged.gender,
            email: account.email.clone(),
        }
    }

    /// Display name assembled from the stored name fields.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
