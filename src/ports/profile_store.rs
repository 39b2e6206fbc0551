//! Profile store port.
//!
//! The durable record store is consumed only through get/set-by-key
//! operations; its internals (wire protocol, persistence) live behind
//! this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::AccountId;
use crate::domain::profile::ProfileRecord;

/// Errors from the profile or staging stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store is unreachable or failed internally.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation for this caller.
    #[error("Permission denied by store")]
    PermissionDenied,

    /// A record could not be encoded or decoded.
    #[error("Malformed record: {0}")]
    Serialization(String),

    /// Reading or writing the backing medium failed.
    #[error("Store I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Creates an unavailable error with a message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Key/value store of durable profile records, keyed by account identity.
///
/// # Contract
///
/// Implementations must:
/// - Report existence consistently with `get`
/// - Make `create_if_absent` atomic where the backend offers a
///   conditional-create primitive, so concurrent duplicate creates
///   collapse safely
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns true if a record exists at `key`.
    async fn exists(&self, key: &AccountId) -> Result<bool, StoreError>;

    /// Returns the record at `key`, if any.
    async fn get(&self, key: &AccountId) -> Result<Option<ProfileRecord>, StoreError>;

    /// Creates the record at `key` unconditionally.
    ///
    /// Duplicate-write semantics are store-dependent (last-write-wins or
    /// rejected); callers that need at-most-once creation should use
    /// `create_if_absent`.
    async fn create(&self, key: &AccountId, record: ProfileRecord) -> Result<(), StoreError>;

    /// Creates the record at `key` only if none exists, returning whether
    /// a record was written.
    ///
    /// The default implementation is a non-atomic check-then-create for
    /// backends without a conditional primitive; adapters should override
    /// it with an atomic variant when the backend allows.
    async fn create_if_absent(
        &self,
        key: &AccountId,
        record: ProfileRecord,
    ) -> Result<bool, StoreError> {
        if self.exists(key).await? {
            return Ok(false);
        }
        self.create(key, record).await?;
        Ok(true)
    }
}
