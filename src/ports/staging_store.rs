//! Staging store port.
//!
//! A process-local slot holding at most one pending profile, written at
//! registration and consumed at most once after the first verified
//! sign-in. Persistent adapters survive a reload within the same storage
//! scope; the slot is never shared across devices.
//!
//! The slot is single-writer (registration) / single-consumer (the
//! provisioner), so no locking is required at this boundary - only the
//! unconditional post-use `clear` that keeps a stale entry from leaking
//! into a later, unrelated account's provisioning.

use async_trait::async_trait;

use crate::domain::profile::PendingProfile;
use crate::ports::StoreError;

/// Single-slot holding area bridging registration-time data to
/// post-verification profile creation.
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Writes the pending profile, replacing any previous entry.
    async fn set(&self, record: PendingProfile) -> Result<(), StoreError>;

    /// Reads the slot. A payload that fails validation is reported as
    /// absent rather than propagated as a malformed shape.
    async fn get(&self) -> Result<Option<PendingProfile>, StoreError>;

    /// Empties the slot. A no-op when already empty.
    async fn clear(&self) -> Result<(), StoreError>;
}
