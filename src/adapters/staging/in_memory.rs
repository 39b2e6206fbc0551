//! In-memory staging slot.
//!
//! Does not survive a restart; use `FileStagingStore` where the slot
//! must outlive the process.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This adapter is for
//! tests and demos, not production traffic.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::profile::PendingProfile;
use crate::ports::{StagingStore, StoreError};

/// In-memory single-slot staging store.
#[derive(Default)]
pub struct InMemoryStagingStore {
    slot: RwLock<Option<PendingProfile>>,
    /// Optional error returned by every operation.
    force_error: RwLock<Option<StoreError>>,
}

impl InMemoryStagingStore {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a pending profile.
    pub fn with_pending(self, record: PendingProfile) -> Self {
        *self.slot.write().expect("slot lock poisoned") = Some(record);
        self
    }

    /// Forces all operations to return the given error.
    pub fn set_error(&self, error: StoreError) {
        *self.force_error.write().expect("force_error lock poisoned") = Some(error);
    }

    /// Clears a forced error.
    pub fn clear_error(&self) {
        *self.force_error.write().expect("force_error lock poisoned") = None;
    }

    /// Returns true if the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slot.read().expect("slot lock poisoned").is_none()
    }

    fn forced_error(&self) -> Option<StoreError> {
        self.force_error
            .read()
            .expect("force_error lock poisoned")
            .clone()
    }
}

#[async_trait]
impl StagingStore for InMemoryStagingStore {
    async fn set(&self, record: PendingProfile) -> Result<(), StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        *self.slot.write().expect("slot lock poisoned") = Some(record);
        Ok(())
    }

    async fn get(&self) -> Result<Option<PendingProfile>, StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        Ok(self.slot.read().expect("slot lock poisoned").clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        *self.slot.write().expect("slot lock poisoned") = None;
        Ok(())
    }
}
