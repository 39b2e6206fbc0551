//! In-memory profile store.
//!
//! Backs the provisioning tests and the demo binary. `create` is
//! last-write-wins, modelling a store without duplicate rejection;
//! `create_if_absent` is atomic under a single write lock, the
//! conditional primitive the provisioner relies on.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This adapter is for
//! tests and demos, not production traffic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::AccountId;
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileStore, StoreError};

/// In-memory key/value store of profile records.
#[derive(Default)]
pub struct InMemoryProfileStore {
    records: RwLock<HashMap<AccountId, ProfileRecord>>,
    /// Optional error returned by every operation.
    force_error: RwLock<Option<StoreError>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing record.
    pub fn with_record(self, key: AccountId, record: ProfileRecord) -> Self {
        self.records
            .write()
            .expect("records lock poisoned")
            .insert(key, record);
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

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.records.read().expect("records lock poisoned").len()
    }

    fn forced_error(&self) -> Option<StoreError> {
        self.force_error
            .read()
            .expect("force_error lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn exists(&self, key: &AccountId) -> Result<bool, StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        Ok(self
            .records
            .read()
            .expect("records lock poisoned")
            .contains_key(key))
    }

    async fn get(&self, key: &AccountId) -> Result<Option<ProfileRecord>, StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        Ok(self
            .records
            .read()
            .expect("records lock poisoned")
            .get(key)
            .cloned())
    }

    async fn create(&self, key: &AccountId, record: ProfileRecord) -> Result<(), StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        self.records
            .write()
            .expect("records lock poisoned")
            .insert(key.clone(), record);
        Ok(())
    }

    async fn create_if_absent(
        &self,
        key: &AccountId,
        record: ProfileRecord,
    ) -> Result<bool, StoreError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        let mut records = self.records.write().expect("records lock poisoned");
        if records.contains_key(key) {
            return Ok(false);
        }
        records.insert(key.clone(), record);
        Ok(true)
    }
}
