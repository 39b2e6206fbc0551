//! ProfileProvisioner - one-time creation of the durable profile record.
//!
//! Given a verified account with no existing record, consumes the staged
//! pending profile (or defaults) and performs a single create against the
//! profile store, then clears the staging slot.
//!
//! Concurrent invocations for the same account (a re-fired event during an
//! in-flight run, or two browser-context equivalents sharing a process)
//! are serialized behind a per-account async lock, and the create itself
//! goes through the store's conditional primitive, so duplicates collapse
//! safely on both levels.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, FlowError};
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileStore, StagingStore};

/// What a provisioning run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A new profile record was written and the staging slot cleared.
    Created,

    /// A record already existed; nothing was written or consumed.
    AlreadyProvisioned,
}

/// Creates the profile record for a verified account exactly once.
pub struct ProfileProvisioner {
    profiles: Arc<dyn ProfileStore>,
    staging: Arc<dyn StagingStore>,
    /// Per-account locks serializing concurrent runs for one identity.
    /// Lives for the lifetime of the process; the set of accounts seen
    /// by a single context is small.
    locks: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl ProfileProvisioner {
    pub fn new(profiles: Arc<dyn ProfileStore>, staging: Arc<dyn StagingStore>) -> Self {
        Self {
            profiles,
            staging,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, id: &AccountId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id.clone()).or_default().clone()
    }

    /// Runs the provisioning sequence for `account`.
    ///
    /// Steps, each awaited before the next begins: existence check,
    /// staging read, conditional create, staging clear. On a store
    /// failure the staging slot is left untouched so the pending record
    /// survives for a retry on the next qualifying event.
    pub async fn provision(&self, account: &Account) -> Result<ProvisionOutcome, FlowError> {
        let lock = self.lock_for(&account.id).await;
        let _guard = lock.lock().await;

        if self.profiles.exists(&account.id).await? {
            tracing::debug!(account = %account.id, "profile already provisioned");
            return Ok(ProvisionOutcome::AlreadyProvisioned);
        }

        let staged = self.staging.get().await?;
        let had_staged = staged.is_some();
        let record = ProfileRecord::from_staged(staged, account);

        let created = self.profiles.create_if_absent(&account.id, record).await?;

        // Clear the slot whether or not it had content, so a stale entry
        // never leaks into a later, unrelated account's provisioning.
        self.staging.clear().await?;

        if created {
            tracing::info!(account = %account.id, staged = had_staged, "profile provisioned");
            Ok(ProvisionOutcome::Created)
        } else {
            Ok(ProvisionOutcome::AlreadyProvisioned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::PendingProfile;
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    struct MockProfileStore {
        records: StdMutex<HashMap<AccountId, ProfileRecord>>,
        create_calls: StdMutex<u32>,
        fail_exists: bool,
        fail_create: bool,
    }

    impl MockProfileStore {
        fn new() -> Self {
            Self {
                records: StdMutex::new(HashMap::new()),
                create_calls: StdMutex::new(0),
                fail_exists: false,
                fail_create: false,
            }
        }

        fn with_record(self, key: AccountId, record: ProfileRecord) -> Self {
            self.records.lock().unwrap().insert(key, record);
            self
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn get_sync(&self, key: &AccountId) -> Option<ProfileRecord> {
            self.records.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl ProfileStore for MockProfileStore {
        async fn exists(&self, key: &AccountId) -> Result<bool, StoreError> {
            if self.fail_exists {
                return Err(StoreError::unavailable("exists check failed"));
            }
            Ok(self.records.lock().unwrap().contains_key(key))
        }

        async fn get(&self, key: &AccountId) -> Result<Option<ProfileRecord>, StoreError> {
            Ok(self.records.lock().unwrap().get(key).cloned())
        }

        async fn create(&self, key: &AccountId, record: ProfileRecord) -> Result<(), StoreError> {
            if self.fail_create {
                return Err(StoreError::PermissionDenied);
            }
            *self.create_calls.lock().unwrap() += 1;
            self.records.lock().unwrap().insert(key.clone(), record);
            Ok(())
        }

        async fn create_if_absent(
            &self,
            key: &AccountId,
            record: ProfileRecord,
        ) -> Result<bool, StoreError> {
            if self.fail_create {
                return Err(StoreError::PermissionDenied);
            }
            *self.create_calls.lock().unwrap() += 1;
            let mut records = self.records.lock().unwrap();
            if records.contains_key(key) {
                return Ok(false);
            }
            records.insert(key.clone(), record);
            Ok(true)
        }
    }

    struct MockStagingStore {
        slot: StdMutex<Option<PendingProfile>>,
    }

    impl MockStagingStore {
        fn new(slot: Option<PendingProfile>) -> Self {
            Self {
                slot: StdMutex::new(slot),
            }
        }

        fn is_empty(&self) -> bool {
            self.slot.lock().unwrap().is_none()
        }
    }

    #[async_trait]
    impl StagingStore for MockStagingStore {
        async fn set(&self, record: PendingProfile) -> Result<(), StoreError> {
            *self.slot.lock().unwrap() = Some(record);
            Ok(())
        }

        async fn get(&self) -> Result<Option<PendingProfile>, StoreError> {
            Ok(self.slot.lock().unwrap().clone())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    fn verified_account() -> Account {
        Account::new(AccountId::new("uid-1").unwrap(), "ada@example.com", true)
    }

    fn staged() -> PendingProfile {
        PendingProfile::new("Ada", "Lovelace", "female", "ada@example.com")
    }

    #[tokio::test]
    async fn creates_record_from_staged_fields_and_clears_slot() {
        let profiles = Arc::new(MockProfileStore::new());
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner = ProfileProvisioner::new(profiles.clone(), staging.clone());

        let outcome = provisioner.provision(&verified_account()).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::Created);
        let record = profiles.get_sync(&verified_account().id).unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.gender, "female");
        assert!(staging.is_empty());
    }

    #[tokio::test]
    async fn missing_staged_data_provisions_with_defaults() {
        let profiles = Arc::new(MockProfileStore::new());
        let staging = Arc::new(MockStagingStore::new(None));
        let provisioner = ProfileProvisioner::new(profiles.clone(), staging);

        let outcome = provisioner.provision(&verified_account()).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::Created);
        let record = profiles.get_sync(&verified_account().id).unwrap();
        assert_eq!(record.first_name, "");
        assert_eq!(record.gender, "");
        assert_eq!(record.email, "ada@example.com");
    }

    #[tokio::test]
    async fn second_sequential_run_is_a_no_op() {
        let profiles = Arc::new(MockProfileStore::new());
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner = ProfileProvisioner::new(profiles.clone(), staging);

        assert_eq!(
            provisioner.provision(&verified_account()).await.unwrap(),
            ProvisionOutcome::Created
        );
        assert_eq!(
            provisioner.provision(&verified_account()).await.unwrap(),
            ProvisionOutcome::AlreadyProvisioned
        );
        assert_eq!(profiles.record_count(), 1);
        assert_eq!(*profiles.create_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn existing_record_skips_staging_entirely() {
        let account = verified_account();
        let existing = ProfileRecord::from_staged(None, &account);
        let profiles =
            Arc::new(MockProfileStore::new().with_record(account.id.clone(), existing));
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner = ProfileProvisioner::new(profiles.clone(), staging.clone());

        let outcome = provisioner.provision(&account).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::AlreadyProvisioned);
        // The pending record is not consumed on the no-op path.
        assert!(!staging.is_empty());
    }

    #[tokio::test]
    async fn create_failure_leaves_staging_for_retry() {
        let mut store = MockProfileStore::new();
        store.fail_create = true;
        let profiles = Arc::new(store);
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner = ProfileProvisioner::new(profiles.clone(), staging.clone());

        let err = provisioner.provision(&verified_account()).await.unwrap_err();

        assert!(matches!(err, FlowError::Store(_)));
        assert!(err.is_retryable());
        assert!(!staging.is_empty());
        assert_eq!(profiles.record_count(), 0);
    }

    #[tokio::test]
    async fn exists_failure_leaves_staging_for_retry() {
        let mut store = MockProfileStore::new();
        store.fail_exists = true;
        let profiles = Arc::new(store);
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner = ProfileProvisioner::new(profiles, staging.clone());

        assert!(provisioner.provision(&verified_account()).await.is_err());
        assert!(!staging.is_empty());
    }

    #[tokio::test]
    async fn concurrent_runs_for_one_account_create_exactly_one_record() {
        let profiles = Arc::new(MockProfileStore::new());
        let staging = Arc::new(MockStagingStore::new(Some(staged())));
        let provisioner =
            Arc::new(ProfileProvisioner::new(profiles.clone(), staging.clone()));

        let account = verified_account();
        let (a, b) = tokio::join!(
            provisioner.provision(&account),
            provisioner.provision(&account)
        );

        let outcomes = [a.unwrap(), b.unwrap()];
        assert!(outcomes.contains(&ProvisionOutcome::Created));
        assert!(outcomes.contains(&ProvisionOutcome::AlreadyProvisioned));
        assert_eq!(profiles.record_count(), 1);
        assert!(staging.is_empty());
    }
}
