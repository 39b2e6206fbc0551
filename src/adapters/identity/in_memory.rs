//! In-memory identity provider.
//!
//! Deterministic provider implementation for tests and the demo binary:
//! accounts live in a map keyed by email, at most one session is current,
//! and session events are delivered synchronously and in subscription
//! order, so a test observes every downstream effect by the time a
//! sign-in call returns.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This adapter is for
//! tests and demos, not production traffic.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::foundation::AccountId;
use crate::ports::{IdentityError, IdentityProvider, SessionEventHandler, SubscriptionId};

struct AccountEntry {
    account: Account,
    password: String,
}

/// In-memory implementation of the identity provider capability.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    /// Accounts keyed by email address.
    accounts: RwLock<HashMap<String, AccountEntry>>,
    /// The current session, if any.
    current: RwLock<Option<Account>>,
    /// Subscribed session observers keyed by subscription id.
    handlers: RwLock<HashMap<u64, Arc<dyn SessionEventHandler>>>,
    next_subscription: AtomicU64,
    /// Emails a verification message was requested for.
    verification_requests: RwLock<Vec<String>>,
    /// Optional error returned by every credential operation.
    force_error: RwLock<Option<IdentityError>>,
}

impl InMemoryIdentityProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces all credential operations to return the given error.
    pub fn with_error(self, error: IdentityError) -> Self {
        *self.force_error.write().expect("force_error lock poisoned") = Some(error);
        self
    }

    /// Clears a forced error.
    pub fn clear_error(&self) {
        *self.force_error.write().expect("force_error lock poisoned") = None;
    }

    /// Flips the account's verified flag, as the emailed link does.
    ///
    /// Monotonic: there is no way to unverify. Does not emit a session
    /// event; the change is observed on the next sign-in or re-fire,
    /// matching how providers surface out-of-band verification.
    pub fn mark_verified(&self, email: &str) {
        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        if let Some(entry) = accounts.get_mut(email) {
            entry.account.email_verified = true;
            let mut current = self.current.write().expect("current lock poisoned");
            if let Some(session) = current.as_mut() {
                if session.id == entry.account.id {
                    session.email_verified = true;
                }
            }
        }
    }

    /// Re-emits the current session to all observers, modelling a fresh
    /// app load against an existing provider session.
    pub async fn notify_observers(&self) {
        let session = self.current_session();
        self.emit(session).await;
    }

    /// The current session, if any.
    pub fn current_session(&self) -> Option<Account> {
        self.current.read().expect("current lock poisoned").clone()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().expect("accounts lock poisoned").len()
    }

    /// Number of verification emails requested so far.
    pub fn verification_emails_sent(&self) -> usize {
        self.verification_requests
            .read()
            .expect("verification lock poisoned")
            .len()
    }

    /// The provider-issued id for a registered email, if any.
    pub fn account_id_for(&self, email: &str) -> Option<AccountId> {
        self.accounts
            .read()
            .expect("accounts lock poisoned")
            .get(email)
            .map(|entry| entry.account.id.clone())
    }

    fn forced_error(&self) -> Option<IdentityError> {
        self.force_error
            .read()
            .expect("force_error lock poisoned")
            .clone()
    }

    /// Delivers an event to every subscriber, awaited one at a time in
    /// subscription order. The handler map is snapshotted first so no
    /// lock is held across an await point.
    async fn emit(&self, session: Option<Account>) {
        let mut subscribers: Vec<(u64, Arc<dyn SessionEventHandler>)> = self
            .handlers
            .read()
            .expect("handlers lock poisoned")
            .iter()
            .map(|(id, handler)| (*id, handler.clone()))
            .collect();
        subscribers.sort_by_key(|(id, _)| *id);

        for (_, handler) in subscribers {
            handler.on_session_event(session.clone()).await;
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Account, IdentityError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        if accounts.contains_key(email) {
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let account = Account::new(
            AccountId::new(Uuid::new_v4().to_string())
                .map_err(|e| IdentityError::unavailable(e.to_string()))?,
            email,
            false,
        );
        accounts.insert(
            email.to_string(),
            AccountEntry {
                account: account.clone(),
                password: password.expose_secret().clone(),
            },
        );
        Ok(account)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Account, IdentityError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let account = {
            let accounts = self.accounts.read().expect("accounts lock poisoned");
            let entry = accounts.get(email).ok_or(IdentityError::InvalidCredential)?;
            if entry.password != *password.expose_secret() {
                return Err(IdentityError::InvalidCredential);
            }
            entry.account.clone()
        };

        *self.current.write().expect("current lock poisoned") = Some(account.clone());
        self.emit(Some(account.clone())).await;
        Ok(account)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.current.write().expect("current lock poisoned") = None;
        self.emit(None).await;
        Ok(())
    }

    async fn send_verification_email(&self, account: &Account) -> Result<(), IdentityError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        self.verification_requests
            .write()
            .expect("verification lock poisoned")
            .push(account.email.clone());
        Ok(())
    }

    async fn reauthenticate(
        &self,
        account: &Account,
        current_password: &SecretString,
    ) -> Result<(), IdentityError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let accounts = self.accounts.read().expect("accounts lock poisoned");
        let entry = accounts
            .get(&account.email)
            .ok_or(IdentityError::NotSignedIn)?;
        if entry.password != *current_password.expose_secret() {
            return Err(IdentityError::WrongPassword);
        }
        Ok(())
    }

    async fn update_password(
        &self,
        account: &Account,
        new_password: &SecretString,
    ) -> Result<(), IdentityError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        let entry = accounts
            .get_mut(&account.email)
            .ok_or(IdentityError::NotSignedIn)?;
        entry.password = new_password.expose_secret().clone();
        Ok(())
    }

    fn subscribe(&self, handler: Arc<dyn SessionEventHandler>) -> SubscriptionId {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.handlers
            .write()
            .expect("handlers lock poisoned")
            .insert(id, handler);
        SubscriptionId::from_raw(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers
            .write()
            .expect("handlers lock poisoned")
            .remove(&id.0);
    }
}
