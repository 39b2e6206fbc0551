//! Identity provider port.
//!
//! The provider owns credential storage, token issuance and password
//! hashing; this crate consumes it purely through this capability
//! surface. Besides the credential operations it exposes a session
//! event stream: observers receive the current account-or-none after
//! every sign-in, sign-out or equivalent session change.
//!
//! # Contract
//!
//! Implementations must:
//! - Deliver events to each subscribed handler in issuance order
//! - Keep delivering events after a handler's processing fails
//! - Stop delivering to a handler once it is unsubscribed
//!
//! # Example
//!
//! ```ignore
//! let id = provider.subscribe(watcher.clone());
//! // ... events flow into the watcher ...
//! provider.unsubscribe(id);
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::account::Account;

/// Errors returned by the identity provider.
///
/// These are already user-presentable; the provider's internal failures
/// are normalized into the `Unavailable` message.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// Sign-in rejected: unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredential,

    /// Re-authentication rejected: the current password is wrong.
    #[error("Wrong password")]
    WrongPassword,

    /// Account creation rejected: the email is already registered.
    #[error("An account already exists for this email")]
    EmailAlreadyInUse,

    /// A session-scoped operation was attempted with no signed-in account.
    #[error("No account is currently signed in")]
    NotSignedIn,

    /// The provider is unreachable or failed internally.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

impl IdentityError {
    /// Creates an unavailable error with a message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Opaque handle for an active session-stream subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    /// Creates a subscription id from a raw counter value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Observer of the provider's session event stream.
///
/// Handlers are awaited one event at a time per subscription, so a
/// handler that provisions on an event finishes before the next event
/// for that subscription is delivered.
#[async_trait]
pub trait SessionEventHandler: Send + Sync {
    /// Called with the current session: `Some(account)` when signed in,
    /// `None` when signed out.
    async fn on_session_event(&self, session: Option<Account>);
}

/// Capability surface of the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account for the email/password pair.
    ///
    /// Does not sign the new account in; the user must verify their
    /// email and sign in explicitly.
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Account, IdentityError>;

    /// Validates credentials and establishes a session.
    async fn sign_in(&self, email: &str, password: &SecretString)
        -> Result<Account, IdentityError>;

    /// Tears down the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Requests a verification email for the account.
    async fn send_verification_email(&self, account: &Account) -> Result<(), IdentityError>;

    /// Re-validates the current password for a signed-in account.
    ///
    /// The provider rejects stale sessions for sensitive operations, so
    /// this must be called immediately before `update_password`.
    async fn reauthenticate(
        &self,
        account: &Account,
        current_password: &SecretString,
    ) -> Result<(), IdentityError>;

    /// Replaces the account's password.
    async fn update_password(
        &self,
        account: &Account,
        new_password: &SecretString,
    ) -> Result<(), IdentityError>;

    /// Registers an observer of the session event stream.
    fn subscribe(&self, handler: Arc<dyn SessionEventHandler>) -> SubscriptionId;

    /// Removes an observer. No events are delivered to it afterwards;
    /// an event already being processed is allowed to finish.
    fn unsubscribe(&self, id: SubscriptionId);
}
