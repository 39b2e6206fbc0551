//! Account and session state types.
//!
//! These types represent the principal managed by the identity provider.
//! They have **no provider dependencies** - any backend (Firebase, Zitadel,
//! an in-memory fake) can populate them through the `IdentityProvider` port.
//!
//! # Design Decisions
//!
//! - `Account` carries only the attributes the flow uses: id, email,
//!   verified flag. Credential material never leaves the provider.
//! - `SessionState` is derived, never stored; it is recomputed from each
//!   event on the provider's session stream and applied whole.

use crate::domain::foundation::AccountId;

/// An identity-provider account as observed on the session event stream.
///
/// The `email_verified` flag is monotonic: the provider flips it from
/// false to true when the user follows the emailed link, and it never
/// reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The unique account identifier issued by the provider.
    pub id: AccountId,

    /// The email address the account was created with.
    pub email: String,

    /// Whether the provider has confirmed ownership of the email address.
    pub email_verified: bool,
}

impl Account {
    /// Creates a new account snapshot.
    pub fn new(id: AccountId, email: impl Into<String>, email_verified: bool) -> Self {
        Self {
            id,
            email: email.into(),
            email_verified,
        }
    }
}

/// Derived classification of the current session.
///
/// Exactly one of three states, recomputed on every provider event and
/// never partially applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No account is signed in.
    SignedOut,

    /// An account is signed in but its email is not yet verified.
    SignedInUnverified(Account),

    /// An account is signed in with a verified email address.
    SignedInVerified(Account),
}

impl SessionState {
    /// Derives the session state from the latest provider event.
    ///
    /// Pure function of the event alone: `None` means signed out, an
    /// account maps to unverified or verified according to its flag.
    pub fn derive(event: Option<Account>) -> Self {
        match event {
            None => SessionState::SignedOut,
            Some(account) if account.email_verified => SessionState::SignedInVerified(account),
            Some(account) => SessionState::SignedInUnverified(account),
        }
    }

    /// Returns the signed-in account, if any.
    pub fn account(&self) -> Option<&Account> {
        match self {
            SessionState::SignedOut => None,
            SessionState::SignedInUnverified(account) => Some(account),
            SessionState::SignedInVerified(account) => Some(account),
        }
    }

    /// Returns true if a verified account is signed in.
    pub fn is_verified(&self) -> bool {
        matches!(self, SessionState::SignedInVerified(_))
    }
}
