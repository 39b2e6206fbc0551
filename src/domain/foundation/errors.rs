//! Error taxonomy for the authentication flow.
//!
//! Four categories, matching how failures are surfaced to the user:
//!
//! - `Validation` - local checks that fail before any external call
//! - `Credential` - the identity provider rejected sign-in, re-auth or
//!   account creation
//! - `VerificationRequired` - signed in, but the email is not verified
//! - `Store` - the profile or staging store failed
//!
//! Errors from external calls are caught at the call site and converted
//! into a normalized message; internal detail never reaches the user as
//! a raw stack trace.

use thiserror::Error;

use crate::ports::{IdentityError, StoreError};

/// Top-level error for credential flows and provisioning.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    /// A local validation check failed. Raised before any external call.
    #[error("Field '{field}' {reason}")]
    Validation { field: String, reason: String },

    /// The identity provider rejected a credential operation.
    #[error("{0}")]
    Credential(#[from] IdentityError),

    /// The account is signed in but the email address is not verified.
    /// The session stays intact so the user can request another
    /// verification email without re-entering credentials.
    #[error("Please verify your email before continuing")]
    VerificationRequired,

    /// A profile or staging store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl FlowError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FlowError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Normalized message suitable for display to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the failed operation may succeed when retried
    /// on a later qualifying event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::Store(_))
    }
}
