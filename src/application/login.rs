//! Login flow - credential validation and the verification gate.

use secrecy::SecretString;
use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::FlowError;
use crate::ports::IdentityProvider;

/// Validates credentials and enforces the email-verification gate.
///
/// Provisioning is deliberately not invoked here: the session watcher,
/// triggered by the sign-in's session event, is the single call site for
/// profile creation, so the logic is never duplicated across entry
/// points.
pub struct LoginHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl LoginHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Handles a sign-in attempt.
    ///
    /// An unverified account yields `VerificationRequired` and no store
    /// mutation; the session itself stays intact so the user can request
    /// another verification email without re-entering credentials.
    pub async fn handle(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Account, FlowError> {
        let account = self.identity.sign_in(email, password).await?;

        if !account.email_verified {
            tracing::debug!(account = %account.id, "sign-in blocked pending verification");
            return Err(FlowError::VerificationRequired);
        }

        Ok(account)
    }
}
