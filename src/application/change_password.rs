//! Change-password flow - re-authentication plus password update.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::FlowError;
use crate::ports::IdentityProvider;

/// Change-password form input.
#[derive(Debug)]
pub struct ChangePasswordRequest {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Re-authenticates with the current credential, then updates.
///
/// The provider rejects stale sessions for sensitive operations, so the
/// re-authentication happens immediately before the update. On failure
/// the caller's form fields are left as entered; clearing them on
/// success is the caller's concern.
pub struct ChangePasswordHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl ChangePasswordHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(
        &self,
        account: &Account,
        req: &ChangePasswordRequest,
    ) -> Result<(), FlowError> {
        if req.new_password.expose_secret() != req.confirm_password.expose_secret() {
            return Err(FlowError::validation(
                "confirm_password",
                "does not match new password",
            ));
        }

        self.identity
            .reauthenticate(account, &req.current_password)
            .await?;
        self.identity
            .update_password(account, &req.new_password)
            .await?;

        tracing::info!(account = %account.id, "password updated");
        Ok(())
    }
}
