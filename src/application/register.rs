//! Register flow - account creation plus profile staging.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::FlowError;
use crate::domain::profile::PendingProfile;
use crate::ports::{IdentityProvider, StagingStore};

/// Registration form input.
#[derive(Debug)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Creates the account, requests verification, and stages the profile.
pub struct RegisterHandler {
    identity: Arc<dyn IdentityProvider>,
    staging: Arc<dyn StagingStore>,
}

impl RegisterHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, staging: Arc<dyn StagingStore>) -> Self {
        Self { identity, staging }
    }

    /// Handles a registration submission.
    ///
    /// The password confirmation is checked locally before any external
    /// call. On success the profile fields are staged for consumption
    /// after the first verified sign-in; the user is not signed into the
    /// protected area.
    pub async fn handle(&self, req: RegisterRequest) -> Result<Account, FlowError> {
        if req.password.expose_secret() != req.confirm_password.expose_secret() {
            return Err(FlowError::validation(
                "confirm_password",
                "does not match password",
            ));
        }

        let account = self.identity.create_account(&req.email, &req.password).await?;
        self.identity.send_verification_email(&account).await?;

        self.staging
            .set(PendingProfile::new(
                req.first_name,
                req.last_name,
                req.gender,
                req.email,
            ))
            .await?;

        tracing::info!(account = %account.id, "registered; verification email requested");
        Ok(account)
    }
}
