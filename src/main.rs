//! Demo wiring for the authentication flow.
//!
//! Runs the full journey against the in-memory identity provider and the
//! file-backed staging slot: register, verify (simulated emailed link),
//! sign in, provision the profile, and redirect to the protected area.

use secrecy::SecretString;
use std::sync::Arc;

use authgate::adapters::identity::InMemoryIdentityProvider;
use authgate::adapters::navigation::RecordingNavigator;
use authgate::adapters::profile::InMemoryProfileStore;
use authgate::adapters::staging::FileStagingStore;
use authgate::application::{
    LoginHandler, ProfileProvisioner, RegisterHandler, RegisterRequest, SessionWatcher,
};
use authgate::config::AppConfig;
use authgate::domain::navigation::ViewContext;
use authgate::ports::{IdentityProvider, ProfileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let provider = Arc::new(InMemoryIdentityProvider::new());
    let staging = Arc::new(FileStagingStore::new(&config.staging.path));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let provisioner = Arc::new(ProfileProvisioner::new(profiles.clone(), staging.clone()));

    let register = RegisterHandler::new(provider.clone(), staging.clone());
    let login = LoginHandler::new(provider.clone());

    let password = SecretString::new("correct-horse-battery".to_string());
    let account = register
        .handle(RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            gender: "female".into(),
            email: "ada@example.com".into(),
            password: password.clone(),
            confirm_password: password.clone(),
        })
        .await?;
    tracing::info!(account = %account.id, "registered, awaiting verification");

    // The emailed link is out of band; simulate the user following it.
    provider.mark_verified("ada@example.com");

    let mounted = SessionWatcher::mount(
        provider.clone(),
        provisioner,
        navigator.clone(),
        ViewContext::SignInEntry,
    );

    let account = login.handle("ada@example.com", &password).await?;

    let record = profiles
        .get(&account.id)
        .await?
        .ok_or("profile record missing after provisioning")?;
    tracing::info!(
        name = %record.display_name(),
        redirect = ?navigator.last(),
        "signed in and provisioned"
    );

    provider.sign_out().await?;
    mounted.unmount();
    Ok(())
}
