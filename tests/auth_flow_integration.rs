//! End-to-end tests for the registration → verification → provisioning
//! journey, wired through the in-memory adapters the way the demo binary
//! wires them.

use secrecy::SecretString;
use std::sync::Arc;

use authgate::adapters::identity::InMemoryIdentityProvider;
use authgate::adapters::navigation::RecordingNavigator;
use authgate::adapters::profile::InMemoryProfileStore;
use authgate::adapters::staging::{FileStagingStore, InMemoryStagingStore};
use authgate::application::{
    LoginHandler, ProfileProvisioner, RegisterHandler, RegisterRequest, SessionWatcher,
};
use authgate::domain::foundation::FlowError;
use authgate::domain::navigation::{Route, ViewContext};
use authgate::ports::{IdentityProvider, ProfileStore, StagingStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct App {
    provider: Arc<InMemoryIdentityProvider>,
    profiles: Arc<InMemoryProfileStore>,
    staging: Arc<dyn StagingStore>,
    navigator: Arc<RecordingNavigator>,
}

impl App {
    fn new() -> Self {
        Self::with_staging(Arc::new(InMemoryStagingStore::new()))
    }

    fn with_staging(staging: Arc<dyn StagingStore>) -> Self {
        Self {
            provider: Arc::new(InMemoryIdentityProvider::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            staging,
            navigator: Arc::new(RecordingNavigator::new()),
        }
    }

    fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.provider.clone(), self.staging.clone())
    }

    fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.provider.clone())
    }

    fn mount_watcher(&self, context: ViewContext) -> authgate::application::MountedWatcher {
        let provisioner = Arc::new(ProfileProvisioner::new(
            self.profiles.clone(),
            self.staging.clone(),
        ));
        SessionWatcher::mount(
            self.provider.clone(),
            provisioner,
            self.navigator.clone(),
            context,
        )
    }
}

fn password() -> SecretString {
    SecretString::new("correct-horse-battery".to_string())
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        gender: "female".into(),
        email: "ada@example.com".into(),
        password: password(),
        confirm_password: password(),
    }
}

// =============================================================================
// Journeys
// =============================================================================

#[tokio::test]
async fn full_journey_register_verify_login_provision_redirect() {
    let app = App::new();

    // Register: account created, profile staged, verification requested.
    let account = app.register_handler().handle(registration()).await.unwrap();
    assert_eq!(app.provider.verification_emails_sent(), 1);
    assert!(app.staging.get().await.unwrap().is_some());

    // Login before verification is rejected, nothing provisioned.
    let err = app
        .login_handler()
        .handle("ada@example.com", &password())
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::VerificationRequired));
    assert_eq!(app.profiles.record_count(), 0);
    assert!(app.staging.get().await.unwrap().is_some());

    // The user follows the emailed link.
    app.provider.mark_verified("ada@example.com");

    // Sign in from the entry point with a mounted watcher.
    let mounted = app.mount_watcher(ViewContext::SignInEntry);
    app.login_handler()
        .handle("ada@example.com", &password())
        .await
        .unwrap();

    // The staged fields became the durable record, the slot is empty,
    // and the redirect fired only after provisioning settled.
    let record = app.profiles.get(&account.id).await.unwrap().unwrap();
    assert_eq!(record.first_name, "Ada");
    assert_eq!(record.last_name, "Lovelace");
    assert_eq!(record.gender, "female");
    assert_eq!(record.email, "ada@example.com");
    assert!(app.staging.get().await.unwrap().is_none());
    assert_eq!(app.navigator.requested(), vec![Route::ProtectedArea]);

    mounted.unmount();
}

#[tokio::test]
async fn reload_after_provisioning_does_not_create_a_second_record() {
    let app = App::new();
    app.register_handler().handle(registration()).await.unwrap();
    app.provider.mark_verified("ada@example.com");

    let mounted = app.mount_watcher(ViewContext::SignInEntry);
    app.login_handler()
        .handle("ada@example.com", &password())
        .await
        .unwrap();
    mounted.unmount();
    app.navigator.clear();

    // A fresh protected view mounts and the provider re-fires the
    // current session, as on an app reload.
    let mounted = app.mount_watcher(ViewContext::ProtectedView);
    app.provider.notify_observers().await;

    assert_eq!(app.profiles.record_count(), 1);
    assert!(app.navigator.requested().is_empty());
    assert!(mounted.watcher().current_state().await.is_verified());
}

#[tokio::test]
async fn direct_verified_login_without_registration_provisions_defaults() {
    let app = App::new();
    // Account exists (created elsewhere); nothing was ever staged here.
    app.provider
        .create_account("grace@example.com", &password())
        .await
        .unwrap();
    app.provider.mark_verified("grace@example.com");

    let _mounted = app.mount_watcher(ViewContext::SignInEntry);
    app.login_handler()
        .handle("grace@example.com", &password())
        .await
        .unwrap();

    let id = app.provider.account_id_for("grace@example.com").unwrap();
    let record = app.profiles.get(&id).await.unwrap().unwrap();
    assert_eq!(record.first_name, "");
    assert_eq!(record.gender, "");
    assert_eq!(record.email, "grace@example.com");
}

#[tokio::test]
async fn staged_profile_survives_a_reload_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pending_profile.json");

    // First "page load": register, then the process goes away.
    {
        let app = App::with_staging(Arc::new(FileStagingStore::new(&path)));
        app.register_handler().handle(registration()).await.unwrap();
        app.provider.mark_verified("ada@example.com");
    }

    // Second "page load" on the same storage scope: a fresh provider
    // session signs in and consumes the staged slot from disk.
    let app = App::with_staging(Arc::new(FileStagingStore::new(&path)));
    app.provider
        .create_account("ada@example.com", &password())
        .await
        .unwrap();
    app.provider.mark_verified("ada@example.com");

    let _mounted = app.mount_watcher(ViewContext::SignInEntry);
    app.login_handler()
        .handle("ada@example.com", &password())
        .await
        .unwrap();

    let id = app.provider.account_id_for("ada@example.com").unwrap();
    let record = app.profiles.get(&id).await.unwrap().unwrap();
    assert_eq!(record.first_name, "Ada");
    assert!(!path.exists(), "staging file should be gone after consumption");
}

#[tokio::test]
async fn signed_out_visitor_on_protected_view_is_sent_to_sign_in() {
    let app = App::new();
    let _mounted = app.mount_watcher(ViewContext::ProtectedView);

    app.provider.notify_observers().await;

    assert_eq!(app.navigator.requested(), vec![Route::SignIn]);
    assert_eq!(app.profiles.record_count(), 0);
}
