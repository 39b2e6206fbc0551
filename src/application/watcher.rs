//! SessionWatcher - observes the session event stream for one view.
//!
//! One watcher is mounted per protected (or entry-point) view. On every
//! event it derives the session state, runs the provisioner for verified
//! sign-ins, and only then evaluates the navigation policy, so a view
//! reading profile data after a redirect never races a not-yet-created
//! record.
//!
//! Unmounting stops all further event processing; an event already being
//! handled, including an in-flight provisioning call, is allowed to
//! finish so a half-written record is never left behind.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ProfileProvisioner;
use crate::domain::account::{Account, SessionState};
use crate::domain::navigation::{route_for, NavigationDirective, ViewContext};
use crate::ports::{IdentityProvider, Navigator, SessionEventHandler, SubscriptionId};

/// Session stream observer for a single mounted view.
pub struct SessionWatcher {
    provisioner: Arc<ProfileProvisioner>,
    navigator: Arc<dyn Navigator>,
    context: ViewContext,
    active: AtomicBool,
    state: RwLock<SessionState>,
    last_error: RwLock<Option<String>>,
}

impl SessionWatcher {
    pub fn new(
        provisioner: Arc<ProfileProvisioner>,
        navigator: Arc<dyn Navigator>,
        context: ViewContext,
    ) -> Arc<Self> {
        Arc::new(Self {
            provisioner,
            navigator,
            context,
            active: AtomicBool::new(true),
            state: RwLock::new(SessionState::SignedOut),
            last_error: RwLock::new(None),
        })
    }

    /// Creates a watcher and subscribes it to the provider's stream.
    pub fn mount(
        provider: Arc<dyn IdentityProvider>,
        provisioner: Arc<ProfileProvisioner>,
        navigator: Arc<dyn Navigator>,
        context: ViewContext,
    ) -> MountedWatcher {
        let watcher = Self::new(provisioner, navigator, context);
        let subscription = provider.subscribe(watcher.clone());
        MountedWatcher {
            watcher,
            provider,
            subscription,
        }
    }

    /// Latest derived session state, for the view to render from.
    pub async fn current_state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// User-facing message from the most recent failed provisioning,
    /// if any. Cleared by the next successful event.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionEventHandler for SessionWatcher {
    async fn on_session_event(&self, session: Option<Account>) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        let state = SessionState::derive(session);

        if let SessionState::SignedInVerified(account) = &state {
            match self.provisioner.provision(account).await {
                Ok(outcome) => {
                    tracing::debug!(account = %account.id, ?outcome, "provisioning settled");
                    *self.last_error.write().await = None;
                }
                Err(err) => {
                    // The pending record stays staged; the subscription
                    // keeps receiving events so a later one can retry.
                    tracing::warn!(account = %account.id, error = %err, "provisioning failed");
                    *self.last_error.write().await = Some(err.user_message());
                }
            }
        } else {
            *self.last_error.write().await = None;
        }

        *self.state.write().await = state.clone();

        // One policy evaluation per event, after provisioning settled.
        if let NavigationDirective::Redirect(route) = route_for(&state, self.context) {
            tracing::debug!(?route, "navigation requested");
            self.navigator.request_navigation(route);
        }
    }
}

/// Handle tying a watcher to its provider subscription.
pub struct MountedWatcher {
    watcher: Arc<SessionWatcher>,
    provider: Arc<dyn IdentityProvider>,
    subscription: SubscriptionId,
}

impl MountedWatcher {
    /// The underlying watcher, for reading the state snapshot.
    pub fn watcher(&self) -> &Arc<SessionWatcher> {
        &self.watcher
    }

    /// Unsubscribes from the provider and stops event processing.
    pub fn unmount(self) {
        self.watcher.deactivate();
        self.provider.unsubscribe(self.subscription);
    }
}
