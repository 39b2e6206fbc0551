//! Navigation routes and the gating policy.
//!
//! The policy is a pure mapping from the derived session state and the
//! view the user is currently on to a navigation directive. It is
//! evaluated exactly once per session event, after any provisioning for
//! that event has settled.

use crate::domain::account::SessionState;

/// The fixed set of logical destinations the flow can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Register,
    ProtectedArea,
    ChangePassword,
}

/// The view a session event was observed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    /// A view behind the verified-session gate (dashboard, home).
    ProtectedView,

    /// The sign-in entry point.
    SignInEntry,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirective {
    /// Remain on the current view.
    Stay,

    /// Request navigation to the given route.
    Redirect(Route),
}

/// Decides where the user goes for a given session state and view.
///
/// Unverified sign-in *attempts* are rejected by the login flow itself
/// with a verification error; from the policy's perspective an unverified
/// session sitting on the entry point simply stays there.
pub fn route_for(state: &SessionState, context: ViewContext) -> NavigationDirective {
    match (state, context) {
        (SessionState::SignedOut, ViewContext::ProtectedView) => {
            NavigationDirective::Redirect(Route::SignIn)
        }
        (SessionState::SignedOut, ViewContext::SignInEntry) => NavigationDirective::Stay,
        (SessionState::SignedInUnverified(_), ViewContext::ProtectedView) => {
            NavigationDirective::Redirect(Route::SignIn)
        }
        (SessionState::SignedInUnverified(_), ViewContext::SignInEntry) => {
            NavigationDirective::Stay
        }
        (SessionState::SignedInVerified(_), ViewContext::ProtectedView) => {
            NavigationDirective::Stay
        }
        (SessionState::SignedInVerified(_), ViewContext::SignInEntry) => {
            NavigationDirective::Redirect(Route::ProtectedArea)
        }
    }
}
