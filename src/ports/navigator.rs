//! Navigation boundary port.
//!
//! Routing mechanics live outside this core; the flow only ever asks
//! for navigation to one of the fixed logical routes.

use crate::domain::navigation::Route;

/// Receives navigation requests produced by the navigation policy.
pub trait Navigator: Send + Sync {
    /// Requests navigation to `route`. Fire-and-forget from the flow's
    /// perspective.
    fn request_navigation(&self, route: Route);
}
