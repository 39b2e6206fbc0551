//! Recording navigator.
//!
//! Captures every requested route so tests can assert on the exact
//! redirect sequence. Also serves as the navigation boundary in the
//! demo binary.
//!
//! # Panics
//!
//! Methods may panic if the internal lock is poisoned. This adapter is
//! for tests and demos, not production traffic.

use std::sync::Mutex;

use crate::domain::navigation::Route;
use crate::ports::Navigator;

/// Navigator that records requested routes.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    requested: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes requested so far, in order.
    pub fn requested(&self) -> Vec<Route> {
        self.requested.lock().expect("requested lock poisoned").clone()
    }

    /// The most recently requested route, if any.
    pub fn last(&self) -> Option<Route> {
        self.requested
            .lock()
            .expect("requested lock poisoned")
            .last()
            .copied()
    }

    /// Clears the recorded routes (for test isolation).
    pub fn clear(&self) {
        self.requested.lock().expect("requested lock poisoned").clear();
    }
}

impl Navigator for RecordingNavigator {
    fn request_navigation(&self, route: Route) {
        self.requested.lock().expect("requested lock poisoned").push(route);
    }
}
