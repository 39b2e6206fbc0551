//! Application layer - the flows that coordinate ports.
//!
//! # Module Organization
//!
//! - `provisioner` - one-time creation of the durable profile record
//! - `watcher` - session event stream observer driving provisioning and
//!   navigation
//! - `register`, `login`, `change_password` - thin credential flows

mod change_password;
mod login;
mod provisioner;
mod register;
mod watcher;

pub use change_password::{ChangePasswordHandler, ChangePasswordRequest};
pub use login::LoginHandler;
pub use provisioner::{ProfileProvisioner, ProvisionOutcome};
pub use register::{RegisterHandler, RegisterRequest};
pub use watcher::{MountedWatcher, SessionWatcher};
