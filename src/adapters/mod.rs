//! Adapters layer - concrete implementations of the ports.
//!
//! # Module Organization
//!
//! - `identity` - in-memory identity provider with a session event stream
//! - `profile` - in-memory profile store with atomic conditional create
//! - `staging` - in-memory and file-backed staging slots
//! - `navigation` - recording navigator for tests and the demo binary

pub mod identity;
pub mod navigation;
pub mod profile;
pub mod staging;
