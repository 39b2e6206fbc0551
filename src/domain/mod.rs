//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, error taxonomy)
//! - `account` - Accounts and session state derivation
//! - `profile` - Pending and durable profile records
//! - `navigation` - Routes, view contexts and the navigation policy

pub mod account;
pub mod foundation;
pub mod navigation;
pub mod profile;
