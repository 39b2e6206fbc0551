//! Authgate - Email/password authentication with gated profile provisioning.
//!
//! This crate coordinates an identity provider's session event stream with
//! one-time creation of a durable profile record and a navigation policy
//! that gates access to the protected area.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
