//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and the error taxonomy that form the vocabulary
//! of the authentication flow.

mod errors;
mod ids;

pub use errors::FlowError;
pub use ids::AccountId;
