//! Ports layer - capability interfaces consumed by the application.
//!
//! Each port is an `async_trait` object-safe trait implemented by an
//! adapter. Handlers receive them as `Arc<dyn Port>` so tests can swap
//! in mocks.

mod identity_provider;
mod navigator;
mod profile_store;
mod staging_store;

pub use identity_provider::{
    IdentityError, IdentityProvider, SessionEventHandler, SubscriptionId,
};
pub use navigator::Navigator;
pub use profile_store::{ProfileStore, StoreError};
pub use staging_store::StagingStore;
