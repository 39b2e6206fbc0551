//! Staging store adapters.

mod file;
mod in_memory;

pub use file::FileStagingStore;
pub use in_memory::InMemoryStagingStore;
