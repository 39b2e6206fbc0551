//! Navigation adapters.

mod recording;

pub use recording::RecordingNavigator;
