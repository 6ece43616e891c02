//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! collaborators that let entities and components run without a real
//! browser or message channel.

mod in_memory_event_bus;
mod recording_driver;

pub use in_memory_event_bus::InMemoryEventBus;
pub use recording_driver::{DriverAction, RecordingDriver};
