//! # exodius-core: capability tagging and collaborator traits
//!
//! This crate defines the vocabulary shared by page entities, their
//! components, and the automation stack underneath them.
//!
//! | Concern | Types | What it does |
//! |---------|-------|-------------|
//! | Capabilities | [`Capability`], [`CapabilitySet`] | Name and project the types a component can be found by |
//! | Driver | [`Driver`], [`Selector`] | UI actions components perform |
//! | Events | [`EventBus`], [`Event`], [`EventHandler`] | Pub/sub between components |
//! | Page metadata | [`PageMeta`] | Route, DOM anchor and display name of a page |
//!
//! The assembler in `exodius-entity` reads capabilities and passes the
//! driver and event bus through to components untouched. Everything here
//! is a boundary: implementations live elsewhere, and minimal in-memory
//! ones are available in [`test_utils`] behind the `test-utils` feature.

#![deny(missing_docs)]

pub mod capability;
pub mod driver;
pub mod error;
pub mod event;
pub mod page;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use capability::{Capability, CapabilitySet};
pub use driver::{Driver, Selector};
pub use error::{ComponentError, DriverError, EventError};
pub use event::{Event, EventBus, EventHandler, SubscriptionId};
pub use page::PageMeta;
