#![deny(missing_docs)]
//! # exodius: umbrella crate
//!
//! A single import surface for page-object automation: the protocol types
//! from `exodius-core` and, behind the `entity` feature (on by default),
//! the component graph from `exodius-entity`. The `prelude` covers the
//! happy path of declaring components and assembling a page.

pub use exodius_core;
#[cfg(feature = "entity")]
pub use exodius_entity;

/// Happy-path imports for declaring components and assembling pages.
pub mod prelude {
    pub use exodius_core::{
        Capability, ComponentError, Driver, DriverError, Event, EventBus, EventError,
        EventHandler, PageMeta, Selector, SubscriptionId,
    };

    #[cfg(feature = "entity")]
    pub use exodius_entity::{
        Component, ComponentContext, ComponentFactory, ComponentType, Declaration, Entity,
        EntityError, LazyComponent, PageEntity,
    };
}
