#![deny(missing_docs)]
//! Dependency-driven component graph assembly for page entities.
//!
//! An [`Entity`] owns the components of one page or modal. Components are
//! registered as types, then [`Entity::assemble_graph`] constructs them in
//! dependency order: each [`Component`] declares the capabilities it needs,
//! and the assembler resolves those depth-first, rejecting cycles, missing
//! providers and ambiguous providers. Every component is built exactly once
//! through a [`ComponentFactory`] and receives the entity's shared driver
//! and event bus.
//!
//! ```rust
//! use exodius_core::test_utils::{InMemoryEventBus, RecordingDriver};
//! use exodius_core::ComponentError;
//! use exodius_entity::{Component, ComponentContext, Declaration, Entity};
//! use std::sync::Arc;
//!
//! trait Navigation {
//!     fn links(&self) -> usize;
//! }
//!
//! struct NavBar;
//!
//! impl Navigation for NavBar {
//!     fn links(&self) -> usize {
//!         3
//!     }
//! }
//!
//! impl Component for NavBar {
//!     fn declare(declaration: &mut Declaration<Self>) {
//!         declaration.provides::<dyn Navigation>(|c| c, |c| c);
//!     }
//!
//!     fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
//!         Ok(NavBar)
//!     }
//! }
//!
//! struct Header {
//!     links: usize,
//! }
//!
//! impl Component for Header {
//!     fn declare(declaration: &mut Declaration<Self>) {
//!         declaration.requires::<dyn Navigation>();
//!     }
//!
//!     fn create(ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
//!         let nav = ctx
//!             .entity()
//!             .get_component::<dyn Navigation>()
//!             .map_err(|e| ComponentError::MissingCapability(e.to_string()))?;
//!         Ok(Header { links: nav.links() })
//!     }
//! }
//!
//! let mut entity = Entity::new(
//!     Arc::new(RecordingDriver::new()),
//!     Arc::new(InMemoryEventBus::new()),
//! );
//! entity.add_component::<Header>().add_component::<NavBar>();
//! entity.assemble_graph().unwrap();
//!
//! assert_eq!(entity.get_component::<Header>().unwrap().links, 3);
//! ```

pub mod component;
pub mod entity;
pub mod error;
pub mod factory;
pub mod page;

pub use component::{
    Component, ComponentContext, ComponentInstance, ComponentType, Declaration, LazyComponent,
};
pub use entity::Entity;
pub use error::EntityError;
pub use factory::{ComponentFactory, DeclaredFactory};
pub use page::PageEntity;
