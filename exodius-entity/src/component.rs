//! Components and their static declarations.
//!
//! A component type describes itself once, through [`Component::declare`]:
//! which capabilities it needs from its entity, and which capabilities
//! (beyond its own concrete type) it can be found by. [`ComponentType`] is
//! the erased form of that declaration the assembler works with.

use crate::entity::Entity;
use exodius_core::{Capability, CapabilitySet, ComponentError, Driver, EventBus};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A constructed component, owned by its entity.
pub type ComponentInstance = Box<dyn Any + Send + Sync>;

type Constructor = fn(&ComponentContext<'_>) -> Result<ComponentInstance, ComponentError>;

/// A reusable piece of a page: a search box, a navigation bar, a form.
///
/// Implementors declare their dependencies and extra capabilities in
/// [`Component::declare`] and build themselves in [`Component::create`].
/// By the time `create` runs, every declared dependency is already
/// resolved and can be fetched from [`ComponentContext::entity`].
pub trait Component: Any + Send + Sync + Sized {
    /// Declare required and provided capabilities.
    ///
    /// The default declares nothing: no dependencies, and the component is
    /// only reachable through its own concrete type.
    fn declare(_declaration: &mut Declaration<Self>) {}

    /// Build the component.
    fn create(ctx: &ComponentContext<'_>) -> Result<Self, ComponentError>;
}

/// Capability of components that need a second setup pass once the whole
/// graph exists (DOM binding, waiting for readiness, subscribing to events).
///
/// Declare it with [`Declaration::lazy`]; [`Entity::initialize_lazy_components`]
/// runs the hook.
pub trait LazyComponent: Send + Sync {
    /// Run deferred initialization.
    fn initialize(&mut self) -> Result<(), ComponentError>;
}

/// Builder handed to [`Component::declare`].
pub struct Declaration<C> {
    requires: Vec<Capability>,
    capabilities: CapabilitySet,
    _component: PhantomData<fn() -> C>,
}

impl<C: Component> Declaration<C> {
    fn new() -> Self {
        Self {
            requires: Vec::new(),
            capabilities: CapabilitySet::new::<C>(),
            _component: PhantomData,
        }
    }

    /// Require a component providing `T` to be resolved before this one.
    pub fn requires<T: ?Sized + 'static>(&mut self) -> &mut Self {
        let capability = Capability::of::<T>();
        if !self.requires.contains(&capability) {
            self.requires.push(capability);
        }
        self
    }

    /// Make this component reachable as `T`.
    ///
    /// Both projections are almost always `|c| c`; the compiler performs
    /// the coercion to the trait object:
    ///
    /// ```rust,ignore
    /// declaration.provides::<dyn SearchBox>(|c| c, |c| c);
    /// ```
    pub fn provides<T: ?Sized + 'static>(
        &mut self,
        shared: fn(&C) -> &T,
        exclusive: fn(&mut C) -> &mut T,
    ) -> &mut Self {
        self.capabilities.insert::<C, T>(shared, exclusive);
        self
    }

    /// Provide the [`LazyComponent`] capability.
    pub fn lazy(&mut self) -> &mut Self
    where
        C: LazyComponent,
    {
        self.provides::<dyn LazyComponent>(|c| c, |c| c)
    }
}

/// The erased, immutable declaration of one component type.
///
/// Cheap to clone. Two `ComponentType`s are equal when they describe the
/// same concrete type.
#[derive(Clone)]
pub struct ComponentType {
    capability: Capability,
    requires: Vec<Capability>,
    capabilities: Arc<CapabilitySet>,
    construct: Constructor,
}

impl ComponentType {
    /// Read the declaration of `C`.
    pub fn of<C: Component>() -> Self {
        let mut declaration = Declaration::<C>::new();
        C::declare(&mut declaration);
        Self {
            capability: Capability::of::<C>(),
            requires: declaration.requires,
            capabilities: Arc::new(declaration.capabilities),
            construct: construct::<C>,
        }
    }

    /// Add a dependency on top of the declared ones.
    ///
    /// Lets a registration table wire dependencies that are not part of
    /// the component's own declaration. If the type is already pending on
    /// an entity, registering it again merges the extra dependencies in.
    pub fn with_dependency(mut self, dependency: Capability) -> Self {
        if !self.requires.contains(&dependency) {
            self.requires.push(dependency);
        }
        self
    }

    /// Type identity of the concrete component type.
    pub fn id(&self) -> TypeId {
        self.capability.id()
    }

    /// The concrete component type as a capability.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Type name of the concrete component type.
    pub fn name(&self) -> &'static str {
        self.capability.name()
    }

    /// Declared dependencies, in declaration order.
    pub fn requires(&self) -> &[Capability] {
        &self.requires
    }

    /// Everything this type can be looked up by.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Whether an instance of this type satisfies `capability`.
    pub fn provides(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Run the declared constructor ([`Component::create`]).
    pub fn construct(
        &self,
        ctx: &ComponentContext<'_>,
    ) -> Result<ComponentInstance, ComponentError> {
        (self.construct)(ctx)
    }

    /// Add `other`'s dependencies that this registration does not list yet.
    pub(crate) fn merge_requires(&mut self, other: &ComponentType) {
        for dependency in &other.requires {
            if !self.requires.contains(dependency) {
                self.requires.push(*dependency);
            }
        }
    }
}

fn construct<C: Component>(
    ctx: &ComponentContext<'_>,
) -> Result<ComponentInstance, ComponentError> {
    let component = C::create(ctx)?;
    Ok(Box::new(component))
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.capability == other.capability
    }
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.name())
            .field("requires", &self.requires)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// What a component sees while it is being constructed: the shared driver,
/// the shared event bus, and the entity that will own it.
pub struct ComponentContext<'a> {
    entity: &'a Entity,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    /// The automation driver shared by every component of the entity.
    pub fn driver(&self) -> &'a Arc<dyn Driver> {
        self.entity.driver()
    }

    /// The event bus shared by every component of the entity.
    pub fn event_bus(&self) -> &'a Arc<dyn EventBus> {
        self.entity.event_bus()
    }

    /// The owning entity. Declared dependencies are already resolved in it.
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }
}
