//! The entity: a component graph assembled on demand.

use crate::component::{
    Component, ComponentContext, ComponentInstance, ComponentType, LazyComponent,
};
use crate::error::EntityError;
use crate::factory::{ComponentFactory, DeclaredFactory};
use crate::page::PageEntity;
use exodius_core::{Capability, Driver, EventBus, PageMeta};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

struct ResolvedComponent {
    component: ComponentType,
    instance: ComponentInstance,
}

/// A page or modal: owns a set of components that share one driver and one
/// event bus, and assembles them in dependency order.
///
/// Registration only records component types. [`Entity::assemble_graph`]
/// resolves every pending type depth-first, constructing each dependency
/// before its dependents and each type at most once. Queries are expressed
/// in capabilities: a concrete type or a trait object type such as
/// `dyn SearchBox`.
///
/// All mutation goes through `&mut self`. Share an entity across threads
/// by wrapping it in a `Mutex`.
pub struct Entity {
    driver: Arc<dyn Driver>,
    event_bus: Arc<dyn EventBus>,
    factory: Arc<dyn ComponentFactory>,
    pending: Vec<ComponentType>,
    resolved: Vec<ResolvedComponent>,
    meta: Option<PageMeta>,
}

impl Entity {
    /// Create an empty entity that builds components with their declared
    /// constructors.
    pub fn new(driver: Arc<dyn Driver>, event_bus: Arc<dyn EventBus>) -> Self {
        Self::with_factory(driver, event_bus, Arc::new(DeclaredFactory))
    }

    /// Create an empty entity that builds components through `factory`.
    pub fn with_factory(
        driver: Arc<dyn Driver>,
        event_bus: Arc<dyn EventBus>,
        factory: Arc<dyn ComponentFactory>,
    ) -> Self {
        Self {
            driver,
            event_bus,
            factory,
            pending: Vec::new(),
            resolved: Vec::new(),
            meta: None,
        }
    }

    /// Compose, assemble and lazily initialize the page `P`.
    pub fn for_page<P: PageEntity>(
        driver: Arc<dyn Driver>,
        event_bus: Arc<dyn EventBus>,
    ) -> Result<Self, EntityError> {
        let mut entity = Self::new(driver, event_bus).with_meta(P::meta());
        P::compose(&mut entity);
        entity.assemble_graph()?;
        entity.initialize_lazy_components()?;
        Ok(entity)
    }

    /// Attach page metadata.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Page metadata, if this entity was built for a page.
    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    /// The driver handed to every component.
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// The event bus handed to every component.
    pub fn event_bus(&self) -> &Arc<dyn EventBus> {
        &self.event_bus
    }

    /// Register component type `C`. Nothing is constructed until
    /// [`Entity::assemble_graph`].
    pub fn add_component<C: Component>(&mut self) -> &mut Self {
        self.add_component_type(ComponentType::of::<C>())
    }

    /// Register an already-read component type.
    ///
    /// Registering a type that is already pending merges its dependencies
    /// into the pending registration. Registering a type whose instance is
    /// already resolved is a no-op.
    pub fn add_component_type(&mut self, component: ComponentType) -> &mut Self {
        if self.resolved.iter().any(|r| r.component == component) {
            return self;
        }
        match self.pending.iter_mut().find(|p| **p == component) {
            Some(pending) => pending.merge_requires(&component),
            None => {
                tracing::debug!(component = component.name(), "exodius.entity.register");
                self.pending.push(component);
            }
        }
        self
    }

    /// Resolve every pending component type.
    ///
    /// Each type is constructed after the components providing its declared
    /// dependencies. On success the pending set is empty. On failure the
    /// error is returned immediately; components constructed before the
    /// failure stay resolved and the rest stay pending.
    pub fn assemble_graph(&mut self) -> Result<(), EntityError> {
        // Resolution removes entries from `pending`, so walk a snapshot.
        let snapshot = self.pending.clone();
        for component in &snapshot {
            let mut stack = Vec::new();
            if let Err(error) = self.resolve(component, &mut stack) {
                tracing::warn!(
                    component = component.name(),
                    %error,
                    "exodius.entity.assemble_failed"
                );
                return Err(error);
            }
        }
        self.pending.clear();
        tracing::info!(resolved = self.resolved.len(), "exodius.entity.assembled");
        Ok(())
    }

    fn resolve(
        &mut self,
        component: &ComponentType,
        stack: &mut Vec<Capability>,
    ) -> Result<(), EntityError> {
        let capability = component.capability();
        if self.is_satisfied(&capability) {
            return Ok(());
        }
        if stack.contains(&capability) {
            let chain = stack
                .iter()
                .chain(std::iter::once(&capability))
                .map(|c| c.name().to_string())
                .collect();
            return Err(EntityError::CyclicDependency { chain });
        }

        tracing::debug!(
            component = component.name(),
            depth = stack.len(),
            "exodius.entity.resolve"
        );
        stack.push(capability);

        for dependency in component.requires() {
            if self.is_satisfied(dependency) {
                continue;
            }
            let candidates: Vec<&ComponentType> = self
                .pending
                .iter()
                .filter(|p| p.provides(dependency))
                .collect();
            let candidate = match candidates.as_slice() {
                [] => {
                    return Err(EntityError::MissingDependency {
                        dependency: dependency.name().to_string(),
                        required_by: component.name().to_string(),
                    });
                }
                [only] => (*only).clone(),
                _ => {
                    return Err(EntityError::AmbiguousDependency {
                        dependency: dependency.name().to_string(),
                        required_by: component.name().to_string(),
                        candidates: candidates.iter().map(|c| c.name().to_string()).collect(),
                    });
                }
            };
            self.resolve(&candidate, stack)?;
        }

        self.construct(component)?;
        stack.pop();
        Ok(())
    }

    fn construct(&mut self, component: &ComponentType) -> Result<(), EntityError> {
        tracing::debug!(component = component.name(), "exodius.entity.construct");
        let created = {
            let ctx = ComponentContext::new(self);
            self.factory.create(component, &ctx)
        };
        let instance = created.map_err(|source| EntityError::Construction {
            component: component.name().to_string(),
            source,
        })?;
        if (&*instance as &dyn Any).type_id() != component.id() {
            return Err(EntityError::UnexpectedInstance {
                component: component.name().to_string(),
            });
        }

        self.resolved.push(ResolvedComponent {
            component: component.clone(),
            instance,
        });
        self.pending.retain(|p| p != component);
        Ok(())
    }

    fn is_satisfied(&self, capability: &Capability) -> bool {
        self.resolved.iter().any(|r| r.component.provides(capability))
    }

    /// Index of the single resolved component providing `capability`.
    fn unique(&self, capability: Capability) -> Result<usize, EntityError> {
        let mut matches = self
            .resolved
            .iter()
            .enumerate()
            .filter(|(_, r)| r.component.provides(&capability))
            .map(|(index, _)| index);
        match (matches.next(), matches.next()) {
            (None, _) => Err(EntityError::NotFound {
                capability: capability.name().to_string(),
            }),
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(EntityError::AmbiguousResult {
                capability: capability.name().to_string(),
                count: 2 + matches.count(),
            }),
        }
    }

    /// The single resolved component providing `T`.
    ///
    /// Fails with [`EntityError::NotFound`] if none does and with
    /// [`EntityError::AmbiguousResult`] if several do; use
    /// [`Entity::get_components`] for the latter.
    pub fn get_component<T: ?Sized + 'static>(&self) -> Result<&T, EntityError> {
        let resolved = &self.resolved[self.unique(Capability::of::<T>())?];
        resolved
            .component
            .capabilities()
            .project::<T>(&*resolved.instance)
            .ok_or_else(|| EntityError::UnexpectedInstance {
                component: resolved.component.name().to_string(),
            })
    }

    /// Mutable form of [`Entity::get_component`].
    pub fn get_component_mut<T: ?Sized + 'static>(&mut self) -> Result<&mut T, EntityError> {
        let index = self.unique(Capability::of::<T>())?;
        let resolved = &mut self.resolved[index];
        let name = resolved.component.name();
        resolved
            .component
            .capabilities()
            .project_mut::<T>(&mut *resolved.instance)
            .ok_or_else(|| EntityError::UnexpectedInstance {
                component: name.to_string(),
            })
    }

    /// Every resolved component providing `T`, in resolution order.
    pub fn get_components<T: ?Sized + 'static>(&self) -> Vec<&T> {
        self.resolved
            .iter()
            .filter_map(|r| r.component.capabilities().project::<T>(&*r.instance))
            .collect()
    }

    /// Whether at least one resolved component provides `T`.
    pub fn has_component<T: ?Sized + 'static>(&self) -> bool {
        self.is_satisfied(&Capability::of::<T>())
    }

    /// Run [`LazyComponent::initialize`] on every resolved component that
    /// declared the capability, once each, in resolution order.
    ///
    /// Stops at the first failing hook.
    pub fn initialize_lazy_components(&mut self) -> Result<(), EntityError> {
        for resolved in &mut self.resolved {
            let component = &resolved.component;
            let Some(lazy) = component
                .capabilities()
                .project_mut::<dyn LazyComponent>(&mut *resolved.instance)
            else {
                continue;
            };
            tracing::debug!(component = component.name(), "exodius.entity.lazy_init");
            if let Err(source) = lazy.initialize() {
                tracing::warn!(
                    component = component.name(),
                    error = %source,
                    "exodius.entity.lazy_init_failed"
                );
                return Err(EntityError::Initialization {
                    component: component.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Remove the single resolved component providing `T`.
    ///
    /// Fails under the same conditions as [`Entity::get_component`]. The
    /// removed type is not re-registered; components that depended on it
    /// stay resolved.
    pub fn remove_component<T: ?Sized + 'static>(&mut self) -> Result<(), EntityError> {
        let index = self.unique(Capability::of::<T>())?;
        let removed = self.resolved.remove(index);
        tracing::debug!(component = removed.component.name(), "exodius.entity.remove");
        Ok(())
    }

    /// Component types registered but not yet resolved.
    pub fn pending_components(&self) -> impl Iterator<Item = &ComponentType> {
        self.pending.iter()
    }

    /// Component types with a live instance, in resolution order.
    pub fn resolved_components(&self) -> impl Iterator<Item = &ComponentType> {
        self.resolved.iter().map(|r| &r.component)
    }

    /// Whether `C` is registered and not yet resolved.
    pub fn is_pending<C: Component>(&self) -> bool {
        let capability = Capability::of::<C>();
        self.pending.iter().any(|p| p.capability() == capability)
    }

    /// Number of resolved components.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether no component is resolved.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("meta", &self.meta)
            .field(
                "pending",
                &self.pending.iter().map(ComponentType::name).collect::<Vec<_>>(),
            )
            .field(
                "resolved",
                &self.resolved_components().map(ComponentType::name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exodius_core::test_utils::{InMemoryEventBus, RecordingDriver};
    use exodius_core::ComponentError;

    struct Leaf;

    impl Component for Leaf {
        fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
            Ok(Leaf)
        }
    }

    fn entity() -> Entity {
        Entity::new(
            Arc::new(RecordingDriver::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn unique_reports_not_found_on_empty_entity() {
        let entity = entity();
        let err = entity.unique(Capability::of::<Leaf>()).unwrap_err();
        assert!(matches!(err, EntityError::NotFound { .. }));
    }

    #[test]
    fn resolve_pops_stack_on_success() {
        let mut entity = entity();
        entity.add_component::<Leaf>();
        let mut stack = Vec::new();
        entity.resolve(&ComponentType::of::<Leaf>(), &mut stack).unwrap();
        assert!(stack.is_empty());
        assert!(!entity.is_pending::<Leaf>());
    }

    #[test]
    fn register_after_resolution_is_ignored() {
        let mut entity = entity();
        entity.add_component::<Leaf>();
        entity.assemble_graph().unwrap();
        entity.add_component::<Leaf>();
        assert_eq!(entity.pending_components().count(), 0);
    }
}
