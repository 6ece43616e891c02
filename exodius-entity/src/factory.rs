//! Component factories.

use crate::component::{ComponentContext, ComponentInstance, ComponentType};
use exodius_core::ComponentError;

/// Builds component instances for an entity.
///
/// The entity calls the factory once per component type, after every
/// declared dependency of that type is resolved. The returned instance must
/// be of the concrete type `component` describes; the entity rejects
/// anything else. Errors abort assembly.
pub trait ComponentFactory: Send + Sync {
    /// Build an instance of `component`.
    fn create(
        &self,
        component: &ComponentType,
        ctx: &ComponentContext<'_>,
    ) -> Result<ComponentInstance, ComponentError>;
}

/// The default factory: runs each type's declared constructor,
/// [`Component::create`](crate::Component::create).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredFactory;

impl ComponentFactory for DeclaredFactory {
    fn create(
        &self,
        component: &ComponentType,
        ctx: &ComponentContext<'_>,
    ) -> Result<ComponentInstance, ComponentError> {
        component.construct(ctx)
    }
}
