//! Deferred initialization of lazy components.

use exodius_core::test_utils::{InMemoryEventBus, RecordingDriver};
use exodius_core::{ComponentError, Event, EventBus, Selector};
use exodius_entity::*;
use std::sync::Arc;

trait Widget: Send + Sync {}

/// Lazy component reachable as itself, `dyn Widget` and `dyn LazyComponent`.
struct Banner {
    bus: Arc<dyn EventBus>,
    initialized: usize,
}

impl Widget for Banner {}

impl LazyComponent for Banner {
    fn initialize(&mut self) -> Result<(), ComponentError> {
        self.initialized += 1;
        self.bus.publish(Event::signal("banner.ready"))?;
        Ok(())
    }
}

impl Component for Banner {
    fn declare(declaration: &mut Declaration<Self>) {
        declaration.provides::<dyn Widget>(|c| c, |c| c).lazy();
    }

    fn create(ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(Banner {
            bus: ctx.event_bus().clone(),
            initialized: 0,
        })
    }
}

/// Not lazy: never initialized.
struct Plain;

impl Component for Plain {
    fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(Plain)
    }
}

/// Lazy component whose element never shows up.
struct Modal;

impl LazyComponent for Modal {
    fn initialize(&mut self) -> Result<(), ComponentError> {
        Err(ComponentError::Initialization(format!(
            "{} never became visible",
            Selector::css(".modal")
        )))
    }
}

impl Component for Modal {
    fn declare(declaration: &mut Declaration<Self>) {
        declaration.lazy();
    }

    fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(Modal)
    }
}

fn entity(bus: Arc<InMemoryEventBus>) -> Entity {
    Entity::new(Arc::new(RecordingDriver::new()), bus)
}

#[test]
fn each_lazy_component_initializes_once_per_pass() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut entity = entity(bus.clone());
    entity.add_component::<Banner>().add_component::<Plain>();
    entity.assemble_graph().unwrap();

    assert_eq!(entity.get_component::<Banner>().unwrap().initialized, 0);
    entity.initialize_lazy_components().unwrap();

    // Banner has three capabilities but is one instance.
    assert_eq!(entity.get_component::<Banner>().unwrap().initialized, 1);
    assert_eq!(bus.published(), vec![Event::signal("banner.ready")]);
}

#[test]
fn lazy_pass_runs_again_when_called_again() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut entity = entity(bus);
    entity.add_component::<Banner>();
    entity.assemble_graph().unwrap();

    entity.initialize_lazy_components().unwrap();
    entity.initialize_lazy_components().unwrap();
    assert_eq!(entity.get_component::<Banner>().unwrap().initialized, 2);
}

#[test]
fn lazy_pass_on_entity_without_lazy_components() {
    let mut entity = entity(Arc::new(InMemoryEventBus::new()));
    entity.add_component::<Plain>();
    entity.assemble_graph().unwrap();
    entity.initialize_lazy_components().unwrap();
    assert!(!entity.has_component::<dyn LazyComponent>());
}

#[test]
fn failing_hook_is_reported_with_component_name() {
    let mut entity = entity(Arc::new(InMemoryEventBus::new()));
    entity.add_component::<Modal>();
    entity.assemble_graph().unwrap();

    let err = entity.initialize_lazy_components().unwrap_err();
    match &err {
        EntityError::Initialization { component, source } => {
            assert!(component.ends_with("Modal"));
            assert!(matches!(source, ComponentError::Initialization(_)));
        }
        other => panic!("expected Initialization, got {other:?}"),
    }
    assert!(err.to_string().contains("css=.modal never became visible"));
}

#[test]
fn failing_hook_stops_the_pass() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut entity = entity(bus.clone());
    // Modal is resolved first, so Banner never initializes.
    entity.add_component::<Modal>().add_component::<Banner>();
    entity.assemble_graph().unwrap();

    assert!(entity.initialize_lazy_components().is_err());
    assert_eq!(entity.get_component::<Banner>().unwrap().initialized, 0);
    assert!(bus.published().is_empty());
}
