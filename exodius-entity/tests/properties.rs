//! Property tests: any acyclic graph, registered in any order, assembles
//! completely and in dependency order.

use exodius_core::test_utils::{InMemoryEventBus, RecordingDriver};
use exodius_core::ComponentError;
use exodius_entity::*;
use proptest::prelude::*;
use std::sync::Arc;

macro_rules! nodes {
    ($($name:ident),* $(,)?) => {
        $(
            struct $name;

            impl Component for $name {
                fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
                    Ok($name)
                }
            }
        )*

        fn node_types() -> Vec<ComponentType> {
            vec![$(ComponentType::of::<$name>()),*]
        }
    };
}

nodes!(N0, N1, N2, N3, N4, N5, N6, N7);

const NODES: usize = 8;

/// Edges `(from, to)` with `to < from`, so the graph is always acyclic.
fn edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((1..NODES, 0..NODES), 0..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(from, to)| (from, to % from))
            .collect()
    })
}

fn order() -> impl Strategy<Value = Vec<usize>> {
    Just((0..NODES).collect::<Vec<_>>()).prop_shuffle()
}

fn build(edges: &[(usize, usize)]) -> Vec<ComponentType> {
    let mut types = node_types();
    for &(from, to) in edges {
        let dependency = types[to].capability();
        types[from] = types[from].clone().with_dependency(dependency);
    }
    types
}

fn entity() -> Entity {
    Entity::new(
        Arc::new(RecordingDriver::new()),
        Arc::new(InMemoryEventBus::new()),
    )
}

proptest! {
    #[test]
    fn acyclic_graph_assembles_in_dependency_order(edges in edges(), order in order()) {
        let types = build(&edges);
        let mut entity = entity();
        for &index in &order {
            entity.add_component_type(types[index].clone());
        }

        prop_assert!(entity.assemble_graph().is_ok());
        prop_assert_eq!(entity.pending_components().count(), 0);
        prop_assert_eq!(entity.len(), NODES);

        let resolved: Vec<ComponentType> = entity.resolved_components().cloned().collect();
        let position = |t: &ComponentType| resolved.iter().position(|r| r == t);

        for t in &types {
            prop_assert_eq!(resolved.iter().filter(|r| *r == t).count(), 1);
        }
        for &(from, to) in &edges {
            prop_assert!(position(&types[to]) < position(&types[from]));
        }
    }

    #[test]
    fn reassembly_never_rebuilds(edges in edges(), order in order()) {
        let types = build(&edges);
        let mut entity = entity();
        for &index in &order {
            entity.add_component_type(types[index].clone());
        }
        entity.assemble_graph().unwrap();
        let before: Vec<&'static str> = entity
            .resolved_components()
            .map(ComponentType::name)
            .collect();

        for &index in &order {
            entity.add_component_type(types[index].clone());
        }
        prop_assert_eq!(entity.pending_components().count(), 0);
        entity.assemble_graph().unwrap();
        let after: Vec<&'static str> = entity
            .resolved_components()
            .map(ComponentType::name)
            .collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn back_edge_is_always_a_cycle(edges in edges(), order in order(), from in 1..NODES) {
        let mut types = build(&edges);
        // Close a loop: N0 requires `from`, and `from` requires N0.
        let back = types[from].capability();
        types[0] = types[0].clone().with_dependency(back);
        let forward = types[0].capability();
        types[from] = types[from].clone().with_dependency(forward);

        let mut entity = entity();
        for &index in &order {
            entity.add_component_type(types[index].clone());
        }
        let err = entity.assemble_graph().unwrap_err();
        let is_cycle = matches!(err, EntityError::CyclicDependency { .. });
        prop_assert!(is_cycle, "expected a cycle, got {:?}", err);
        prop_assert!(entity.pending_components().count() > 0);
    }
}
