//! Assembly and query errors.

use exodius_core::ComponentError;
use thiserror::Error;

/// Errors raised while assembling or querying an [`Entity`](crate::Entity).
///
/// Every variant names the types involved so a failing page definition can
/// be diagnosed from the message alone.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EntityError {
    /// A component type depends on itself, directly or transitively.
    #[error("cyclic dependency detected: {}", .chain.join(" -> "))]
    CyclicDependency {
        /// The resolution chain, ending with the type that closed the cycle.
        chain: Vec<String>,
    },

    /// No pending or resolved component provides a declared dependency.
    #[error("no component found to satisfy dependency {dependency} (required by {required_by})")]
    MissingDependency {
        /// The capability nothing provides.
        dependency: String,
        /// The component that declared it.
        required_by: String,
    },

    /// Several pending components provide a declared dependency.
    #[error(
        "multiple components found for dependency {dependency} (required by {required_by}): {}",
        .candidates.join(", ")
    )]
    AmbiguousDependency {
        /// The capability with more than one provider.
        dependency: String,
        /// The component that declared it.
        required_by: String,
        /// The pending types that all provide it.
        candidates: Vec<String>,
    },

    /// No resolved component provides the requested capability.
    #[error("{capability} does not exist in the entity")]
    NotFound {
        /// The requested capability.
        capability: String,
    },

    /// More than one resolved component provides the requested capability.
    #[error("multiple components ({count}) found for {capability}, use get_components instead")]
    AmbiguousResult {
        /// The requested capability.
        capability: String,
        /// How many resolved components provide it.
        count: usize,
    },

    /// The factory failed to construct a component.
    #[error("failed to construct {component}: {source}")]
    Construction {
        /// The component being constructed.
        component: String,
        /// The factory's error.
        source: ComponentError,
    },

    /// The factory returned an instance of a different concrete type.
    #[error("factory returned an instance that is not a {component}")]
    UnexpectedInstance {
        /// The component that was requested.
        component: String,
    },

    /// A lazy component's initialization hook failed.
    #[error("failed to initialize {component}: {source}")]
    Initialization {
        /// The component being initialized.
        component: String,
        /// The hook's error.
        source: ComponentError,
    },
}
