//! Error types for each collaborator.

use thiserror::Error;

/// Driver errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matched the selector.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Navigating to a URL failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The element exists but the action could not be performed on it.
    #[error("action {action} failed on {selector}: {message}")]
    Action {
        /// The action that failed (click, fill, ...).
        action: String,
        /// The selector the action targeted.
        selector: String,
        /// Error message.
        message: String,
    },

    /// The driver gave up waiting.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Event bus errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    /// A subscriber failed while handling an event.
    #[error("handler failed on {topic}: {message}")]
    HandlerFailed {
        /// Topic of the event being handled.
        topic: String,
        /// Error message.
        message: String,
    },

    /// The subscription id is not known to the bus.
    #[error("unknown subscription: {0}")]
    UnknownSubscription(u64),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by a component while it is created or initialized.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ComponentError {
    /// A capability the component expected in its entity was not there.
    #[error("missing capability: {0}")]
    MissingCapability(String),

    /// Deferred initialization failed.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A driver error propagated through the component.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// An event bus error propagated through the component.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
