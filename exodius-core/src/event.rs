//! Publish/subscribe between the components of a page.

use crate::error::EventError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A notification published on an [`EventBus`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Topic subscribers filter on.
    pub topic: String,
    /// Arbitrary payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Event {
    /// Create an event with a payload.
    pub fn new(topic: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }

    /// Create an event with a null payload.
    pub fn signal(topic: impl Into<String>) -> Self {
        Self::new(topic, serde_json::Value::Null)
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Receives events for the topics it subscribed to.
pub trait EventHandler: Send + Sync {
    /// Handle one event.
    fn handle(&self, event: &Event) -> Result<(), EventError>;
}

/// A publish/subscribe channel shared by all components of an entity.
pub trait EventBus: Send + Sync {
    /// Deliver `event` to every handler subscribed to its topic.
    fn publish(&self, event: Event) -> Result<(), EventError>;

    /// Register `handler` for `topic`.
    fn subscribe(
        &self,
        topic: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Result<SubscriptionId, EventError>;

    /// Remove a subscription.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EventError>;
}
