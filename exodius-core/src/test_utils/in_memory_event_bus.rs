//! Synchronous Vec-backed event bus for tests.

use crate::error::EventError;
use crate::event::{Event, EventBus, EventHandler, SubscriptionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct Subscription {
    id: SubscriptionId,
    topic: String,
    handler: Arc<dyn EventHandler>,
}

/// In-process event bus that records every published event.
///
/// Handlers run synchronously on the publishing thread, in subscription
/// order. The first handler error stops delivery and is returned to the
/// publisher. Use `.published()` to inspect what was sent.
pub struct InMemoryEventBus {
    subscriptions: Mutex<Vec<Subscription>>,
    published: Mutex<Vec<Event>>,
    next_id: AtomicU64,
}

impl InMemoryEventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Return a snapshot of all published events.
    pub fn published(&self) -> Vec<Event> {
        self.published.lock().unwrap().clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, event: Event) -> Result<(), EventError> {
        self.published.lock().unwrap().push(event.clone());
        // Snapshot so handlers may subscribe or publish without deadlocking.
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.topic == event.topic)
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler.handle(&event)?;
        }
        Ok(())
    }

    fn subscribe(
        &self,
        topic: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Result<SubscriptionId, EventError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.lock().unwrap().push(Subscription {
            id,
            topic: topic.to_string(),
            handler,
        });
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EventError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        if subscriptions.len() == before {
            return Err(EventError::UnknownSubscription(id.0));
        }
        Ok(())
    }
}
