//! # Record Change Subscriptions
//!
//! Views register interest in record changes with
//! [`EventBus::subscribe`], giving an event type, a predicate over the
//! event and a callback. The returned [`Subscription`] unregisters itself
//! when dropped, so a view that is torn down cannot leave a listener
//! behind.
//!
//! Callbacks run on the publishing thread after the registry lock is
//! released; a callback may subscribe or unsubscribe without deadlocking.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event type published after a record is inserted or saved.
pub const DOC_UPDATE: &str = "doc_update";

/// A record change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocEvent {
    pub doctype: String,
    pub name: String,
    /// Selected fields of the changed record.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl DocEvent {
    pub fn new(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Attach a field value.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// A string field of the record.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

type Predicate = Arc<dyn Fn(&DocEvent) -> bool + Send + Sync>;
type Callback = Arc<dyn Fn(&DocEvent) + Send + Sync>;

struct Entry {
    id: u64,
    event_type: String,
    predicate: Predicate,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Publish/subscribe hub for record change events.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `event_type` accepted by `predicate`.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<P, C>(&self, event_type: &str, predicate: P, callback: C) -> Subscription
    where
        P: Fn(&DocEvent) -> bool + Send + Sync + 'static,
        C: Fn(&DocEvent) + Send + Sync + 'static,
    {
        let mut reg = self.registry.lock();
        reg.next_id += 1;
        let id = reg.next_id;
        reg.entries.push(Entry {
            id,
            event_type: event_type.to_string(),
            predicate: Arc::new(predicate),
            callback: Arc::new(callback),
        });
        tracing::debug!(id, event_type, "subscribed");
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to matching subscribers. Returns how many ran.
    pub fn publish(&self, event_type: &str, event: &DocEvent) -> usize {
        let matching: Vec<(Predicate, Callback)> = {
            let reg = self.registry.lock();
            reg.entries
                .iter()
                .filter(|e| e.event_type == event_type)
                .map(|e| (Arc::clone(&e.predicate), Arc::clone(&e.callback)))
                .collect()
        };
        let mut delivered = 0;
        for (predicate, callback) in matching {
            if predicate(event) {
                callback(event);
                delivered += 1;
            }
        }
        tracing::debug!(
            event_type,
            doctype = %event.doctype,
            name = %event.name,
            delivered,
            "event published"
        );
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().entries.len()
    }
}

/// Live registration. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().entries.retain(|e| e.id != self.id);
            tracing::debug!(id = self.id, "unsubscribed");
        }
    }
}
