//! Typed event bus with synchronous, ordered fan-out.
//!
//! Two subscriber registries: domain events and connection status.
//! Delivery is synchronous - no suspension occurs between a publish
//! call and all its listeners completing, so cross-listener ordering
//! is deterministic. A failing listener is logged and isolated; it
//! never prevents the remaining listeners or reaches the publisher.
//!
//! Publish iterates a snapshot of the registry taken at publish time,
//! so a listener that subscribes or unsubscribes mid-publish cannot
//! corrupt iteration.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::{ConnectionState, SeismicEvent};

/// Handle returned from `subscribe`, enabling deterministic removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned by a failing listener.
///
/// Listener failures are isolated and logged by the bus; they are
/// never propagated to the publisher.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    /// Creates a listener error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A subscriber on one of the bus registries.
///
/// Implementations should be quick: they run synchronously on the
/// ingestion path.
pub trait Listener<T>: Send + Sync {
    /// Processes one published value.
    fn on_event(&self, value: &T) -> Result<(), ListenerError>;

    /// Listener name for log labels.
    fn name(&self) -> &'static str {
        "listener"
    }
}

// Closures subscribe without boilerplate.
impl<T, F> Listener<T> for F
where
    F: Fn(&T) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, value: &T) -> Result<(), ListenerError> {
        self(value)
    }
}

/// One ordered registry of listeners for a single payload type.
struct Registry<T> {
    entries: Mutex<Vec<(SubscriptionId, Arc<dyn Listener<T>>)>>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self, listener: Arc<dyn Listener<T>>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.entries
            .lock()
            .expect("bus registry lock poisoned")
            .push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.lock().expect("bus registry lock poisoned");
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    fn publish(&self, value: &T) {
        // Snapshot under the lock, invoke outside it: listeners may
        // subscribe or unsubscribe while the publish is in flight.
        let snapshot: Vec<(SubscriptionId, Arc<dyn Listener<T>>)> = self
            .entries
            .lock()
            .expect("bus registry lock poisoned")
            .clone();

        for (id, listener) in snapshot {
            if let Err(error) = listener.on_event(value) {
                tracing::warn!(
                    listener = listener.name(),
                    subscription = %id,
                    %error,
                    "listener failed; continuing fan-out"
                );
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().expect("bus registry lock poisoned").len()
    }
}

/// Event bus instance owned by one application context.
///
/// No ambient globals: every monitor owns its bus.
pub struct EventBus {
    events: Registry<Arc<SeismicEvent>>,
    status: Registry<ConnectionState>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            events: Registry::new(),
            status: Registry::new(),
        }
    }

    /// Subscribes to domain events. Invocation order equals
    /// registration order.
    pub fn on_event(&self, listener: Arc<dyn Listener<Arc<SeismicEvent>>>) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Subscribes to connection status changes.
    pub fn on_status(&self, listener: Arc<dyn Listener<ConnectionState>>) -> SubscriptionId {
        self.status.subscribe(listener)
    }

    /// Removes a domain-event subscription. Returns false if the
    /// handle was not registered.
    pub fn off_event(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Removes a status subscription.
    pub fn off_status(&self, id: SubscriptionId) -> bool {
        self.status.unsubscribe(id)
    }

    /// Fans a domain event out to all current subscribers, in order.
    pub fn publish_event(&self, event: &Arc<SeismicEvent>) {
        self.events.publish(event);
    }

    /// Fans a status change out to all current subscribers, in order.
    pub fn publish_status(&self, state: ConnectionState) {
        self.status.publish(&state);
    }

    /// Number of domain-event subscribers.
    pub fn event_listener_count(&self) -> usize {
        self.events.len()
    }

    /// Number of status subscribers.
    pub fn status_listener_count(&self) -> usize {
        self.status.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Hypocenter;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(id: &str) -> Arc<SeismicEvent> {
        Arc::new(SeismicEvent {
            id: id.to_string(),
            time: "2026/08/06 12:00:00".to_string(),
            hypocenter: Hypocenter {
                name: "Test".to_string(),
                latitude: Some(35.0),
                longitude: Some(139.0),
                magnitude: Some(4.0),
                depth: Some(10.0),
            },
            max_scale: None,
            tsunami: false,
            areas: vec![],
        })
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
                log.lock().unwrap().push(tag);
                Ok::<(), ListenerError>(())
            }));
        }

        bus.publish_event(&event("a"));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_listener_does_not_stop_fanout() {
        let bus = EventBus::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&delivered);
        bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), ListenerError>(())
        }));
        bus.on_event(Arc::new(|_: &Arc<SeismicEvent>| {
            Err(ListenerError::new("boom"))
        }));
        let counter = Arc::clone(&delivered);
        bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), ListenerError>(())
        }));

        // Publish must not fail despite the middle listener erroring.
        bus.publish_event(&event("a"));
        assert_eq!(delivered.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&delivered);
        let id = bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), ListenerError>(())
        }));

        bus.publish_event(&event("a"));
        assert!(bus.off_event(id));
        bus.publish_event(&event("b"));

        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert!(!bus.off_event(id), "second removal should be a no-op");
    }

    #[test]
    fn unsubscribing_during_publish_does_not_corrupt_iteration() {
        let bus = Arc::new(EventBus::new());
        let delivered = Arc::new(AtomicUsize::new(0));

        // The first listener removes the second mid-publish; the
        // snapshot taken at publish time still delivers to it.
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let bus_ref = Arc::clone(&bus);
        let slot_ref = Arc::clone(&slot);
        bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
            if let Some(id) = slot_ref.lock().unwrap().take() {
                bus_ref.off_event(id);
            }
            Ok::<(), ListenerError>(())
        }));

        let counter = Arc::clone(&delivered);
        let second = bus.on_event(Arc::new(move |_: &Arc<SeismicEvent>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), ListenerError>(())
        }));
        *slot.lock().unwrap() = Some(second);

        bus.publish_event(&event("a"));
        assert_eq!(delivered.load(Ordering::SeqCst), 1);

        // Next publish sees the mutated registry.
        bus.publish_event(&event("b"));
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_listener_count(), 1);
    }

    #[test]
    fn status_registry_is_independent() {
        let bus = EventBus::new();
        let statuses = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&statuses);
        bus.on_status(Arc::new(move |state: &ConnectionState| {
            log.lock().unwrap().push(*state);
            Ok::<(), ListenerError>(())
        }));

        bus.publish_status(ConnectionState::Connecting);
        bus.publish_status(ConnectionState::Connected);
        bus.publish_event(&event("a"));

        assert_eq!(
            *statuses.lock().unwrap(),
            vec![ConnectionState::Connecting, ConnectionState::Connected]
        );
        assert_eq!(bus.status_listener_count(), 1);
        assert_eq!(bus.event_listener_count(), 0);
    }
}
