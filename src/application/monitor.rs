//! Monitor facade - wires the engine together.
//!
//! Owns the event bus, the bounded store, the map synchronizer, the
//! notification policy and the connection manager, and exposes the
//! interface the dashboard shell consumes.
//!
//! # Event Flow
//!
//! ```text
//! push channel -> ConnectionManager decodes
//!        |
//!        v
//! EventBus.publish(domain event)
//!        |
//!        +-> BoundedEventStore.prepend
//!        +-> MapSynchronizer.upsert
//!        +-> NotificationPolicy.notify
//!        +-> external subscribers (registration order)
//! ```
//!
//! Historical searches bypass this flow entirely and return transient
//! results; only `load_recent` replaces the live working set.

use std::sync::{Arc, Mutex};

use crate::application::{
    ConnectionManager, EventBus, Listener, MapSynchronizer, NotificationPolicy, Preferences,
    ReconnectPolicy, SubscriptionId,
};
use crate::domain::{BoundedEventStore, ConnectionState, SeismicEvent};
use crate::ports::{
    HistoryFilters, HistoryQuery, MarkerSurface, NotificationSink, PushChannel, QueryError,
    SettingsStore, UnknownMapStyle,
};

/// Injected collaborators for a monitor instance.
pub struct MonitorDeps {
    /// Real-time push transport.
    pub channel: Arc<dyn PushChannel>,

    /// Historical lookup client.
    pub history: Arc<dyn HistoryQuery>,

    /// Preference persistence.
    pub settings: Arc<dyn SettingsStore>,

    /// Alert delivery.
    pub notifications: Arc<dyn NotificationSink>,

    /// Map rendering surface.
    pub surface: Arc<dyn MarkerSurface>,
}

/// Live seismic dashboard engine.
pub struct SeismicMonitor {
    bus: Arc<EventBus>,
    store: Arc<Mutex<BoundedEventStore>>,
    map: Arc<MapSynchronizer>,
    connection: ConnectionManager,
    history: Arc<dyn HistoryQuery>,
    preferences: Preferences,
}

impl SeismicMonitor {
    /// Creates a monitor with the default working-set capacity and
    /// reconnect policy.
    pub fn new(deps: MonitorDeps) -> Self {
        Self::with_options(deps, crate::domain::DEFAULT_CAPACITY, ReconnectPolicy::default())
    }

    /// Creates a monitor with explicit capacity and reconnect policy.
    pub fn with_options(deps: MonitorDeps, capacity: usize, policy: ReconnectPolicy) -> Self {
        let bus = Arc::new(EventBus::new());
        let store = Arc::new(Mutex::new(BoundedEventStore::new(capacity)));
        let map = Arc::new(MapSynchronizer::new(deps.surface));
        let preferences = Preferences::new(deps.settings);
        let notifier = Arc::new(NotificationPolicy::new(
            preferences.clone(),
            deps.notifications,
        ));

        // Internal pipeline subscribers run before any external
        // subscriber: store first, then map, then alerts.
        let store_ref = Arc::clone(&store);
        bus.on_event(Arc::new(named(
            "store.prepend",
            move |event: &Arc<SeismicEvent>| {
                store_ref
                    .lock()
                    .expect("event store lock poisoned")
                    .prepend(Arc::clone(event));
                Ok(())
            },
        )));

        let map_ref = Arc::clone(&map);
        bus.on_event(Arc::new(named(
            "map.upsert",
            move |event: &Arc<SeismicEvent>| {
                map_ref.upsert(event);
                Ok(())
            },
        )));

        bus.on_event(Arc::new(named(
            "alerts.notify",
            move |event: &Arc<SeismicEvent>| {
                notifier.notify(event);
                Ok(())
            },
        )));

        let connection = ConnectionManager::new(
            deps.channel,
            Arc::clone(&bus),
            preferences.clone(),
            policy,
        );

        Self {
            bus,
            store,
            map,
            connection,
            history: deps.history,
            preferences,
        }
    }

    // === Subscriptions ===

    /// Subscribes to domain events; delivered after the internal
    /// pipeline has updated the store and map.
    pub fn on_event(&self, listener: Arc<dyn Listener<Arc<SeismicEvent>>>) -> SubscriptionId {
        self.bus.on_event(listener)
    }

    /// Subscribes to connection status changes.
    pub fn on_status(&self, listener: Arc<dyn Listener<ConnectionState>>) -> SubscriptionId {
        self.bus.on_status(listener)
    }

    /// Removes a domain-event subscription.
    pub fn off_event(&self, id: SubscriptionId) -> bool {
        self.bus.off_event(id)
    }

    /// Removes a status subscription.
    pub fn off_status(&self, id: SubscriptionId) -> bool {
        self.bus.off_status(id)
    }

    // === Connection lifecycle ===

    /// Opens the push channel. No-op while already open or pending.
    pub fn connect(&self) {
        self.connection.connect();
    }

    /// Closes the push channel and cancels any pending reconnect.
    pub async fn disconnect(&self) {
        self.connection.disconnect().await;
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    // === Read accessors ===

    /// Snapshot of the live working set, newest first.
    pub fn events(&self) -> Vec<Arc<SeismicEvent>> {
        self.store
            .lock()
            .expect("event store lock poisoned")
            .snapshot()
    }

    /// Looks up a live event by id.
    pub fn event(&self, id: &str) -> Option<Arc<SeismicEvent>> {
        self.store.lock().expect("event store lock poisoned").find(id)
    }

    /// Number of markers currently on the surface.
    pub fn marker_count(&self) -> usize {
        self.map.marker_count()
    }

    // === Historical queries ===

    /// Replaces the live working set with the most recent events and
    /// rebuilds the map surface.
    pub async fn load_recent(&self) -> Result<usize, QueryError> {
        let capacity = self
            .store
            .lock()
            .expect("event store lock poisoned")
            .capacity();
        let events = self.history.recent(capacity).await?;
        let events: Vec<Arc<SeismicEvent>> = events.into_iter().map(Arc::new).collect();
        let count = events.len();

        self.map.clear_all();
        for event in &events {
            self.map.upsert(event);
        }
        self.store
            .lock()
            .expect("event store lock poisoned")
            .replace_all(events);

        tracing::info!(count, "recent events loaded");
        Ok(count)
    }

    /// Runs a historical search. The result is transient: it is
    /// returned to the caller and never written to the live store.
    pub async fn search(&self, filters: &HistoryFilters) -> Result<Vec<SeismicEvent>, QueryError> {
        self.history.search(filters).await
    }

    // === Map surface ===

    /// Re-centers the map on an event's marker and opens its popup.
    /// No-op when no marker exists for the id.
    pub fn focus(&self, event_id: &str) {
        self.map.focus(event_id);
    }

    /// Parses and applies a basemap style, persisting the preference.
    pub fn set_map_style(&self, name: &str) -> Result<(), UnknownMapStyle> {
        let style = name.parse()?;
        self.preferences.set_map_style(style);
        self.map.restyle(style);
        Ok(())
    }
}

/// Wraps a closure with a stable name for bus log labels.
fn named<T, F>(name: &'static str, f: F) -> impl Listener<T>
where
    T: Send + Sync,
    F: Fn(&T) -> Result<(), crate::application::ListenerError> + Send + Sync,
{
    struct Named<F> {
        name: &'static str,
        f: F,
    }

    impl<T, F> Listener<T> for Named<F>
    where
        T: Send + Sync,
        F: Fn(&T) -> Result<(), crate::application::ListenerError> + Send + Sync,
    {
        fn on_event(&self, value: &T) -> Result<(), crate::application::ListenerError> {
            (self.f)(value)
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    Named { name, f }
}
