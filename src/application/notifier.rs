//! Magnitude-gated alert delivery.
//!
//! The policy decides whether an event warrants an alert; presentation
//! (browser notification, toast, sound) belongs to the sink.

use std::sync::Arc;

use crate::application::Preferences;
use crate::domain::SeismicEvent;
use crate::ports::NotificationSink;

/// Gates the notification sink on the user's alert preferences.
pub struct NotificationPolicy {
    preferences: Preferences,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationPolicy {
    /// Creates a policy over the given sink.
    pub fn new(preferences: Preferences, sink: Arc<dyn NotificationSink>) -> Self {
        Self { preferences, sink }
    }

    /// Invokes the sink when notifications are enabled and the event
    /// magnitude meets the configured minimum.
    pub fn notify(&self, event: &Arc<SeismicEvent>) {
        if !self.preferences.notifications_enabled() {
            return;
        }
        if event.magnitude() < self.preferences.notification_min_magnitude() {
            return;
        }
        tracing::debug!(
            event_id = %event.id,
            sink = self.sink.name(),
            "delivering alert"
        );
        self.sink.notify(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::settings::InMemorySettingsStore;
    use crate::domain::Hypocenter;
    use crate::ports::{keys, SettingsStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink(AtomicUsize);

    impl NotificationSink for CountingSink {
        fn notify(&self, _event: &Arc<SeismicEvent>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "CountingSink"
        }
    }

    fn event(magnitude: f64) -> Arc<SeismicEvent> {
        Arc::new(SeismicEvent {
            id: "a".to_string(),
            time: "2026/08/06 12:00:00".to_string(),
            hypocenter: Hypocenter {
                name: "Test".to_string(),
                latitude: Some(35.0),
                longitude: Some(139.0),
                magnitude: Some(magnitude),
                depth: Some(10.0),
            },
            max_scale: None,
            tsunami: false,
            areas: vec![],
        })
    }

    fn policy_with_store() -> (Arc<InMemorySettingsStore>, Arc<CountingSink>, NotificationPolicy) {
        let store = Arc::new(InMemorySettingsStore::new());
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let policy = NotificationPolicy::new(Preferences::new(store.clone()), sink.clone());
        (store, sink, policy)
    }

    #[test]
    fn alerts_at_or_above_default_minimum() {
        let (_, sink, policy) = policy_with_store();

        policy.notify(&event(4.0));
        policy.notify(&event(6.1));

        assert_eq!(sink.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn no_alert_below_minimum() {
        let (_, sink, policy) = policy_with_store();

        policy.notify(&event(3.9));

        assert_eq!(sink.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn disabled_notifications_suppress_all_alerts() {
        let (store, sink, policy) = policy_with_store();
        store.set(keys::NOTIFICATIONS_ENABLED, "false");

        policy.notify(&event(7.0));

        assert_eq!(sink.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn configured_minimum_overrides_default() {
        let (store, sink, policy) = policy_with_store();
        store.set(keys::NOTIFICATIONS_MIN_MAGNITUDE, "6.0");

        policy.notify(&event(5.0));
        policy.notify(&event(6.0));

        assert_eq!(sink.0.load(Ordering::SeqCst), 1);
    }
}
