//! Typed access to the settings store.
//!
//! The store itself only speaks strings; this wrapper applies parsing
//! and the application defaults. Unreadable values fall back to the
//! default rather than erroring - a stale or hand-edited store must
//! never break ingestion.

use std::sync::Arc;

use crate::ports::{keys, MapStyle, SettingsStore};

/// Default minimum magnitude for alert notifications.
const DEFAULT_NOTIFICATION_MIN_MAGNITUDE: f64 = 4.0;

/// Typed preference accessor over a `SettingsStore`.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn SettingsStore>,
}

impl Preferences {
    /// Wraps a settings store.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Whether the push channel reconnects automatically. Default true.
    pub fn auto_reconnect(&self) -> bool {
        self.bool_of(keys::AUTO_RECONNECT, true)
    }

    /// Persists the auto-reconnect toggle.
    pub fn set_auto_reconnect(&self, enabled: bool) {
        self.store
            .set(keys::AUTO_RECONNECT, if enabled { "true" } else { "false" });
    }

    /// Whether alert notifications are enabled. Default true.
    pub fn notifications_enabled(&self) -> bool {
        self.bool_of(keys::NOTIFICATIONS_ENABLED, true)
    }

    /// Minimum magnitude for alert notifications. Default 4.0.
    pub fn notification_min_magnitude(&self) -> f64 {
        self.store
            .get(keys::NOTIFICATIONS_MIN_MAGNITUDE)
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NOTIFICATION_MIN_MAGNITUDE)
    }

    /// Whether notification sound is enabled. Default true.
    pub fn notification_sound(&self) -> bool {
        self.bool_of(keys::NOTIFICATIONS_SOUND, true)
    }

    /// Preferred basemap style. Default streets.
    pub fn map_style(&self) -> MapStyle {
        self.store
            .get(keys::MAP_STYLE)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Persists the basemap style.
    pub fn set_map_style(&self, style: MapStyle) {
        self.store.set(keys::MAP_STYLE, style.as_str());
    }

    /// UI theme name. Default "light".
    pub fn theme(&self) -> String {
        self.store
            .get(keys::THEME)
            .unwrap_or_else(|| "light".to_string())
    }

    fn bool_of(&self, key: &str, default: bool) -> bool {
        match self.store.get(key) {
            Some(value) => value == "true",
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::settings::InMemorySettingsStore;

    fn preferences() -> (Arc<InMemorySettingsStore>, Preferences) {
        let store = Arc::new(InMemorySettingsStore::new());
        let prefs = Preferences::new(store.clone());
        (store, prefs)
    }

    #[test]
    fn defaults_apply_when_store_is_empty() {
        let (_, prefs) = preferences();

        assert!(prefs.auto_reconnect());
        assert!(prefs.notifications_enabled());
        assert_eq!(prefs.notification_min_magnitude(), 4.0);
        assert!(prefs.notification_sound());
        assert_eq!(prefs.map_style(), MapStyle::Streets);
        assert_eq!(prefs.theme(), "light");
    }

    #[test]
    fn stored_values_override_defaults() {
        let (store, prefs) = preferences();

        store.set(keys::AUTO_RECONNECT, "false");
        store.set(keys::NOTIFICATIONS_MIN_MAGNITUDE, "5.5");
        store.set(keys::MAP_STYLE, "satellite");

        assert!(!prefs.auto_reconnect());
        assert_eq!(prefs.notification_min_magnitude(), 5.5);
        assert_eq!(prefs.map_style(), MapStyle::Satellite);
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        let (store, prefs) = preferences();

        store.set(keys::NOTIFICATIONS_MIN_MAGNITUDE, "not-a-number");
        store.set(keys::MAP_STYLE, "not-a-style");

        assert_eq!(prefs.notification_min_magnitude(), 4.0);
        assert_eq!(prefs.map_style(), MapStyle::Streets);
    }

    #[test]
    fn setters_round_trip() {
        let (_, prefs) = preferences();

        prefs.set_auto_reconnect(false);
        assert!(!prefs.auto_reconnect());

        prefs.set_map_style(MapStyle::Hybrid);
        assert_eq!(prefs.map_style(), MapStyle::Hybrid);
    }
}
