//! Keyed marker reconciliation onto the map surface.
//!
//! Markers are created, replaced and removed incrementally by event id
//! rather than rebuilding the surface on every change. The registry
//! here is the source of truth for which markers exist; the surface
//! only renders what it is told.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{Marker, SeismicEvent};
use crate::ports::{MapStyle, MarkerSurface};

/// Zoom level applied when focusing a single marker.
pub const FOCUS_ZOOM: u8 = 8;

/// Reconciles seismic events onto a `MarkerSurface`.
pub struct MapSynchronizer {
    surface: Arc<dyn MarkerSurface>,
    markers: Mutex<HashMap<String, Marker>>,
}

impl MapSynchronizer {
    /// Creates a synchronizer over the given surface.
    pub fn new(surface: Arc<dyn MarkerSurface>) -> Self {
        Self {
            surface,
            markers: Mutex::new(HashMap::new()),
        }
    }

    /// Creates or replaces the marker for `event`.
    ///
    /// Events without usable coordinates are skipped: no marker is
    /// created and the registry is unchanged. Duplicate markers per id
    /// are never created - an existing marker is replaced in place.
    pub fn upsert(&self, event: &SeismicEvent) {
        let Some(marker) = Marker::from_event(event) else {
            tracing::debug!(event_id = %event.id, "event has no coordinates; marker skipped");
            return;
        };

        self.markers
            .lock()
            .expect("marker registry lock poisoned")
            .insert(marker.event_id.clone(), marker.clone());
        self.surface.place_marker(&marker);
    }

    /// Removes the marker for `event_id`, if present.
    pub fn remove(&self, event_id: &str) {
        let removed = self
            .markers
            .lock()
            .expect("marker registry lock poisoned")
            .remove(event_id)
            .is_some();
        if removed {
            self.surface.remove_marker(event_id);
        }
    }

    /// Removes every marker and empties the registry.
    pub fn clear_all(&self) {
        self.markers
            .lock()
            .expect("marker registry lock poisoned")
            .clear();
        self.surface.clear_markers();
    }

    /// Re-centers the view on the marker for `event_id` and opens its
    /// popup. No-op when the id is absent.
    pub fn focus(&self, event_id: &str) {
        let marker = self
            .markers
            .lock()
            .expect("marker registry lock poisoned")
            .get(event_id)
            .cloned();
        if let Some(marker) = marker {
            self.surface.focus_marker(&marker, FOCUS_ZOOM);
        }
    }

    /// Swaps the basemap style. Markers are untouched.
    pub fn restyle(&self, style: MapStyle) {
        self.surface.set_tile_style(style);
    }

    /// Number of live markers.
    pub fn marker_count(&self) -> usize {
        self.markers
            .lock()
            .expect("marker registry lock poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::surface::{HeadlessSurface, SurfaceOp};
    use crate::domain::Hypocenter;

    fn event(id: &str, latitude: Option<f64>, magnitude: f64) -> SeismicEvent {
        SeismicEvent {
            id: id.to_string(),
            time: "2026/08/06 12:00:00".to_string(),
            hypocenter: Hypocenter {
                name: "Test".to_string(),
                latitude,
                longitude: Some(139.0),
                magnitude: Some(magnitude),
                depth: Some(10.0),
            },
            max_scale: Some(45),
            tsunami: false,
            areas: vec![],
        }
    }

    fn synchronizer() -> (Arc<HeadlessSurface>, MapSynchronizer) {
        let surface = Arc::new(HeadlessSurface::new());
        let sync = MapSynchronizer::new(surface.clone());
        (surface, sync)
    }

    #[test]
    fn upsert_creates_marker() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 5.2));

        assert_eq!(sync.marker_count(), 1);
        assert_eq!(surface.marker_count(), 1);
    }

    #[test]
    fn upsert_without_latitude_creates_no_marker() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", None, 5.2));

        assert_eq!(sync.marker_count(), 0);
        assert_eq!(surface.marker_count(), 0);
        assert!(surface.operations().is_empty());
    }

    #[test]
    fn upsert_same_id_replaces_in_place() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 4.0));
        sync.upsert(&event("a", Some(36.0), 6.0));

        assert_eq!(sync.marker_count(), 1);
        assert_eq!(surface.marker_count(), 1);
        let placed = surface.marker("a").unwrap();
        assert_eq!(placed.latitude, 36.0);
        assert_eq!(placed.size.diameter, 30);
    }

    #[test]
    fn clear_all_empties_registry_and_surface() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 4.0));
        sync.upsert(&event("b", Some(36.0), 5.0));

        sync.clear_all();

        assert_eq!(sync.marker_count(), 0);
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn remove_deletes_only_known_markers() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 4.0));

        sync.remove("missing");
        assert_eq!(sync.marker_count(), 1);

        sync.remove("a");
        assert_eq!(sync.marker_count(), 0);
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn focus_centers_on_known_marker() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 4.0));

        sync.focus("a");

        let ops = surface.operations();
        assert!(matches!(
            ops.last(),
            Some(SurfaceOp::Focus { event_id, zoom }) if event_id == "a" && *zoom == FOCUS_ZOOM
        ));
    }

    #[test]
    fn focus_on_unknown_id_is_noop() {
        let (surface, sync) = synchronizer();
        sync.focus("missing");
        assert!(surface.operations().is_empty());
    }

    #[test]
    fn restyle_leaves_markers_untouched() {
        let (surface, sync) = synchronizer();
        sync.upsert(&event("a", Some(35.0), 4.0));

        sync.restyle(MapStyle::Satellite);

        assert_eq!(sync.marker_count(), 1);
        assert_eq!(surface.marker_count(), 1);
        assert_eq!(surface.current_style(), MapStyle::Satellite);
    }
}
