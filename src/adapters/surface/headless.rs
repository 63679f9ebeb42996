//! Headless marker surface.
//!
//! Mirrors the marker set in memory and records every command for
//! assertions, tracing each operation. Serves tests and environments
//! without a rendering surface; UI embedders implement `MarkerSurface`
//! against their map widget instead.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::Marker;
use crate::ports::{MapStyle, MarkerSurface};

/// One recorded surface command.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// A marker was created or replaced.
    Place { event_id: String },

    /// A marker was removed.
    Remove { event_id: String },

    /// All markers were removed.
    Clear,

    /// The view was centered on a marker.
    Focus { event_id: String, zoom: u8 },

    /// The basemap style changed.
    Style(MapStyle),
}

/// Recording surface without a rendering backend.
pub struct HeadlessSurface {
    markers: RwLock<HashMap<String, Marker>>,
    operations: RwLock<Vec<SurfaceOp>>,
    style: RwLock<MapStyle>,
}

impl HeadlessSurface {
    /// Creates an empty surface with the default style.
    pub fn new() -> Self {
        Self {
            markers: RwLock::new(HashMap::new()),
            operations: RwLock::new(Vec::new()),
            style: RwLock::new(MapStyle::default()),
        }
    }

    /// Number of markers currently placed.
    pub fn marker_count(&self) -> usize {
        self.markers.read().expect("surface lock poisoned").len()
    }

    /// The placed marker for an event id, if any.
    pub fn marker(&self, event_id: &str) -> Option<Marker> {
        self.markers
            .read()
            .expect("surface lock poisoned")
            .get(event_id)
            .cloned()
    }

    /// Every command received, in order.
    pub fn operations(&self) -> Vec<SurfaceOp> {
        self.operations
            .read()
            .expect("surface lock poisoned")
            .clone()
    }

    /// The active basemap style.
    pub fn current_style(&self) -> MapStyle {
        *self.style.read().expect("surface lock poisoned")
    }

    fn record(&self, op: SurfaceOp) {
        self.operations
            .write()
            .expect("surface lock poisoned")
            .push(op);
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerSurface for HeadlessSurface {
    fn place_marker(&self, marker: &Marker) {
        tracing::debug!(
            event_id = %marker.event_id,
            magnitude = marker.magnitude,
            intensity = marker.intensity.label,
            "marker placed"
        );
        self.markers
            .write()
            .expect("surface lock poisoned")
            .insert(marker.event_id.clone(), marker.clone());
        self.record(SurfaceOp::Place {
            event_id: marker.event_id.clone(),
        });
    }

    fn remove_marker(&self, event_id: &str) {
        self.markers
            .write()
            .expect("surface lock poisoned")
            .remove(event_id);
        self.record(SurfaceOp::Remove {
            event_id: event_id.to_string(),
        });
    }

    fn clear_markers(&self) {
        self.markers.write().expect("surface lock poisoned").clear();
        self.record(SurfaceOp::Clear);
    }

    fn focus_marker(&self, marker: &Marker, zoom: u8) {
        tracing::debug!(
            event_id = %marker.event_id,
            latitude = marker.latitude,
            longitude = marker.longitude,
            zoom,
            "view centered on marker"
        );
        self.record(SurfaceOp::Focus {
            event_id: marker.event_id.clone(),
            zoom,
        });
    }

    fn set_tile_style(&self, style: MapStyle) {
        *self.style.write().expect("surface lock poisoned") = style;
        self.record(SurfaceOp::Style(style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hypocenter, SeismicEvent};

    fn marker(id: &str) -> Marker {
        Marker::from_event(&SeismicEvent {
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
        .unwrap()
    }

    #[test]
    fn place_and_remove_track_markers() {
        let surface = HeadlessSurface::new();

        surface.place_marker(&marker("a"));
        assert_eq!(surface.marker_count(), 1);

        surface.remove_marker("a");
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn operations_are_recorded_in_order() {
        let surface = HeadlessSurface::new();

        surface.place_marker(&marker("a"));
        surface.set_tile_style(MapStyle::Hybrid);
        surface.clear_markers();

        assert_eq!(
            surface.operations(),
            vec![
                SurfaceOp::Place { event_id: "a".to_string() },
                SurfaceOp::Style(MapStyle::Hybrid),
                SurfaceOp::Clear,
            ]
        );
    }

    #[test]
    fn style_defaults_to_streets() {
        let surface = HeadlessSurface::new();
        assert_eq!(surface.current_style(), MapStyle::Streets);
    }
}
