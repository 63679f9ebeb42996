//! Magnitude bucketing and marker visual encoding.
//!
//! Magnitudes are discretized into integer buckets 0..=9 that select a
//! fixed marker size. Magnitudes at or above 9 share the top bucket;
//! negative or missing magnitudes fall into bucket 0.

use crate::domain::severity::Intensity;
use crate::domain::SeismicEvent;

/// Pixel dimensions of a rendered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSize {
    /// Marker diameter in pixels.
    pub diameter: u32,

    /// Border width in pixels.
    pub border: u32,
}

/// Bucket to marker size, indexed by bucket.
const SIZE_TABLE: [MarkerSize; 10] = [
    MarkerSize { diameter: 10, border: 1 },
    MarkerSize { diameter: 12, border: 1 },
    MarkerSize { diameter: 14, border: 1 },
    MarkerSize { diameter: 16, border: 1 },
    MarkerSize { diameter: 20, border: 2 },
    MarkerSize { diameter: 25, border: 2 },
    MarkerSize { diameter: 30, border: 2 },
    MarkerSize { diameter: 35, border: 3 },
    MarkerSize { diameter: 40, border: 3 },
    MarkerSize { diameter: 45, border: 3 },
];

/// Floors a magnitude to its visual bucket, clamped to 0..=9.
pub fn magnitude_bucket(magnitude: f64) -> usize {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return 0;
    }
    (magnitude.floor() as usize).min(9)
}

/// A visual marker derived from one event, keyed by the event id.
///
/// Markers exist 1:1 with displayed events; the synchronizer destroys
/// them on removal or surface reset, independent of store eviction.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Identity of the event this marker represents.
    pub event_id: String,

    /// Latitude in degrees (always finite).
    pub latitude: f64,

    /// Longitude in degrees (always finite).
    pub longitude: f64,

    /// Magnitude displayed inside the marker.
    pub magnitude: f64,

    /// Size selected by the magnitude bucket.
    pub size: MarkerSize,

    /// Resolved intensity for coloring and popups.
    pub intensity: Intensity,
}

impl Marker {
    /// Derives a marker from an event, or `None` when the event has no
    /// usable coordinates.
    pub fn from_event(event: &SeismicEvent) -> Option<Self> {
        let (latitude, longitude) = event.coordinates()?;
        let magnitude = event.magnitude();
        Some(Self {
            event_id: event.id.clone(),
            latitude,
            longitude,
            magnitude,
            size: SIZE_TABLE[magnitude_bucket(magnitude)],
            intensity: Intensity::resolve(event.max_scale),
        })
    }
}
