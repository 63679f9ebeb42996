//! Seismic event value objects.
//!
//! A `SeismicEvent` is created on receipt (push or pull) and never
//! mutated afterwards; consumers share it as `Arc<SeismicEvent>`.
//! Identity is the externally assigned `id` string.

use serde::{Deserialize, Serialize};

/// A single seismic event as delivered by the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    /// Externally assigned unique identifier.
    pub id: String,

    /// Occurrence time, verbatim as delivered by the feed.
    pub time: String,

    /// Hypocenter details.
    pub hypocenter: Hypocenter,

    /// Raw maximum severity code (e.g. 45 for intensity "5-").
    /// `None` when the feed did not report one.
    pub max_scale: Option<i32>,

    /// Whether a tsunami warning accompanies this event.
    pub tsunami: bool,

    /// Affected areas in the order reported by the feed.
    pub areas: Vec<AffectedArea>,
}

impl SeismicEvent {
    /// Magnitude with the feed's missing-value default of 0.0.
    pub fn magnitude(&self) -> f64 {
        self.hypocenter.magnitude.unwrap_or(0.0)
    }

    /// Depth in kilometers with the feed's missing-value default of 0.0.
    pub fn depth(&self) -> f64 {
        self.hypocenter.depth.unwrap_or(0.0)
    }

    /// Coordinates, if the feed reported both and they are finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.hypocenter.latitude, self.hypocenter.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Origin point of a seismic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypocenter {
    /// Human-readable epicenter name.
    pub name: String,

    /// Latitude in degrees; `None` when not reported.
    pub latitude: Option<f64>,

    /// Longitude in degrees; `None` when not reported.
    pub longitude: Option<f64>,

    /// Magnitude; `None` when not reported.
    pub magnitude: Option<f64>,

    /// Depth in kilometers; `None` when not reported.
    pub depth: Option<f64>,
}

/// One area affected by an event, with its locally observed severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedArea {
    /// Area name.
    pub name: String,

    /// Local severity code; `None` when not reported.
    pub scale: Option<i32>,
}
