//! MarkerSurface port - Spatial surface commands.
//!
//! The map synchronizer owns which markers exist and what they look
//! like; the surface renders them. Implementations receive keyed
//! create/replace/remove commands rather than full rebuilds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Marker;

/// Basemap styles supported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// Street map tiles.
    #[default]
    Streets,

    /// Satellite imagery tiles.
    Satellite,

    /// Satellite imagery with labels.
    Hybrid,
}

impl MapStyle {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Streets => "streets",
            MapStyle::Satellite => "satellite",
            MapStyle::Hybrid => "hybrid",
        }
    }
}

impl FromStr for MapStyle {
    type Err = UnknownMapStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streets" => Ok(MapStyle::Streets),
            "satellite" => Ok(MapStyle::Satellite),
            "hybrid" => Ok(MapStyle::Hybrid),
            other => Err(UnknownMapStyle(other.to_string())),
        }
    }
}

/// Error for unrecognized style names.
#[derive(Debug, thiserror::Error)]
#[error("Unknown map style: {0}")]
pub struct UnknownMapStyle(pub String);

/// Port for the surface that renders markers.
pub trait MarkerSurface: Send + Sync {
    /// Creates or replaces the marker keyed by `marker.event_id`.
    fn place_marker(&self, marker: &Marker);

    /// Removes the marker with the given event id, if present.
    fn remove_marker(&self, event_id: &str);

    /// Removes every marker.
    fn clear_markers(&self);

    /// Re-centers the view on `marker` at `zoom` and opens its popup.
    fn focus_marker(&self, marker: &Marker, zoom: u8);

    /// Swaps the basemap tile source. Markers are untouched.
    fn set_tile_style(&self, style: MapStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn MarkerSurface) {}

    #[test]
    fn style_round_trips_through_names() {
        for style in [MapStyle::Streets, MapStyle::Satellite, MapStyle::Hybrid] {
            assert_eq!(style.as_str().parse::<MapStyle>().unwrap(), style);
        }
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!("terrain".parse::<MapStyle>().is_err());
    }

    #[test]
    fn default_style_is_streets() {
        assert_eq!(MapStyle::default(), MapStyle::Streets);
    }
}
