//! Map surface configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::MapStyle;

/// Default view and tile sources for the map surface
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Initial view center latitude
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// Initial view center longitude
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Tile URL template for the streets style
    #[serde(default = "default_streets_tiles")]
    pub streets_tile_url: String,

    /// Tile URL template for the satellite style
    #[serde(default = "default_satellite_tiles")]
    pub satellite_tile_url: String,

    /// Tile URL template for the hybrid style
    #[serde(default = "default_hybrid_tiles")]
    pub hybrid_tile_url: String,

    /// Attribution line shown on the surface
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl MapConfig {
    /// Tile URL template for a style
    pub fn tile_url(&self, style: MapStyle) -> &str {
        match style {
            MapStyle::Streets => &self.streets_tile_url,
            MapStyle::Satellite => &self.satellite_tile_url,
            MapStyle::Hybrid => &self.hybrid_tile_url,
        }
    }

    /// Validate map configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.center_latitude) {
            return Err(ValidationError::InvalidLatitude);
        }
        if !(-180.0..=180.0).contains(&self.center_longitude) {
            return Err(ValidationError::InvalidLongitude);
        }
        if self.default_zoom > 19 {
            return Err(ValidationError::InvalidZoom);
        }
        for url in [
            &self.streets_tile_url,
            &self.satellite_tile_url,
            &self.hybrid_tile_url,
        ] {
            if !url.contains("{z}") || !url.contains("{x}") || !url.contains("{y}") {
                return Err(ValidationError::InvalidTileUrl);
            }
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            default_zoom: default_zoom(),
            streets_tile_url: default_streets_tiles(),
            satellite_tile_url: default_satellite_tiles(),
            hybrid_tile_url: default_hybrid_tiles(),
            attribution: default_attribution(),
        }
    }
}

// Center of Japan, matching the upstream feed's coverage.
fn default_center_latitude() -> f64 {
    36.2048
}

fn default_center_longitude() -> f64 {
    138.2529
}

fn default_zoom() -> u8 {
    5
}

fn default_streets_tiles() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_satellite_tiles() -> String {
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
        .to_string()
}

fn default_hybrid_tiles() -> String {
    default_satellite_tiles()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}
