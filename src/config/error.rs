//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base URL format")]
    InvalidBaseUrl,

    #[error("Invalid push stream URL format")]
    InvalidStreamUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Latitude must be within -90..=90")]
    InvalidLatitude,

    #[error("Longitude must be within -180..=180")]
    InvalidLongitude,

    #[error("Zoom level out of range")]
    InvalidZoom,

    #[error("Tile URL template missing placeholders")]
    InvalidTileUrl,

    #[error("Working-set capacity must be positive")]
    InvalidCapacity,

    #[error("Reconnect base delay must be positive")]
    InvalidReconnectDelay,

    #[error("Reconnect backoff factor must be at least 1")]
    InvalidBackoffFactor,

    #[error("Reconnect attempt cap must be positive")]
    InvalidAttemptCap,
}
