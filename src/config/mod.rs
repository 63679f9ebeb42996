//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `QUAKEWATCH` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use quakewatch::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Streaming from {}", config.api.stream_url);
//! ```

mod api;
mod error;
mod feed;
mod map;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use feed::FeedConfig;
pub use map::MapConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults; the monitor runs against the
/// public upstream feed with no environment at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Upstream API endpoints and timeouts
    #[serde(default)]
    pub api: ApiConfig,

    /// Map surface defaults and tile sources
    #[serde(default)]
    pub map: MapConfig,

    /// Working-set capacity and reconnection tuning
    #[serde(default)]
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `QUAKEWATCH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `QUAKEWATCH__API__BASE_URL=...` -> `api.base_url = ...`
    /// - `QUAKEWATCH__FEED__MAX_EVENTS=50` -> `feed.max_events = 50`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUAKEWATCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.map.validate()?;
        self.feed.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("QUAKEWATCH__API__BASE_URL");
        env::remove_var("QUAKEWATCH__FEED__MAX_EVENTS");
        env::remove_var("QUAKEWATCH__MAP__DEFAULT_ZOOM");
    }

    #[test]
    fn loads_with_no_environment_at_all() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().expect("defaults should load");

        assert_eq!(config.api.base_url, "https://api.p2pquake.net/v2");
        assert_eq!(config.feed.max_events, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUAKEWATCH__API__BASE_URL", "https://feed.example.com/v2");
        env::set_var("QUAKEWATCH__FEED__MAX_EVENTS", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("overridden config should load");
        assert_eq!(config.api.base_url, "https://feed.example.com/v2");
        assert_eq!(config.feed.max_events, 25);
    }

    #[test]
    fn validate_catches_section_errors() {
        let config = AppConfig {
            feed: FeedConfig {
                max_events: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
