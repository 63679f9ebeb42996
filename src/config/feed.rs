//! Live feed configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::ReconnectPolicy;

/// Working-set and reconnection tuning for the live feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Maximum events kept in the live working set
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Delay in milliseconds before the first reconnect attempt
    #[serde(default = "default_reconnect_base_delay_ms")]
    pub reconnect_base_delay_ms: u64,

    /// Multiplier applied to the delay after each attempt
    #[serde(default = "default_reconnect_backoff_factor")]
    pub reconnect_backoff_factor: f64,

    /// Maximum automatic reconnect attempts per disconnection
    #[serde(default = "default_reconnect_max_attempts")]
    pub reconnect_max_attempts: u32,
}

impl FeedConfig {
    /// Reconnect policy derived from this configuration
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            base_delay: Duration::from_millis(self.reconnect_base_delay_ms),
            backoff_factor: self.reconnect_backoff_factor,
            max_attempts: self.reconnect_max_attempts,
        }
    }

    /// Validate feed configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_events == 0 {
            return Err(ValidationError::InvalidCapacity);
        }
        if self.reconnect_base_delay_ms == 0 {
            return Err(ValidationError::InvalidReconnectDelay);
        }
        if !self.reconnect_backoff_factor.is_finite() || self.reconnect_backoff_factor < 1.0 {
            return Err(ValidationError::InvalidBackoffFactor);
        }
        if self.reconnect_max_attempts == 0 {
            return Err(ValidationError::InvalidAttemptCap);
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
            reconnect_base_delay_ms: default_reconnect_base_delay_ms(),
            reconnect_backoff_factor: default_reconnect_backoff_factor(),
            reconnect_max_attempts: default_reconnect_max_attempts(),
        }
    }
}

fn default_max_events() -> usize {
    100
}

fn default_reconnect_base_delay_ms() -> u64 {
    2000
}

fn default_reconnect_backoff_factor() -> f64 {
    1.5
}

fn default_reconnect_max_attempts() -> u32 {
    5
}
