//! Upstream API configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Endpoints and timeouts for the upstream feed
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL for historical queries
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint delivering real-time push frames
    #[serde(default = "default_stream_url")]
    pub stream_url: String,

    /// Request timeout in seconds for one-shot queries
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        let stream_ok = ["http://", "https://", "ws://", "wss://"]
            .iter()
            .any(|scheme| self.stream_url.starts_with(scheme));
        if !stream_ok {
            return Err(ValidationError::InvalidStreamUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stream_url: default_stream_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.p2pquake.net/v2".to_string()
}

fn default_stream_url() -> String {
    "https://api-realtime.p2pquake.net/v2/ws".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_upstream_api() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://api.p2pquake.net/v2");
        assert!(config.stream_url.contains("realtime"));
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_base_url() {
        let config = ApiConfig {
            base_url: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_accepts_websocket_stream_scheme() {
        let config = ApiConfig {
            stream_url: "wss://example.com/ws".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let config = ApiConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
