//! HTTP history client.
//!
//! Renders `HistoryFilters` into the upstream query parameters and
//! decodes response items with the same codec as push frames. Items
//! that fail to decode, or carry a non-seismic discriminator, are
//! skipped with a warning rather than failing the whole query.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::{decode_frame, SeismicEvent, SEISMIC_EVENT_CODE};
use crate::ports::{HistoryFilters, HistoryQuery, QueryError};

/// Configuration for the HTTP history client.
#[derive(Debug, Clone)]
pub struct HistoryClientConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl HistoryClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// History client over the upstream HTTP API.
pub struct HttpHistoryClient {
    config: HistoryClientConfig,
    client: Client,
}

impl HttpHistoryClient {
    /// Creates a client with the given configuration.
    pub fn new(config: HistoryClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn history_url(&self) -> String {
        format!("{}/history", self.config.base_url)
    }

    fn search_url(&self) -> String {
        format!("{}/jma/quake", self.config.base_url)
    }

    async fn fetch(
        &self,
        url: String,
        params: Vec<(&'static str, String)>,
    ) -> Result<Vec<SeismicEvent>, QueryError> {
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| QueryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::BadStatus {
                status: status.as_u16(),
            });
        }

        let items: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| QueryError::InvalidResponse(e.to_string()))?;

        Ok(parse_events(&items))
    }
}

#[async_trait]
impl HistoryQuery for HttpHistoryClient {
    async fn recent(&self, limit: usize) -> Result<Vec<SeismicEvent>, QueryError> {
        let params = vec![
            ("codes", SEISMIC_EVENT_CODE.to_string()),
            ("limit", limit.to_string()),
        ];
        self.fetch(self.history_url(), params).await
    }

    async fn search(&self, filters: &HistoryFilters) -> Result<Vec<SeismicEvent>, QueryError> {
        self.fetch(self.search_url(), query_params(filters)).await
    }
}

/// Renders filter parameters with the omission rules applied.
fn query_params(filters: &HistoryFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(magnitude) = filters.effective_min_magnitude() {
        params.push(("minMagnitude", magnitude.to_string()));
    }
    if let Some(region) = filters.effective_region() {
        params.push(("prefecture", region.to_string()));
    }
    if let Some(date) = filters.since {
        params.push(("sinceDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(date) = filters.until {
        params.push(("untilDate", date.format("%Y-%m-%d").to_string()));
    }
    params.push(("limit", filters.effective_limit().to_string()));

    params
}

/// Decodes response items, skipping entries that are not seismic
/// events or fail to decode.
fn parse_events(items: &[serde_json::Value]) -> Vec<SeismicEvent> {
    items
        .iter()
        .filter_map(|item| match decode_frame(&item.to_string()) {
            Ok(Some(event)) => Some(event),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "history item dropped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn minimal_filters_render_only_the_limit() {
        let params = query_params(&HistoryFilters::new());
        assert_eq!(params, vec![("limit", "100".to_string())]);
    }

    #[test]
    fn zero_magnitude_and_empty_region_are_omitted() {
        let filters = HistoryFilters::new().with_min_magnitude(0.0).with_region("");
        let params = query_params(&filters);
        assert_eq!(params, vec![("limit", "100".to_string())]);
    }

    #[test]
    fn full_filters_render_all_parameters() {
        let filters = HistoryFilters::new()
            .with_min_magnitude(4.5)
            .with_region("Tokyo")
            .with_since(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .with_until(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap())
            .with_limit(20);

        let params = query_params(&filters);
        assert_eq!(
            params,
            vec![
                ("minMagnitude", "4.5".to_string()),
                ("prefecture", "Tokyo".to_string()),
                ("sinceDate", "2026-01-01".to_string()),
                ("untilDate", "2026-06-30".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn parse_events_skips_non_seismic_and_malformed_items() {
        let items = vec![
            json!({
                "code": 551,
                "id": "keep",
                "earthquake": {"time": "2026/08/06 12:00:00"}
            }),
            json!({"code": 552, "areas": []}),
            json!({"code": 551}),
        ];

        let events = parse_events(&items);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "keep");
    }

    #[test]
    fn urls_join_base_and_endpoint() {
        let client = HttpHistoryClient::new(HistoryClientConfig::new("https://api.example.com/v2"));
        assert_eq!(client.history_url(), "https://api.example.com/v2/history");
        assert_eq!(client.search_url(), "https://api.example.com/v2/jma/quake");
    }
}
