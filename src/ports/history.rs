//! HistoryQuery port - One-shot historical lookups.
//!
//! Historical queries bypass live ingestion entirely: results are
//! returned to the caller and never written into the live store.
//! Failures surface as `QueryError` to the caller of that specific
//! query and do not affect ingestion.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::SeismicEvent;

/// Default maximum number of results per query.
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// Errors from a historical query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("History request failed: {0}")]
    RequestFailed(String),

    #[error("History endpoint returned status {status}")]
    BadStatus { status: u16 },

    #[error("History response could not be parsed: {0}")]
    InvalidResponse(String),
}

/// Filter parameters for a historical search.
///
/// Omission rules are part of the contract: a minimum magnitude of
/// zero or below and an empty region are treated as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilters {
    /// Minimum magnitude; ignored when <= 0.
    pub min_magnitude: Option<f64>,

    /// Region (prefecture) filter; ignored when empty.
    pub region: Option<String>,

    /// Inclusive start date.
    pub since: Option<NaiveDate>,

    /// Inclusive end date.
    pub until: Option<NaiveDate>,

    /// Result limit; `DEFAULT_RESULT_LIMIT` when unset.
    pub limit: Option<usize>,
}

impl HistoryFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum magnitude.
    pub fn with_min_magnitude(mut self, magnitude: f64) -> Self {
        self.min_magnitude = Some(magnitude);
        self
    }

    /// Sets the region filter.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the inclusive start date.
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Sets the inclusive end date.
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Sets the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Minimum magnitude after the omission rule.
    pub fn effective_min_magnitude(&self) -> Option<f64> {
        self.min_magnitude.filter(|m| *m > 0.0)
    }

    /// Region after the omission rule.
    pub fn effective_region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    /// Result limit with the default applied.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_RESULT_LIMIT)
    }
}

/// Port for historical event lookups.
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Fetches the most recent seismic events, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<SeismicEvent>, QueryError>;

    /// Searches historical events matching `filters`, newest first.
    async fn search(&self, filters: &HistoryFilters) -> Result<Vec<SeismicEvent>, QueryError>;
}
