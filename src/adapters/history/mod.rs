//! Historical query adapters.

mod http;

pub use http::{HistoryClientConfig, HttpHistoryClient};
