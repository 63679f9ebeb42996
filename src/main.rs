//! Quakewatch binary - headless live monitor.
//!
//! Connects to the upstream feed, loads the recent working set, and
//! logs events, alerts and connection status until interrupted.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use quakewatch::adapters::channel::{HttpStreamChannel, StreamChannelConfig};
use quakewatch::adapters::history::{HistoryClientConfig, HttpHistoryClient};
use quakewatch::adapters::notifications::LogNotificationSink;
use quakewatch::adapters::settings::InMemorySettingsStore;
use quakewatch::adapters::surface::HeadlessSurface;
use quakewatch::application::{ListenerError, MonitorDeps, SeismicMonitor};
use quakewatch::config::AppConfig;
use quakewatch::domain::{ConnectionState, SeismicEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let deps = MonitorDeps {
        channel: Arc::new(HttpStreamChannel::new(StreamChannelConfig::new(
            config.api.stream_url.clone(),
        ))),
        history: Arc::new(HttpHistoryClient::new(
            HistoryClientConfig::new(config.api.base_url.clone())
                .with_timeout(std::time::Duration::from_secs(config.api.request_timeout_secs)),
        )),
        settings: Arc::new(InMemorySettingsStore::new()),
        notifications: Arc::new(LogNotificationSink::new()),
        surface: Arc::new(HeadlessSurface::new()),
    };

    let monitor = SeismicMonitor::with_options(
        deps,
        config.feed.max_events,
        config.feed.reconnect_policy(),
    );

    monitor.on_status(Arc::new(|state: &ConnectionState| {
        tracing::info!(%state, "connection status");
        Ok::<(), ListenerError>(())
    }));
    monitor.on_event(Arc::new(|event: &Arc<SeismicEvent>| {
        tracing::info!(
            event_id = %event.id,
            location = %event.hypocenter.name,
            magnitude = event.magnitude(),
            "seismic event"
        );
        Ok::<(), ListenerError>(())
    }));

    match monitor.load_recent().await {
        Ok(count) => tracing::info!(count, "initial working set loaded"),
        Err(error) => tracing::warn!(%error, "initial load failed; continuing with live feed"),
    }

    monitor.connect();

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    monitor.disconnect().await;

    Ok(())
}
