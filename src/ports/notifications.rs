//! NotificationSink port - Alert delivery.
//!
//! The engine decides *when* to alert (see
//! `application::NotificationPolicy`); the sink decides *how* -
//! browser notification, toast, audio. Sinks are invoked synchronously
//! from the ingestion path and must not block.

use std::sync::Arc;

use crate::domain::SeismicEvent;

/// Port for delivering one alert at a time.
pub trait NotificationSink: Send + Sync {
    /// Delivers an alert for `event`.
    fn notify(&self, event: &Arc<SeismicEvent>);

    /// Sink name for logging.
    fn name(&self) -> &'static str;
}
