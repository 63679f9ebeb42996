//! Log notification sink.
//!
//! Emits alerts as structured log records. Environments with real
//! delivery (browser notifications, audio) implement their own sink;
//! the engine only ever hands over one event at a time.

use std::sync::Arc;

use crate::domain::{Intensity, SeismicEvent};
use crate::ports::NotificationSink;

/// Alert sink that writes to the tracing pipeline.
pub struct LogNotificationSink;

impl LogNotificationSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for LogNotificationSink {
    fn notify(&self, event: &Arc<SeismicEvent>) {
        let intensity = Intensity::resolve(event.max_scale);
        tracing::warn!(
            event_id = %event.id,
            location = %event.hypocenter.name,
            magnitude = event.magnitude(),
            intensity = intensity.label,
            tsunami = event.tsunami,
            "earthquake alert"
        );
    }

    fn name(&self) -> &'static str {
        "LogNotificationSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Hypocenter;

    #[test]
    fn notify_does_not_panic_on_sparse_events() {
        let sink = LogNotificationSink::new();
        let event = Arc::new(SeismicEvent {
            id: "a".to_string(),
            time: String::new(),
            hypocenter: Hypocenter {
                name: String::new(),
                latitude: None,
                longitude: None,
                magnitude: None,
                depth: None,
            },
            max_scale: None,
            tsunami: false,
            areas: vec![],
        });

        sink.notify(&event);
        assert_eq!(sink.name(), "LogNotificationSink");
    }
}
