//! Notification sink adapters.

mod log;

pub use log::LogNotificationSink;
