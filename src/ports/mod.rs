//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core engine and the outside world. Adapters implement these ports.
//!
//! ## Transport Ports
//!
//! - `PushChannel` / `ChannelSession` - Real-time push channel lifecycle
//! - `HistoryQuery` - One-shot historical lookups
//!
//! ## Environment Ports
//!
//! - `SettingsStore` - Key-value preference persistence
//! - `NotificationSink` - Alert delivery (browser notification, audio)
//! - `MarkerSurface` - Spatial surface receiving marker commands

mod history;
mod notifications;
mod push_channel;
mod settings;
mod surface;

pub use history::{HistoryFilters, HistoryQuery, QueryError, DEFAULT_RESULT_LIMIT};
pub use notifications::NotificationSink;
pub use push_channel::{ChannelError, ChannelSession, PushChannel};
pub use settings::{keys, SettingsStore};
pub use surface::{MapStyle, MarkerSurface, UnknownMapStyle};
