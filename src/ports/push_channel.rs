//! PushChannel port - Real-time push transport.
//!
//! The connection manager owns the channel lifecycle but never the
//! transport mechanics: opening, reading, and closing go through these
//! traits. Transport failures are `ChannelError` - non-fatal signals
//! that drive reconnection and are never surfaced to callers.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures on the push channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel open failed: {0}")]
    OpenFailed(String),

    #[error("Channel read failed: {0}")]
    ReadFailed(String),
}

impl ChannelError {
    /// Creates an open failure.
    pub fn open(message: impl Into<String>) -> Self {
        ChannelError::OpenFailed(message.into())
    }

    /// Creates a read failure.
    pub fn read(message: impl Into<String>) -> Self {
        ChannelError::ReadFailed(message.into())
    }
}

/// Port for establishing push-channel sessions.
///
/// Implementations must allow repeated `open` calls over the lifetime
/// of the process; each call yields an independent session.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Opens a new session.
    async fn open(&self) -> Result<Box<dyn ChannelSession>, ChannelError>;
}

/// One live push-channel session.
///
/// Frames are delivered as raw text; decoding is the caller's concern.
#[async_trait]
pub trait ChannelSession: Send {
    /// Waits for the next frame.
    ///
    /// Returns `Ok(Some(frame))` on delivery, `Ok(None)` when the peer
    /// closes the session, and `Err` on transport failure. After
    /// `Ok(None)` or `Err` the session is dead.
    async fn next_frame(&mut self) -> Result<Option<String>, ChannelError>;

    /// Closes the session. Idempotent.
    async fn close(&mut self);
}
