//! Mock push channel for testing.
//!
//! Provides a scripted implementation of the `PushChannel` port,
//! allowing connection-lifecycle tests to run without a network.
//!
//! # Features
//!
//! - Scripted sessions consumed in order, one per `open` call
//! - Open-failure injection for reconnection testing
//! - Frame delivery and hold-open steps
//! - Open-time tracking for backoff verification
//!
//! # Example
//!
//! ```ignore
//! let channel = MockChannel::new()
//!     .with_session(SessionScript::deliver([frame]))
//!     .with_session(SessionScript::FailOpen);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::ports::{ChannelError, ChannelSession, PushChannel};

/// One scripted session, consumed by a single `open` call.
#[derive(Debug, Clone)]
pub enum SessionScript {
    /// The open attempt fails.
    FailOpen,

    /// The open succeeds; the session plays the steps in order and
    /// then closes as if by the peer.
    Deliver(Vec<SessionStep>),
}

impl SessionScript {
    /// A session delivering the given raw frames, then closing.
    pub fn deliver<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SessionScript::Deliver(frames.into_iter().map(|f| SessionStep::Frame(f.into())).collect())
    }

    /// A session that delivers the given frames and then stays open
    /// until closed from our side.
    pub fn deliver_then_hold<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut steps: Vec<SessionStep> =
            frames.into_iter().map(|f| SessionStep::Frame(f.into())).collect();
        steps.push(SessionStep::Hold);
        SessionScript::Deliver(steps)
    }
}

/// One step inside a scripted session.
#[derive(Debug, Clone)]
pub enum SessionStep {
    /// Deliver one raw frame.
    Frame(String),

    /// Keep the session open indefinitely; only an explicit close or
    /// drop ends it.
    Hold,
}

/// Mock push channel.
pub struct MockChannel {
    scripts: Arc<Mutex<VecDeque<SessionScript>>>,
    opens: Arc<AtomicUsize>,
    open_times: Arc<Mutex<Vec<Instant>>>,
}

impl MockChannel {
    /// Creates a channel with no scripted sessions; every `open`
    /// fails until sessions are pushed.
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(Mutex::new(VecDeque::new())),
            opens: Arc::new(AtomicUsize::new(0)),
            open_times: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends a scripted session (builder style).
    pub fn with_session(self, script: SessionScript) -> Self {
        self.push_session(script);
        self
    }

    /// Appends a scripted session.
    pub fn push_session(&self, script: SessionScript) {
        self.scripts
            .lock()
            .expect("mock channel scripts lock poisoned")
            .push_back(script);
    }

    /// Number of `open` calls observed.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Instants at which `open` was called, in order.
    ///
    /// Uses the tokio clock, so paused-clock tests can verify backoff
    /// delays exactly.
    pub fn open_times(&self) -> Vec<Instant> {
        self.open_times
            .lock()
            .expect("mock channel times lock poisoned")
            .clone()
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushChannel for MockChannel {
    async fn open(&self) -> Result<Box<dyn ChannelSession>, ChannelError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.open_times
            .lock()
            .expect("mock channel times lock poisoned")
            .push(Instant::now());

        let script = self
            .scripts
            .lock()
            .expect("mock channel scripts lock poisoned")
            .pop_front();

        match script {
            Some(SessionScript::Deliver(steps)) => Ok(Box::new(MockSession {
                steps: steps.into(),
            })),
            Some(SessionScript::FailOpen) => Err(ChannelError::open("scripted open failure")),
            None => Err(ChannelError::open("no scripted sessions remaining")),
        }
    }
}

struct MockSession {
    steps: VecDeque<SessionStep>,
}

#[async_trait]
impl ChannelSession for MockSession {
    async fn next_frame(&mut self) -> Result<Option<String>, ChannelError> {
        match self.steps.pop_front() {
            Some(SessionStep::Frame(raw)) => Ok(Some(raw)),
            Some(SessionStep::Hold) => {
                // Held open until the caller closes or drops us.
                futures::future::pending().await
            }
            None => Ok(None),
        }
    }

    async fn close(&mut self) {
        self.steps.clear();
    }
}
