//! Streaming-HTTP push channel.
//!
//! Holds a long-lived GET open against the feed endpoint and treats
//! each newline-delimited chunk of the response body as one frame.
//! The connection manager owns reconnection; this adapter only maps
//! transport failures to `ChannelError`.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use reqwest::Client;

use crate::ports::{ChannelError, ChannelSession, PushChannel};

/// Configuration for the streaming channel.
#[derive(Debug, Clone)]
pub struct StreamChannelConfig {
    /// Endpoint delivering newline-delimited JSON frames.
    pub url: String,

    /// Timeout for establishing the connection. The stream itself has
    /// no overall timeout.
    pub connect_timeout: Duration,
}

impl StreamChannelConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Push channel over a long-lived HTTP response stream.
pub struct HttpStreamChannel {
    config: StreamChannelConfig,
    client: Client,
}

impl HttpStreamChannel {
    /// Creates a channel with the given configuration.
    pub fn new(config: StreamChannelConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl PushChannel for HttpStreamChannel {
    async fn open(&self) -> Result<Box<dyn ChannelSession>, ChannelError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| ChannelError::open(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::open(format!(
                "feed endpoint returned status {}",
                status
            )));
        }

        // Erase the chunk type so the session owns a plain byte stream.
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(|e| e.to_string()))
            .boxed();

        tracing::debug!(url = %self.config.url, "push stream opened");
        Ok(Box::new(HttpStreamSession {
            stream: Some(stream),
            buffer: Vec::new(),
        }))
    }
}

struct HttpStreamSession {
    /// `None` once closed.
    stream: Option<BoxStream<'static, Result<Vec<u8>, String>>>,
    buffer: Vec<u8>,
}

#[async_trait]
impl ChannelSession for HttpStreamSession {
    async fn next_frame(&mut self) -> Result<Option<String>, ChannelError> {
        loop {
            if let Some(line) = take_line(&mut self.buffer) {
                return Ok(Some(line));
            }

            let Some(stream) = self.stream.as_mut() else {
                return Ok(None);
            };

            match stream.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.stream = None;
                    return Err(ChannelError::read(e));
                }
                None => {
                    self.stream = None;
                    // A final unterminated line still counts as a frame.
                    let rest = std::mem::take(&mut self.buffer);
                    let rest = String::from_utf8_lossy(&rest).trim().to_string();
                    return Ok(if rest.is_empty() { None } else { Some(rest) });
                }
            }
        }
    }

    async fn close(&mut self) {
        // Dropping the response stream aborts the request.
        self.stream = None;
        self.buffer.clear();
    }
}

/// Extracts the first complete, non-empty line from `buffer`.
fn take_line(buffer: &mut Vec<u8>) -> Option<String> {
    while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=pos).collect();
        let line = String::from_utf8_lossy(&line).trim().to_string();
        if !line.is_empty() {
            return Some(line);
        }
    }
    None
}
