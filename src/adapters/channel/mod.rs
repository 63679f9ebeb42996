//! Push-channel transport adapters.

mod http_stream;
mod mock;

pub use http_stream::{HttpStreamChannel, StreamChannelConfig};
pub use mock::{MockChannel, SessionScript, SessionStep};
