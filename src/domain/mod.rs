//! Domain layer - Value objects and pure logic.
//!
//! Contains the seismic event model, severity and magnitude encodings,
//! the connection state machine, the bounded event store, and the
//! inbound frame codec. Nothing in this layer touches the environment.

mod connection;
mod event;
mod frame;
mod magnitude;
mod severity;
mod store;

pub use connection::ConnectionState;
pub use event::{AffectedArea, Hypocenter, SeismicEvent};
pub use frame::{decode_frame, DecodeError, SEISMIC_EVENT_CODE};
pub use magnitude::{magnitude_bucket, Marker, MarkerSize};
pub use severity::Intensity;
pub use store::{BoundedEventStore, DEFAULT_CAPACITY};
