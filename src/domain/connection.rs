//! Connection lifecycle state.
//!
//! Transitions are owned exclusively by the connection manager; this
//! enum only encodes which transitions are legal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No channel open and none pending.
    Disconnected,

    /// A channel open is in flight (initial or reconnect).
    Connecting,

    /// The channel is open and delivering frames.
    Connected,
}

impl ConnectionState {
    /// Returns true if a transition from self to target is valid.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!(
            (self, target),
            (Disconnected, Connecting)
                | (Connecting, Connected)
                | (Connecting, Disconnected)
                | (Connected, Connecting)
                | (Connected, Disconnected)
        )
    }

    /// All valid target states from the current state.
    pub fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Disconnected => vec![Connecting],
            Connecting => vec![Connected, Disconnected],
            Connected => vec![Connecting, Disconnected],
        }
    }

    /// Whether a `connect()` call should be a no-op in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_path_is_valid() {
        assert!(ConnectionState::Disconnected.can_transition_to(&ConnectionState::Connecting));
        assert!(ConnectionState::Connecting.can_transition_to(&ConnectionState::Connected));
    }

    #[test]
    fn reconnect_path_is_valid() {
        assert!(ConnectionState::Connected.can_transition_to(&ConnectionState::Connecting));
    }

    #[test]
    fn cannot_jump_straight_to_connected() {
        assert!(!ConnectionState::Disconnected.can_transition_to(&ConnectionState::Connected));
    }

    #[test]
    fn active_states() {
        assert!(ConnectionState::Connecting.is_active());
        assert!(ConnectionState::Connected.is_active());
        assert!(!ConnectionState::Disconnected.is_active());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
    }
}
