//! Push-channel lifecycle and reconnection policy.
//!
//! One supervisor task owns the channel: it opens sessions, reads and
//! decodes frames, publishes status transitions, and schedules retries
//! after unsolicited closures. At most one session is open or pending
//! at any time, and at most one reconnect delay is pending.
//!
//! ## State machine
//!
//! ```text
//! Disconnected --connect()--> Connecting --open--> Connected
//! Connected/Connecting --unsolicited close, retries remain--> Connecting (after delay)
//! Connecting --unsolicited close, retries exhausted--> Disconnected (terminal)
//! any state --disconnect()--> Disconnected (terminal, cancels pending delay)
//! ```
//!
//! Exhausting retries is a silent degradation: the final published
//! status is Disconnected with no distinct failure signal.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::{EventBus, Preferences};
use crate::domain::{decode_frame, ConnectionState};
use crate::ports::PushChannel;

/// Reconnection backoff policy.
///
/// The delay before attempt `i` (zero-based) is
/// `base_delay * backoff_factor^i`; the delay is unbounded in
/// magnitude, bounded only by `max_attempts`.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    /// Delay before the first retry.
    pub base_delay: Duration,

    /// Multiplier applied after each attempt.
    pub backoff_factor: f64,

    /// Maximum automatic attempts after one disconnection.
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(2000),
            backoff_factor: 1.5,
            max_attempts: 5,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .mul_f64(self.backoff_factor.powi(attempt as i32))
    }
}

/// Owns the push-channel lifecycle.
pub struct ConnectionManager {
    shared: Arc<Shared>,
    control: Mutex<Control>,
}

struct Shared {
    channel: Arc<dyn PushChannel>,
    bus: Arc<EventBus>,
    preferences: Preferences,
    policy: ReconnectPolicy,
    state: Mutex<ConnectionState>,
}

#[derive(Default)]
struct Control {
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl ConnectionManager {
    /// Creates a manager over the given channel.
    pub fn new(
        channel: Arc<dyn PushChannel>,
        bus: Arc<EventBus>,
        preferences: Preferences,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                channel,
                bus,
                preferences,
                policy,
                state: Mutex::new(ConnectionState::Disconnected),
            }),
            control: Mutex::new(Control::default()),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.shared.current_state()
    }

    /// Starts the supervisor task.
    ///
    /// Idempotent: a no-op while Connecting or Connected, and while a
    /// reconnect delay is pending, so at most one channel is ever open
    /// or pending.
    pub fn connect(&self) {
        {
            let control = self.control.lock().expect("connection control lock poisoned");

            let supervisor_alive = control
                .task
                .as_ref()
                .map(|task| !task.is_finished())
                .unwrap_or(false);
            if supervisor_alive || self.shared.current_state().is_active() {
                tracing::debug!("connect ignored: channel already open or pending");
                return;
            }

            // Claim the state before any listener runs so reentrant
            // connect() calls observe Connecting and no-op.
            self.shared.set_state(ConnectionState::Connecting);
        }

        // Published outside the control lock so a status listener may
        // call back into this manager.
        self.shared.bus.publish_status(ConnectionState::Connecting);

        let (shutdown, stop) = watch::channel(false);
        let shared = Arc::clone(&self.shared);
        let mut control = self.control.lock().expect("connection control lock poisoned");
        control.shutdown = Some(shutdown);
        control.task = Some(tokio::spawn(supervise(shared, stop)));
    }

    /// Closes the channel and disables auto-reconnect for this session.
    ///
    /// Cancels any pending reconnect delay deterministically: the
    /// supervisor observes the shutdown signal before its delay can
    /// fire, and this call joins the task before returning.
    pub async fn disconnect(&self) {
        let (shutdown, task) = {
            let mut control = self.control.lock().expect("connection control lock poisoned");
            (control.shutdown.take(), control.task.take())
        };

        if let Some(shutdown) = shutdown {
            let _ = shutdown.send(true);
        }
        if let Some(task) = task {
            let _ = task.await;
        }

        self.shared.transition(ConnectionState::Disconnected);
    }
}

impl Shared {
    fn current_state(&self) -> ConnectionState {
        *self.state.lock().expect("connection state lock poisoned")
    }

    /// Records a state change without publishing. Returns false when
    /// the state was already `next`.
    fn set_state(&self, next: ConnectionState) -> bool {
        let mut state = self.state.lock().expect("connection state lock poisoned");
        if *state == next {
            return false;
        }
        debug_assert!(state.can_transition_to(&next), "{} -> {}", state, next);
        *state = next;
        true
    }

    /// Applies and publishes a state change; repeated states are not
    /// re-published.
    fn transition(&self, next: ConnectionState) {
        if self.set_state(next) {
            self.bus.publish_status(next);
        }
    }

    /// Decodes one raw frame and publishes the domain event.
    ///
    /// Malformed frames are logged and dropped; frames with other
    /// discriminators are ignored. Neither affects connection state.
    fn ingest(&self, raw: &str) {
        match decode_frame(raw) {
            Ok(Some(event)) => {
                tracing::debug!(event_id = %event.id, "seismic event received");
                self.bus.publish_event(&Arc::new(event));
            }
            Ok(None) => {
                tracing::trace!("non-seismic frame ignored");
            }
            Err(error) => {
                tracing::warn!(%error, "malformed frame dropped");
            }
        }
    }
}

/// Supervisor loop: one iteration per connection attempt.
async fn supervise(shared: Arc<Shared>, mut stop: watch::Receiver<bool>) {
    let mut attempts: u32 = 0;

    loop {
        // State is Connecting on entry (set by connect() or the retry
        // arm below).
        let opened = tokio::select! {
            opened = shared.channel.open() => opened,
            _ = stop.changed() => return,
        };

        match opened {
            Ok(mut session) => {
                attempts = 0;
                shared.transition(ConnectionState::Connected);

                loop {
                    tokio::select! {
                        frame = session.next_frame() => match frame {
                            Ok(Some(raw)) => shared.ingest(&raw),
                            Ok(None) => {
                                tracing::info!("push channel closed by peer");
                                break;
                            }
                            Err(error) => {
                                tracing::warn!(%error, "push channel read failed");
                                break;
                            }
                        },
                        _ = stop.changed() => {
                            session.close().await;
                            return;
                        }
                    }
                }
            }
            Err(error) => {
                tracing::warn!(%error, "push channel open failed");
            }
        }

        // Unsolicited closure (or failed open).
        shared.transition(ConnectionState::Disconnected);

        if !shared.preferences.auto_reconnect() {
            tracing::info!("auto-reconnect disabled; staying disconnected");
            return;
        }
        if attempts >= shared.policy.max_attempts {
            tracing::warn!(
                attempts,
                "reconnect attempts exhausted; staying disconnected"
            );
            return;
        }

        let delay = shared.policy.delay_for(attempts);
        attempts += 1;
        tracing::info!(
            attempt = attempts,
            max_attempts = shared.policy.max_attempts,
            delay_ms = delay.as_millis() as u64,
            "scheduling reconnect"
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = stop.changed() => return,
        }

        shared.transition(ConnectionState::Connecting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_contract() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.base_delay, Duration::from_millis(2000));
        assert_eq!(policy.backoff_factor, 1.5);
        assert_eq!(policy.max_attempts, 5);
    }

    #[test]
    fn delays_multiply_by_factor() {
        let policy = ReconnectPolicy::default();
        let delays: Vec<u128> = (0..5).map(|i| policy.delay_for(i).as_millis()).collect();
        assert_eq!(delays, vec![2000, 3000, 4500, 6750, 10125]);
    }

    #[test]
    fn each_delay_is_factor_times_previous() {
        let policy = ReconnectPolicy::default();
        for i in 0..4 {
            let current = policy.delay_for(i).as_secs_f64();
            let next = policy.delay_for(i + 1).as_secs_f64();
            assert!((next - current * 1.5).abs() < 1e-9);
        }
    }
}
