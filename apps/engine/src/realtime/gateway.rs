//! Broadcast boundary between the engine and the realtime transport.

use parking_lot::Mutex;

use crate::domain::state::UserId;
use crate::realtime::events::GameEvent;

/// Outbound notification sink.
///
/// Calls are fire-and-forget: implementations must not block the caller, and
/// delivery failure never affects the state transition that produced the
/// event. The engine never retries.
pub trait BroadcastGateway: Send + Sync {
    /// Deliver to every participant of a session.
    fn notify_session(&self, code: &str, event: &GameEvent);

    /// Deliver to a single user, wherever they are connected.
    fn notify_user(&self, user_id: UserId, event: &GameEvent);
}

/// Gateway that drops every event, for embedders that poll snapshots only.
#[derive(Debug, Default)]
pub struct NullGateway;

impl BroadcastGateway for NullGateway {
    fn notify_session(&self, _code: &str, _event: &GameEvent) {}
    fn notify_user(&self, _user_id: UserId, _event: &GameEvent) {}
}

/// Gateway double that records every dispatch, for asserting on emitted
/// events in tests.
#[derive(Default)]
pub struct RecordingGateway {
    session_events: Mutex<Vec<(String, GameEvent)>>,
    user_events: Mutex<Vec<(UserId, GameEvent)>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_events(&self) -> Vec<(String, GameEvent)> {
        self.session_events.lock().clone()
    }

    pub fn user_events(&self) -> Vec<(UserId, GameEvent)> {
        self.user_events.lock().clone()
    }

    /// Names of the events sent to one session, in dispatch order.
    pub fn session_event_names(&self, code: &str) -> Vec<&'static str> {
        self.session_events
            .lock()
            .iter()
            .filter(|(event_code, _)| event_code == code)
            .map(|(_, event)| event.name())
            .collect()
    }

    /// Events delivered directly to one user, in dispatch order.
    pub fn events_for_user(&self, user_id: UserId) -> Vec<GameEvent> {
        self.user_events
            .lock()
            .iter()
            .filter(|(event_user, _)| *event_user == user_id)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

impl BroadcastGateway for RecordingGateway {
    fn notify_session(&self, code: &str, event: &GameEvent) {
        self.session_events
            .lock()
            .push((code.to_string(), event.clone()));
    }

    fn notify_user(&self, user_id: UserId, event: &GameEvent) {
        self.user_events.lock().push((user_id, event.clone()));
    }
}
