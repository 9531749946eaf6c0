//! In-process connection registry implementing the broadcast gateway.
//!
//! A transport layer subscribes each live connection to its session topic
//! (and optionally its user topic) and forwards the received events onto the
//! wire. Dead sinks are dropped on the next delivery attempt.

use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::domain::state::UserId;
use crate::realtime::events::GameEvent;
use crate::realtime::gateway::BroadcastGateway;

type Sinks = DashMap<Uuid, UnboundedSender<GameEvent>>;

#[derive(Default)]
pub struct ConnectionRegistry {
    sessions: DashMap<String, Sinks>,
    users: DashMap<UserId, Sinks>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            users: DashMap::new(),
        }
    }

    /// Subscribe a connection to a session topic.
    pub fn subscribe_session(&self, code: &str) -> (Uuid, UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        self.sessions
            .entry(code.to_string())
            .or_default()
            .insert(token, tx);
        (token, rx)
    }

    pub fn unsubscribe_session(&self, code: &str, token: Uuid) {
        let emptied = match self.sessions.get(code) {
            Some(entry) => {
                entry.remove(&token);
                entry.is_empty()
            }
            None => false,
        };
        if emptied {
            self.sessions.remove_if(code, |_, sinks| sinks.is_empty());
        }
    }

    /// Subscribe a connection to a user topic.
    pub fn subscribe_user(&self, user_id: UserId) -> (Uuid, UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        self.users.entry(user_id).or_default().insert(token, tx);
        (token, rx)
    }

    pub fn unsubscribe_user(&self, user_id: UserId, token: Uuid) {
        let emptied = match self.users.get(&user_id) {
            Some(entry) => {
                entry.remove(&token);
                entry.is_empty()
            }
            None => false,
        };
        if emptied {
            self.users.remove_if(&user_id, |_, sinks| sinks.is_empty());
        }
    }

    fn fan_out(sinks: &Sinks, event: &GameEvent) {
        let mut dead = Vec::new();
        for sink in sinks.iter() {
            if sink.value().send(event.clone()).is_err() {
                dead.push(*sink.key());
            }
        }
        for token in dead {
            sinks.remove(&token);
        }
    }
}

impl BroadcastGateway for ConnectionRegistry {
    fn notify_session(&self, code: &str, event: &GameEvent) {
        if let Some(entry) = self.sessions.get(code) {
            Self::fan_out(entry.value(), event);
        }
    }

    fn notify_user(&self, user_id: UserId, event: &GameEvent) {
        if let Some(entry) = self.users.get(&user_id) {
            Self::fan_out(entry.value(), event);
        }
    }
}
