//! Battle-royale session orchestration - lobby lifecycle, guess intake,
//! round close, and timer scheduling over the in-memory store.
//!
//! All mutations to one session happen under that session's store mutex,
//! which is never held across an await or a gateway call. Timer tasks race a
//! sleep against their registry token; whichever trigger loses a race finds
//! the state already advanced and no-ops.
//!
//! Methods that schedule timers must be called from within a tokio runtime.

mod lifecycle;
mod orchestration;
mod player_actions;
mod queries;
mod round_lifecycle;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::config::engine::EngineConfig;
use crate::providers::locations::LocationProvider;
use crate::realtime::gateway::BroadcastGateway;
use crate::store::sessions::SessionStore;
use crate::store::timers::TimerRegistry;

/// One authoritative engine instance per process.
pub struct BattleRoyaleService {
    store: Arc<SessionStore>,
    timers: Arc<TimerRegistry>,
    gateway: Arc<dyn BroadcastGateway>,
    locations: Arc<dyn LocationProvider>,
    config: EngineConfig,
    /// Self-handle for timer tasks; always upgradeable while the service
    /// lives.
    weak_self: Weak<BattleRoyaleService>,
}

impl BattleRoyaleService {
    pub fn new(
        gateway: Arc<dyn BroadcastGateway>,
        locations: Arc<dyn LocationProvider>,
        config: EngineConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            store: Arc::new(SessionStore::new()),
            timers: Arc::new(TimerRegistry::new()),
            gateway,
            locations,
            config,
            weak_self: weak_self.clone(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Per-session overrides accepted at creation; unset fields fall back to the
/// deployment defaults in [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub round_duration: Option<Duration>,
    pub elimination_rate: Option<f64>,
}
