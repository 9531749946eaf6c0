#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Multiplayer elimination session engine for a location-guessing game.
//!
//! Players in a session view an obscured real-world place each round and
//! submit coordinate guesses; guesses are scored by great-circle distance,
//! the worst performers are eliminated at each round close, and the last
//! survivor (or best cumulative score) wins. The engine is memory-resident
//! and transport-agnostic: identity resolution, imagery, and the realtime
//! wire live outside it, behind [`BroadcastGateway`] and
//! [`LocationProvider`].

pub mod config;
pub mod domain;
pub mod errors;
pub mod providers;
pub mod realtime;
pub mod services;
pub mod store;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::engine::EngineConfig;
pub use domain::leaderboard::LeaderboardEntry;
pub use domain::snapshot::{GuessReceipt, SessionSnapshot};
pub use domain::state::{SessionStatus, UserId};
pub use errors::domain::DomainError;
pub use errors::error_code::{ErrorCode, RetryAdvice};
pub use providers::locations::{LocationProvider, StaticLocationProvider};
pub use realtime::events::GameEvent;
pub use realtime::gateway::{BroadcastGateway, NullGateway, RecordingGateway};
pub use realtime::registry::ConnectionRegistry;
pub use services::battle_royale::{BattleRoyaleService, CreateSessionRequest};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
