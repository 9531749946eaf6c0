//! Read-only queries over live and recently finished sessions.

use super::BattleRoyaleService;
use crate::domain::leaderboard::{build_leaderboard, LeaderboardEntry};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::UserId;
use crate::errors::domain::DomainError;

impl BattleRoyaleService {
    /// Point-in-time view of a session; keeps working through the retention
    /// window after the session finishes.
    pub fn session_snapshot(&self, code: &str) -> Result<SessionSnapshot, DomainError> {
        let shared = self.store.require(code)?;
        let session = shared.lock();
        Ok(SessionSnapshot::of(&session))
    }

    /// Current leaderboard for a session.
    pub fn leaderboard(&self, code: &str) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let shared = self.store.require(code)?;
        let session = shared.lock();
        Ok(build_leaderboard(&session))
    }

    /// The code of the session a user currently belongs to, if any.
    pub fn session_for_user(&self, user_id: UserId) -> Option<String> {
        self.store.membership(user_id)
    }
}
