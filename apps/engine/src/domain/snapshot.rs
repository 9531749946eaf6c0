//! Read-only views of session state for outbound payloads and queries.
//!
//! Nothing here carries target coordinates before the round that uses them
//! has closed; [`LocationPublic`] is the only pre-scoring location shape.

use serde::Serialize;

use crate::domain::leaderboard::{build_leaderboard, LeaderboardEntry};
use crate::domain::state::{Player, Session, SessionStatus, TargetLocation, UserId};

/// The subset of a target location that is safe to reveal before scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPublic {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

impl From<&TargetLocation> for LocationPublic {
    fn from(location: &TargetLocation) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            country: location.country.clone(),
            difficulty: location.difficulty.clone(),
            category: location.category.clone(),
        }
    }
}

/// Full reveal of a target location, emitted only after its round closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRevealed {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&TargetLocation> for LocationRevealed {
    fn from(location: &TargetLocation) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            country: location.country.clone(),
            latitude: location.coords.latitude,
            longitude: location.coords.longitude,
        }
    }
}

/// Public summary of a session member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPublic {
    pub user_id: UserId,
    pub display_name: String,
    pub score: u32,
    pub is_alive: bool,
    pub connected: bool,
}

impl From<&Player> for PlayerPublic {
    fn from(player: &Player) -> Self {
        Self {
            user_id: player.user_id,
            display_name: player.display_name.clone(),
            score: player.score,
            is_alive: player.is_alive,
            connected: player.connected,
        }
    }
}

/// Returned to a guesser immediately on acceptance. The true location stays
/// hidden until the round ends; only the caller's own result is included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessReceipt {
    pub round_no: u32,
    pub distance_km: f64,
    pub score: u32,
    pub total_score: u32,
}

/// Point-in-time view of a whole session, safe to hand to any caller.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub code: String,
    pub status: SessionStatus,
    pub creator_id: UserId,
    pub current_round_no: u32,
    pub max_rounds: u32,
    pub round_duration_secs: u64,
    pub elimination_rate: f64,
    pub players: Vec<PlayerPublic>,
    /// Public view of the current round's target, while a round is open.
    pub current_location: Option<LocationPublic>,
    /// Unix seconds at which the open round expires.
    pub round_deadline_unix: Option<i64>,
    pub winner: Option<PlayerPublic>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub created_at_unix: i64,
    pub started_at_unix: Option<i64>,
    pub finished_at_unix: Option<i64>,
}

impl SessionSnapshot {
    pub fn of(session: &Session) -> Self {
        let open_round = session.open_round();
        Self {
            code: session.code.clone(),
            status: session.status,
            creator_id: session.creator_id,
            current_round_no: session.current_round_no,
            max_rounds: session.max_rounds,
            round_duration_secs: session.settings.round_duration.as_secs(),
            elimination_rate: session.settings.elimination_rate,
            players: session.players.iter().map(PlayerPublic::from).collect(),
            current_location: open_round.map(|r| r.location.clone()),
            round_deadline_unix: open_round
                .and_then(|r| r.deadline())
                .map(|t| t.unix_timestamp()),
            winner: session
                .winner
                .and_then(|id| session.player(id))
                .map(PlayerPublic::from),
            leaderboard: build_leaderboard(session),
            created_at_unix: session.created_at.unix_timestamp(),
            started_at_unix: session.started_at.map(|t| t.unix_timestamp()),
            finished_at_unix: session.finished_at.map(|t| t.unix_timestamp()),
        }
    }
}
