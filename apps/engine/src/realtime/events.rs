//! Outbound event envelopes.
//!
//! Every notification the engine emits is one of these variants. Payload
//! shapes are fixed per event; no ad-hoc maps. The serde tag doubles as the
//! wire event name.

use serde::Serialize;

use crate::domain::leaderboard::LeaderboardEntry;
use crate::domain::snapshot::{LocationPublic, LocationRevealed, PlayerPublic};
use crate::domain::state::UserId;

/// Summary of a player removed at a round close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EliminatedSummary {
    pub user_id: UserId,
    pub display_name: String,
    pub round_score: u32,
    pub final_rank: u32,
    /// False when the player was eliminated for not guessing.
    pub guessed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// A round opened. Never carries target coordinates.
    RoundStarted {
        round_no: u32,
        location: LocationPublic,
        duration_secs: u64,
        alive_count: u32,
    },
    /// A round closed; the target is revealed and eliminations announced.
    RoundEnded {
        round_no: u32,
        location: LocationRevealed,
        eliminated: Vec<EliminatedSummary>,
        remaining_alive: u32,
        leaderboard: Vec<LeaderboardEntry>,
    },
    /// Sent only to the eliminated player.
    PlayerEliminated {
        round_no: u32,
        round_score: u32,
        final_rank: u32,
    },
    SessionEnded {
        winner: Option<PlayerPublic>,
        leaderboard: Vec<LeaderboardEntry>,
        reason: String,
    },
    PlayerJoined {
        user_id: UserId,
        display_name: String,
        player_count: u32,
    },
    PlayerLeft {
        user_id: UserId,
        display_name: String,
        player_count: u32,
    },
}

impl GameEvent {
    /// Wire name of the event; always equal to the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted { .. } => "round-started",
            GameEvent::RoundEnded { .. } => "round-ended",
            GameEvent::PlayerEliminated { .. } => "player-eliminated",
            GameEvent::SessionEnded { .. } => "session-ended",
            GameEvent::PlayerJoined { .. } => "player-joined",
            GameEvent::PlayerLeft { .. } => "player-left",
        }
    }

    /// JSON payload for transports that carry the event name separately.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tag_matches_event_name() {
        let event = GameEvent::PlayerJoined {
            user_id: 7,
            display_name: "Ada".to_string(),
            player_count: 3,
        };

        let value = event.payload();
        assert_eq!(value["type"], event.name());
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["player_count"], 3);
    }

    #[test]
    fn round_started_payload_has_no_coordinates() {
        let event = GameEvent::RoundStarted {
            round_no: 1,
            location: LocationPublic {
                id: 1,
                name: "Paris".to_string(),
                country: "France".to_string(),
                difficulty: Some("easy".to_string()),
                category: Some("city".to_string()),
            },
            duration_secs: 60,
            alive_count: 4,
        };

        let rendered = event.payload().to_string();
        assert_eq!(event.name(), "round-started");
        assert!(!rendered.contains("latitude"));
        assert!(!rendered.contains("longitude"));
    }

    #[test]
    fn round_ended_payload_reveals_the_target() {
        let event = GameEvent::RoundEnded {
            round_no: 1,
            location: LocationRevealed {
                id: 1,
                name: "Paris".to_string(),
                country: "France".to_string(),
                latitude: 48.8566,
                longitude: 2.3522,
            },
            eliminated: vec![],
            remaining_alive: 3,
            leaderboard: vec![],
        };

        let value = event.payload();
        assert_eq!(value["type"], "round-ended");
        assert_eq!(value["location"]["latitude"], 48.8566);
    }
}
