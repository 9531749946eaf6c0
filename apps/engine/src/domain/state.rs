//! Session, round, and player state containers.
//!
//! These types are owned exclusively by the session store; they leave the
//! engine only as the read-only views in [`crate::domain::snapshot`].

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::geo::Coordinates;
use crate::domain::snapshot::LocationPublic;

pub type UserId = i64;

/// Overall session progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Lobby open; players may join and leave.
    Waiting,
    /// Rounds in progress.
    Active,
    /// Terminal; readable until the retention window elapses.
    Finished,
}

/// A candidate target location as returned by the location provider.
///
/// The coordinates stay inside the engine until the round that uses them has
/// closed; outbound payloads carry [`LocationPublic`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLocation {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub coords: Coordinates,
}

/// Per-session settings, resolved at creation time and immutable afterwards.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub round_duration: Duration,
    pub elimination_rate: f64,
}

/// One accepted guess.
#[derive(Debug, Clone)]
pub struct Guess {
    pub user_id: UserId,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub score: u32,
    pub submitted_at: OffsetDateTime,
}

/// One timed guessing phase tied to one target location.
#[derive(Debug, Clone)]
pub struct Round {
    /// 1-based; also indexes (less one) into the session's location list.
    pub round_no: u32,
    pub location: LocationPublic,
    pub started_at: OffsetDateTime,
    pub duration: Duration,
    /// Set exactly once when the round closes. This is the one-shot guard
    /// that resolves the timer-vs-last-guess race.
    pub ended_at: Option<OffsetDateTime>,
    /// At most one entry per alive player; duplicates are rejected upstream.
    pub guesses: HashMap<UserId, Guess>,
    /// Arrival order of accepted guesses; the elimination tie-break.
    pub submission_order: Vec<UserId>,
}

impl Round {
    pub fn open(round_no: u32, location: LocationPublic, duration: Duration) -> Self {
        Self {
            round_no,
            location,
            started_at: OffsetDateTime::now_utc(),
            duration,
            ended_at: None,
            guesses: HashMap::new(),
            submission_order: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Wall-clock moment the round expires, while it is open.
    pub fn deadline(&self) -> Option<OffsetDateTime> {
        self.is_open().then(|| self.started_at + self.duration)
    }
}

/// A session member. Eliminated players stay in the list so guesses and
/// the final ranking still reference them.
#[derive(Debug, Clone)]
pub struct Player {
    pub user_id: UserId,
    pub display_name: String,
    /// Opaque handle owned by the transport layer; replaced on reconnect.
    pub transport_handle: Uuid,
    /// Cumulative score across rounds.
    pub score: u32,
    /// One-way: true -> false only, never back.
    pub is_alive: bool,
    pub connected: bool,
    /// Per-round guess audit, keyed by round number.
    pub guesses: HashMap<u32, Guess>,
}

impl Player {
    pub fn new(user_id: UserId, display_name: impl Into<String>, transport_handle: Uuid) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            transport_handle,
            score: 0,
            is_alive: true,
            connected: true,
            guesses: HashMap::new(),
        }
    }
}

/// One complete elimination game instance, identified by a short code.
#[derive(Debug, Clone)]
pub struct Session {
    pub code: String,
    pub creator_id: UserId,
    pub status: SessionStatus,
    /// Join order is significant: it breaks leaderboard and winner ties.
    pub players: Vec<Player>,
    /// 0 while Waiting, then 1-based and strictly increasing.
    pub current_round_no: u32,
    pub max_rounds: u32,
    /// Fixed at creation; one target per round.
    pub locations: Vec<TargetLocation>,
    pub settings: SessionSettings,
    /// Append-only round history.
    pub rounds: Vec<Round>,
    pub winner: Option<UserId>,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub finished_at: Option<OffsetDateTime>,
}

impl Session {
    pub fn new(
        code: impl Into<String>,
        creator: Player,
        locations: Vec<TargetLocation>,
        settings: SessionSettings,
    ) -> Self {
        let max_rounds = locations.len() as u32;
        Self {
            code: code.into(),
            creator_id: creator.user_id,
            status: SessionStatus::Waiting,
            players: vec![creator],
            current_round_no: 0,
            max_rounds,
            locations,
            settings,
            rounds: Vec::new(),
            winner: None,
            created_at: OffsetDateTime::now_utc(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn player(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: UserId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive).count()
    }

    /// The round currently being played, if one is open.
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds
            .last()
            .filter(|r| r.round_no == self.current_round_no && r.is_open())
    }

    pub fn open_round_mut(&mut self) -> Option<&mut Round> {
        let current = self.current_round_no;
        self.rounds
            .last_mut()
            .filter(|r| r.round_no == current && r.is_open())
    }

    pub fn round(&self, round_no: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_no == round_no)
    }

    /// Target for a 1-based round number.
    pub fn target_for_round(&self, round_no: u32) -> Option<&TargetLocation> {
        round_no
            .checked_sub(1)
            .and_then(|ix| self.locations.get(ix as usize))
    }
}
