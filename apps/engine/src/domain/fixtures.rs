//! Fixtures for domain tests.

use std::time::Duration;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::geo::Coordinates;
use crate::domain::snapshot::LocationPublic;
use crate::domain::state::{
    Guess, Player, Round, Session, SessionSettings, SessionStatus, TargetLocation, UserId,
};

/// Synthetic target locations spread along the equator, one per round.
pub fn locations(count: usize) -> Vec<TargetLocation> {
    (0..count)
        .map(|ix| TargetLocation {
            id: ix as i64 + 1,
            name: format!("Target {}", ix + 1),
            country: "Testland".to_string(),
            difficulty: Some("medium".to_string()),
            category: Some("city".to_string()),
            coords: Coordinates::new(0.0, (ix as f64) * 10.0),
        })
        .collect()
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        difficulty: None,
        category: None,
        round_duration: Duration::from_secs(30),
        elimination_rate: 0.25,
    }
}

pub fn player(user_id: UserId) -> Player {
    Player::new(user_id, format!("Player {user_id}"), Uuid::new_v4())
}

/// A waiting session with `player_count` members; user ids are 1-based and
/// user 1 is the creator.
pub fn session_with_players(player_count: usize, rounds: usize) -> Session {
    let mut session = Session::new("TESTCO", player(1), locations(rounds), settings());
    for user_id in 2..=player_count as UserId {
        session.players.push(player(user_id));
    }
    session
}

/// Mark the session active with an open round `round_no`.
pub fn open_round(session: &mut Session, round_no: u32) {
    session.status = SessionStatus::Active;
    session.current_round_no = round_no;
    let location = session
        .target_for_round(round_no)
        .map(LocationPublic::from)
        .unwrap_or_else(|| LocationPublic {
            id: round_no as i64,
            name: format!("Target {round_no}"),
            country: "Testland".to_string(),
            difficulty: None,
            category: None,
        });
    session
        .rounds
        .push(Round::open(round_no, location, session.settings.round_duration));
}

/// Record an accepted guess with a fixed round score; submission order is
/// the call order.
pub fn record_guess(session: &mut Session, round_no: u32, user_id: UserId, score: u32) {
    let guess = Guess {
        user_id,
        latitude: 0.0,
        longitude: 0.0,
        distance_km: 0.0,
        score,
        submitted_at: OffsetDateTime::now_utc(),
    };
    if let Some(round) = session.rounds.iter_mut().find(|r| r.round_no == round_no) {
        round.guesses.insert(user_id, guess.clone());
        round.submission_order.push(user_id);
    }
    if let Some(player) = session.player_mut(user_id) {
        player.guesses.insert(round_no, guess);
        player.score += score;
    }
}
