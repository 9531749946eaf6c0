//! Cumulative-score ranking.

use serde::Serialize;

use crate::domain::state::{Player, Session, UserId};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based, dense (no gaps); ties keep join order.
    pub rank: u32,
    pub user_id: UserId,
    pub display_name: String,
    pub score: u32,
    pub is_alive: bool,
    pub connected: bool,
}

/// Ranked snapshot of every player by cumulative score.
///
/// Equal scores keep the players' join order, so the ranking is stable
/// across repeated calls on the same state.
pub fn build_leaderboard(session: &Session) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<(usize, &Player)> = session.players.iter().enumerate().collect();
    ordered.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.0.cmp(&b.0)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(ix, (_, player))| LeaderboardEntry {
            rank: (ix + 1) as u32,
            user_id: player.user_id,
            display_name: player.display_name.clone(),
            score: player.score,
            is_alive: player.is_alive,
            connected: player.connected,
        })
        .collect()
}

/// Winner at session end.
///
/// The sole alive player when exactly one remains; otherwise the best
/// cumulative score among the alive players. When a close leaves nobody
/// alive, the best cumulative score across all players wins. Ties always go
/// to the earliest-joined player (lowest player-list index) — a deliberate,
/// stable tie-break.
pub fn decide_winner(session: &Session) -> Option<UserId> {
    let alive: Vec<&Player> = session.players.iter().filter(|p| p.is_alive).collect();
    let pool: Vec<&Player> = if alive.is_empty() {
        session.players.iter().collect()
    } else {
        alive
    };

    let mut best: Option<&Player> = None;
    for player in pool {
        match best {
            Some(current) if player.score <= current.score => {}
            _ => best = Some(player),
        }
    }
    best.map(|p| p.user_id)
}
