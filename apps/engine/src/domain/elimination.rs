//! Round-close elimination math.

use std::collections::HashMap;

use crate::domain::state::{Session, UserId};

/// Why a player was eliminated at round close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationReason {
    /// No guess submitted before the round closed.
    NoGuess,
    /// Lowest round scores among the guessing players.
    LowScore,
}

/// One player removed at a round close.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminatedPlayer {
    pub user_id: UserId,
    pub display_name: String,
    pub round_score: u32,
    pub reason: EliminationReason,
    /// Final placement in the session; 1 is the winner's rank.
    pub final_rank: u32,
}

/// Result of applying one round's eliminations.
#[derive(Debug, Clone, Default)]
pub struct EliminationOutcome {
    /// Newly eliminated players, best final rank first.
    pub eliminated: Vec<EliminatedPlayer>,
    /// Alive players left after the eliminations.
    pub remaining_alive: usize,
}

/// Apply round-close eliminations to `session`, in order:
///
/// 1. Every alive player with no guess for `round_no` is eliminated
///    unconditionally.
/// 2. If more than two alive players guessed, the bottom
///    `max(1, floor(k * elimination_rate))` of them by round score are
///    eliminated. On equal scores the earlier submission is eliminated
///    first.
///
/// Final ranks: eliminated players slot in directly below the survivors,
/// best round score first; no-guess eliminations rank below score
/// eliminations. `is_alive` only ever flips true -> false here.
pub fn apply_round_elimination(
    session: &mut Session,
    round_no: u32,
    elimination_rate: f64,
) -> EliminationOutcome {
    let mut no_guess: Vec<UserId> = Vec::new();
    // (user, round score, submission index), ascending worst-first below.
    let mut guessed: Vec<(UserId, u32, usize)> = Vec::new();

    {
        let Some(round) = session.round(round_no) else {
            return EliminationOutcome::default();
        };
        let order_ix: HashMap<UserId, usize> = round
            .submission_order
            .iter()
            .enumerate()
            .map(|(ix, id)| (*id, ix))
            .collect();

        for player in session.players.iter().filter(|p| p.is_alive) {
            match round.guesses.get(&player.user_id) {
                Some(guess) => guessed.push((
                    player.user_id,
                    guess.score,
                    order_ix.get(&player.user_id).copied().unwrap_or(usize::MAX),
                )),
                None => no_guess.push(player.user_id),
            }
        }
    }

    // Ascending round score; on ties the earlier submission sorts first and
    // is therefore eliminated first.
    guessed.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)));

    let k = guessed.len();
    let cut = if k > 2 {
        (((k as f64) * elimination_rate).floor() as usize).max(1)
    } else {
        0
    };

    // Best final rank first: score-eliminated players by descending round
    // score, then the no-guess players in join order.
    let mut batch: Vec<(UserId, u32, EliminationReason)> = guessed
        .iter()
        .take(cut)
        .rev()
        .map(|&(id, score, _)| (id, score, EliminationReason::LowScore))
        .collect();
    batch.extend(
        no_guess
            .iter()
            .map(|&id| (id, 0, EliminationReason::NoGuess)),
    );

    let alive_before = k + no_guess.len();
    let remaining = alive_before - batch.len();

    let mut eliminated = Vec::with_capacity(batch.len());
    for (ix, (user_id, round_score, reason)) in batch.into_iter().enumerate() {
        let final_rank = (remaining + ix + 1) as u32;
        if let Some(player) = session.player_mut(user_id) {
            player.is_alive = false;
            eliminated.push(EliminatedPlayer {
                user_id,
                display_name: player.display_name.clone(),
                round_score,
                reason,
                final_rank,
            });
        }
    }

    EliminationOutcome {
        eliminated,
        remaining_alive: remaining,
    }
}
