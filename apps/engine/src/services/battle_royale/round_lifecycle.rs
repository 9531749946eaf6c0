//! Round open, round close, and session finish.

use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::BattleRoyaleService;
use crate::domain::elimination::{apply_round_elimination, EliminationReason};
use crate::domain::leaderboard::{build_leaderboard, decide_winner};
use crate::domain::snapshot::{LocationPublic, LocationRevealed, PlayerPublic};
use crate::domain::state::{Round, Session, SessionStatus, UserId};
use crate::realtime::events::{EliminatedSummary, GameEvent};
use crate::store::timers::TimerKind;

/// Which path triggered a round close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CloseTrigger {
    /// The round-expiry timer fired.
    Expiry,
    /// The last alive player's guess arrived.
    AllSubmitted,
}

/// A freshly opened round, ready for expiry scheduling and announcement.
pub(super) struct OpenedRound {
    pub event: GameEvent,
    pub round_no: u32,
    pub duration: Duration,
}

/// What the close path must do after releasing the session lock.
enum FollowUp {
    NextRoundAfter(Duration),
    Retire,
}

impl BattleRoyaleService {
    /// Open the round `session.current_round_no`. Returns `None` when no
    /// target location backs the round number.
    pub(super) fn open_round_locked(&self, session: &mut Session) -> Option<OpenedRound> {
        let round_no = session.current_round_no;
        let Some(target) = session.target_for_round(round_no) else {
            warn!(code = %session.code, round_no, "No target location for round");
            return None;
        };
        let location = LocationPublic::from(target);
        let duration = session.settings.round_duration;
        session
            .rounds
            .push(Round::open(round_no, location.clone(), duration));

        let alive_count = session.alive_count() as u32;
        info!(code = %session.code, round_no, alive_count, "Round started");
        Some(OpenedRound {
            event: GameEvent::RoundStarted {
                round_no,
                location,
                duration_secs: duration.as_secs(),
                alive_count,
            },
            round_no,
            duration,
        })
    }

    /// Close a round. Runs at most once per round no matter which trigger
    /// arrives first or how often it is invoked; late and duplicate calls
    /// are benign no-ops.
    pub(super) fn close_round(&self, code: &str, round_no: u32, trigger: CloseTrigger) {
        // Disarm the competing trigger before touching state.
        self.timers.cancel(code, TimerKind::RoundExpiry);

        let Some(shared) = self.store.get(code) else {
            debug!(code = %code, round_no, ?trigger, "Round close skipped; session gone");
            return;
        };

        let mut eliminated_notices: Vec<(UserId, GameEvent)> = Vec::new();
        let (round_ended, finish_event, follow_up) = {
            let mut session = shared.lock();
            if session.status != SessionStatus::Active || session.current_round_no != round_no {
                debug!(code = %code, round_no, ?trigger, "Round close skipped; state moved on");
                return;
            }
            let Some(revealed) = session.target_for_round(round_no).map(LocationRevealed::from)
            else {
                warn!(code = %code, round_no, "No target backing an open round");
                return;
            };
            // One-shot guard: only the first trigger sees the round open.
            {
                let Some(round) = session.open_round_mut() else {
                    debug!(
                        code = %code,
                        round_no,
                        ?trigger,
                        "Round already closed; duplicate trigger ignored"
                    );
                    return;
                };
                round.ended_at = Some(OffsetDateTime::now_utc());
            }

            let rate = session.settings.elimination_rate;
            let outcome = apply_round_elimination(&mut session, round_no, rate);

            for e in &outcome.eliminated {
                eliminated_notices.push((
                    e.user_id,
                    GameEvent::PlayerEliminated {
                        round_no,
                        round_score: e.round_score,
                        final_rank: e.final_rank,
                    },
                ));
            }
            let eliminated: Vec<EliminatedSummary> = outcome
                .eliminated
                .iter()
                .map(|e| EliminatedSummary {
                    user_id: e.user_id,
                    display_name: e.display_name.clone(),
                    round_score: e.round_score,
                    final_rank: e.final_rank,
                    guessed: e.reason != EliminationReason::NoGuess,
                })
                .collect();
            info!(
                code = %code,
                round_no,
                ?trigger,
                eliminated = eliminated.len(),
                remaining = outcome.remaining_alive,
                "Round closed"
            );

            let round_ended = GameEvent::RoundEnded {
                round_no,
                location: revealed,
                eliminated,
                remaining_alive: outcome.remaining_alive as u32,
                leaderboard: build_leaderboard(&session),
            };

            if outcome.remaining_alive <= 1 || round_no >= session.max_rounds {
                let finish_event = self.finish_session_locked(&mut session);
                (round_ended, Some(finish_event), FollowUp::Retire)
            } else {
                session.current_round_no += 1;
                (
                    round_ended,
                    None,
                    FollowUp::NextRoundAfter(self.config.intermission),
                )
            }
        };

        self.gateway.notify_session(code, &round_ended);
        for (user_id, event) in &eliminated_notices {
            self.gateway.notify_user(*user_id, event);
        }
        if let Some(event) = &finish_event {
            self.gateway.notify_session(code, event);
        }

        match follow_up {
            FollowUp::NextRoundAfter(delay) => self.schedule_intermission(code, delay),
            FollowUp::Retire => {
                self.timers.cancel_all(code);
                self.schedule_retention(code);
            }
        }
    }

    /// Terminal transition; requires the session lock to be held.
    fn finish_session_locked(&self, session: &mut Session) -> GameEvent {
        session.status = SessionStatus::Finished;
        session.finished_at = Some(OffsetDateTime::now_utc());
        session.winner = decide_winner(session);

        // Memberships release immediately so players can join a new session
        // while this one stays readable through the retention window.
        let code = session.code.clone();
        for player in &session.players {
            self.store.release_membership_for(player.user_id, &code);
        }

        let winner = session
            .winner
            .and_then(|id| session.player(id))
            .map(PlayerPublic::from);
        info!(code = %code, winner = ?session.winner, "Session finished");
        GameEvent::SessionEnded {
            winner,
            leaderboard: build_leaderboard(session),
            reason: "completed".to_string(),
        }
    }
}
