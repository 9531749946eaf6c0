//! Player actions during an active session.

use time::OffsetDateTime;
use tracing::debug;

use super::round_lifecycle::CloseTrigger;
use super::BattleRoyaleService;
use crate::domain::geo::{haversine_km, Coordinates};
use crate::domain::scoring::score_for_distance;
use crate::domain::snapshot::GuessReceipt;
use crate::domain::state::{Guess, SessionStatus, UserId};
use crate::errors::domain::{ConflictKind, DomainError, InvalidStateKind, NotFoundKind};
use crate::store::timers::TimerKind;

impl BattleRoyaleService {
    /// Accept and score a guess for the open round.
    ///
    /// When the accepted guess is the last one outstanding among alive
    /// players, the expiry timer is cancelled and the round closes
    /// immediately.
    pub fn submit_guess(
        &self,
        code: &str,
        user_id: UserId,
        latitude: f64,
        longitude: f64,
    ) -> Result<GuessReceipt, DomainError> {
        let shared = self.store.require(code)?;

        let (receipt, close_early) = {
            let mut session = shared.lock();
            if session.status != SessionStatus::Active {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::SessionNotActive,
                    format!("Session '{code}' is not running"),
                ));
            }

            let round_no = session.current_round_no;
            let target = session
                .target_for_round(round_no)
                .map(|t| t.coords)
                .ok_or_else(|| {
                    DomainError::not_found(
                        NotFoundKind::Round,
                        format!("Round {round_no} has no target"),
                    )
                })?;

            match session.player(user_id) {
                None => {
                    return Err(DomainError::invalid_state(
                        InvalidStateKind::PlayerIneligible,
                        "Caller is not a member of this session",
                    ));
                }
                Some(player) if !player.is_alive => {
                    return Err(DomainError::invalid_state(
                        InvalidStateKind::PlayerIneligible,
                        "Caller has been eliminated",
                    ));
                }
                Some(_) => {}
            }

            let alive = session.alive_count();
            let params = self.config.scoring();

            let (submitted, guess) = {
                let Some(round) = session.open_round_mut() else {
                    return Err(DomainError::not_found(
                        NotFoundKind::Round,
                        "No round is currently open",
                    ));
                };
                if round.guesses.contains_key(&user_id) {
                    return Err(DomainError::conflict(
                        ConflictKind::DuplicateGuess,
                        format!("A guess for round {round_no} was already accepted"),
                    ));
                }

                let distance_km = haversine_km(Coordinates::new(latitude, longitude), target);
                let guess = Guess {
                    user_id,
                    latitude,
                    longitude,
                    distance_km,
                    score: score_for_distance(distance_km, &params),
                    submitted_at: OffsetDateTime::now_utc(),
                };
                round.guesses.insert(user_id, guess.clone());
                round.submission_order.push(user_id);
                (round.guesses.len(), guess)
            };

            // Membership was checked above, so the lookup cannot miss.
            let player = session.player_mut(user_id).ok_or_else(|| {
                DomainError::invalid_state(
                    InvalidStateKind::PlayerIneligible,
                    "Caller is not a member of this session",
                )
            })?;
            player.score += guess.score;
            let receipt = GuessReceipt {
                round_no,
                distance_km: guess.distance_km,
                score: guess.score,
                total_score: player.score,
            };
            player.guesses.insert(round_no, guess);

            debug!(
                code = %code,
                user_id,
                round_no,
                score = receipt.score,
                submitted,
                alive,
                "Guess accepted"
            );
            (receipt, submitted >= alive)
        };

        if close_early {
            // Cancel the competing timer before closing; the close itself is
            // a no-op if the timer beat us to it.
            self.timers.cancel(code, TimerKind::RoundExpiry);
            self.close_round(code, receipt.round_no, CloseTrigger::AllSubmitted);
        }
        Ok(receipt)
    }
}
