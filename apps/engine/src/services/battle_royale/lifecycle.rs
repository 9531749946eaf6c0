//! Session lifecycle: create, join, leave, start, cancel.

use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::{BattleRoyaleService, CreateSessionRequest};
use crate::domain::leaderboard::build_leaderboard;
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{Player, Session, SessionSettings, SessionStatus, UserId};
use crate::errors::domain::{
    CapacityKind, ConflictKind, DomainError, InvalidStateKind, NotFoundKind,
};
use crate::realtime::events::GameEvent;
use crate::store::timers::TimerKind;
use crate::utils::session_code::generate_session_code;

const MAX_CODE_ATTEMPTS: usize = 16;

impl BattleRoyaleService {
    /// Create a new waiting session with the caller as its first player.
    ///
    /// Pulls `max_rounds` candidate locations up front so the target list is
    /// fixed for the whole session, and schedules the lobby auto-cancel so
    /// abandoned lobbies never linger.
    pub async fn create_session(
        &self,
        creator_id: UserId,
        display_name: impl Into<String>,
        transport_handle: Uuid,
        request: CreateSessionRequest,
    ) -> Result<SessionSnapshot, DomainError> {
        let settings = self.resolve_settings(request)?;

        let required = self.config.max_rounds as usize;
        let locations = self
            .locations
            .get_candidate_locations(
                required,
                settings.difficulty.as_deref(),
                settings.category.as_deref(),
            )
            .await?;
        if locations.len() < required {
            return Err(DomainError::upstream(format!(
                "Location provider returned {} of {required} required locations",
                locations.len()
            )));
        }

        // Creating a session while a member elsewhere moves the membership.
        if let Some(current) = self.store.membership(creator_id) {
            self.detach_member(&current, creator_id);
        }

        let display_name = display_name.into();
        let mut last_err = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_session_code();
            let creator = Player::new(creator_id, display_name.clone(), transport_handle);
            let session = Session::new(code.clone(), creator, locations.clone(), settings.clone());
            match self.store.insert(session) {
                Ok(shared) => {
                    self.store.bind_membership(creator_id, &code);
                    self.schedule_lobby_timeout(&code);
                    info!(code = %code, creator_id, rounds = required, "Session created");
                    return Ok(SessionSnapshot::of(&shared.lock()));
                }
                Err(err) => {
                    debug!(code = %code, "Session code collision; retrying");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            DomainError::conflict(
                ConflictKind::CodeCollision,
                "Could not allocate a unique session code",
            )
        }))
    }

    /// Join a waiting session, or idempotently reconnect to one the caller
    /// already belongs to.
    pub fn join_session(
        &self,
        code: &str,
        user_id: UserId,
        display_name: impl Into<String>,
        transport_handle: Uuid,
    ) -> Result<SessionSnapshot, DomainError> {
        let shared = self.store.require(code)?;

        // A membership in a different session is released first.
        if let Some(current) = self.store.membership(user_id) {
            if current != code {
                self.detach_member(&current, user_id);
            }
        }

        let (snapshot, joined) = {
            let mut session = shared.lock();

            if let Some(player) = session.player_mut(user_id) {
                // Reconnect: refresh the handle, never duplicate the player.
                player.transport_handle = transport_handle;
                player.connected = true;
                debug!(code = %code, user_id, "Player reconnected");
                (SessionSnapshot::of(&session), None)
            } else {
                if session.status != SessionStatus::Waiting {
                    return Err(DomainError::invalid_state(
                        InvalidStateKind::SessionNotJoinable,
                        format!("Session '{code}' is no longer accepting players"),
                    ));
                }
                if session.players.len() >= self.config.max_players_per_session {
                    return Err(DomainError::capacity(
                        CapacityKind::SessionFull,
                        format!(
                            "Session '{code}' is at its cap of {} players",
                            self.config.max_players_per_session
                        ),
                    ));
                }
                let display_name = display_name.into();
                session
                    .players
                    .push(Player::new(user_id, display_name.clone(), transport_handle));
                let event = GameEvent::PlayerJoined {
                    user_id,
                    display_name,
                    player_count: session.players.len() as u32,
                };
                (SessionSnapshot::of(&session), Some(event))
            }
        };

        self.store.bind_membership(user_id, code);
        if let Some(event) = joined {
            info!(code = %code, user_id, "Player joined session");
            self.gateway.notify_session(code, &event);
        }
        Ok(snapshot)
    }

    /// Leave a session. Waiting lobbies drop the player outright; active
    /// sessions only mark them disconnected so rounds and rankings still
    /// reference them. Returns whether the caller was a member.
    pub fn leave_session(&self, code: &str, user_id: UserId) -> Result<bool, DomainError> {
        let shared = self.store.require(code)?;

        let mut lobby_emptied = false;
        let left = {
            let mut session = shared.lock();
            match session.status {
                SessionStatus::Waiting => {
                    let Some(ix) = session.players.iter().position(|p| p.user_id == user_id)
                    else {
                        return Ok(false);
                    };
                    let player = session.players.remove(ix);
                    lobby_emptied = session.players.is_empty();
                    Some(GameEvent::PlayerLeft {
                        user_id,
                        display_name: player.display_name,
                        player_count: session.players.len() as u32,
                    })
                }
                SessionStatus::Active => {
                    let Some(player) = session.player_mut(user_id) else {
                        return Ok(false);
                    };
                    player.connected = false;
                    let display_name = player.display_name.clone();
                    Some(GameEvent::PlayerLeft {
                        user_id,
                        display_name,
                        player_count: session.players.len() as u32,
                    })
                }
                SessionStatus::Finished => None,
            }
        };

        let was_member = left.is_some();
        self.store.release_membership_for(user_id, code);
        if let Some(event) = left {
            info!(code = %code, user_id, "Player left session");
            self.gateway.notify_session(code, &event);
        }
        if lobby_emptied {
            // The last player walked out of the lobby; nothing to keep.
            self.cancel_session(code, "lobby abandoned");
        }
        Ok(was_member)
    }

    /// Start a waiting session. Creator-only; begins round 1 immediately.
    pub fn start_session(
        &self,
        code: &str,
        requester_id: UserId,
    ) -> Result<SessionSnapshot, DomainError> {
        let shared = self.store.require(code)?;

        let (snapshot, opened) = {
            let mut session = shared.lock();
            if session.status != SessionStatus::Waiting {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::AlreadyStarted,
                    format!("Session '{code}' has already been started"),
                ));
            }
            if requester_id != session.creator_id {
                return Err(DomainError::permission_denied(
                    "Only the session creator may start it",
                ));
            }
            if session.players.len() < self.config.min_players_to_start {
                return Err(DomainError::capacity(
                    CapacityKind::NotEnoughPlayers,
                    format!(
                        "Need at least {} players to start, have {}",
                        self.config.min_players_to_start,
                        session.players.len()
                    ),
                ));
            }

            session.status = SessionStatus::Active;
            session.started_at = Some(OffsetDateTime::now_utc());
            session.current_round_no = 1;
            let opened = self.open_round_locked(&mut session).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Round, "No target location for round 1")
            })?;
            (SessionSnapshot::of(&session), opened)
        };

        self.timers.cancel(code, TimerKind::Lobby);
        self.schedule_round_expiry(code, opened.round_no, opened.duration);
        self.gateway.notify_session(code, &opened.event);
        Ok(snapshot)
    }

    /// Cancel and remove a session. Safe to call repeatedly; later calls are
    /// no-ops.
    pub fn cancel_session(&self, code: &str, reason: &str) -> bool {
        self.timers.cancel_all(code);
        let Some(shared) = self.store.remove(code) else {
            return false;
        };

        let event = {
            let mut session = shared.lock();
            session.status = SessionStatus::Finished;
            session.finished_at = Some(OffsetDateTime::now_utc());
            GameEvent::SessionEnded {
                winner: None,
                leaderboard: build_leaderboard(&session),
                reason: reason.to_string(),
            }
        };
        info!(code = %code, reason, "Session cancelled");
        self.gateway.notify_session(code, &event);
        true
    }

    fn resolve_settings(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionSettings, DomainError> {
        let round_duration = request
            .round_duration
            .unwrap_or(self.config.default_round_duration);
        if round_duration.is_zero() {
            return Err(DomainError::validation("round_duration must be positive"));
        }
        let elimination_rate = request
            .elimination_rate
            .unwrap_or(self.config.default_elimination_rate);
        if !(elimination_rate > 0.0 && elimination_rate < 1.0) {
            return Err(DomainError::validation(format!(
                "elimination_rate must be within (0, 1), got {elimination_rate}"
            )));
        }
        Ok(SessionSettings {
            difficulty: request.difficulty,
            category: request.category,
            round_duration,
            elimination_rate,
        })
    }

    /// Release a user's membership in `code` as part of moving them to a
    /// different session.
    fn detach_member(&self, code: &str, user_id: UserId) {
        if let Err(err) = self.leave_session(code, user_id) {
            debug!(code = %code, user_id, error = %err, "Stale membership during detach");
        }
    }
}
