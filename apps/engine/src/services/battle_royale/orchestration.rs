//! Timer wiring: lobby expiry, round expiry, intermissions, retention.
//!
//! Each timer task races its sleep against the registry token armed for its
//! slot. A path that loses the race, or fires after the session has moved
//! on, logs and no-ops; it never surfaces an error into un-owned context.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use super::round_lifecycle::CloseTrigger;
use super::BattleRoyaleService;
use crate::domain::state::SessionStatus;
use crate::store::timers::TimerKind;

impl BattleRoyaleService {
    pub(super) fn schedule_lobby_timeout(&self, code: &str) {
        let Some(service) = self.weak_self.upgrade() else {
            return;
        };
        let token = self.timers.arm(code, TimerKind::Lobby);
        let code = code.to_string();
        let delay = self.config.lobby_timeout;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep(delay) => service.lobby_timeout_fired(&code),
            }
        });
    }

    fn lobby_timeout_fired(&self, code: &str) {
        let Some(shared) = self.store.get(code) else {
            return;
        };
        let still_waiting = shared.lock().status == SessionStatus::Waiting;
        if still_waiting {
            info!(code = %code, "Waiting session timed out");
            self.cancel_session(code, "waiting room timed out");
        }
    }

    pub(super) fn schedule_round_expiry(&self, code: &str, round_no: u32, duration: Duration) {
        let Some(service) = self.weak_self.upgrade() else {
            return;
        };
        let token = self.timers.arm(code, TimerKind::RoundExpiry);
        let code = code.to_string();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(code = %code, round_no, "Round expiry timer cancelled");
                }
                _ = sleep(duration) => {
                    service.close_round(&code, round_no, CloseTrigger::Expiry);
                }
            }
        });
    }

    pub(super) fn schedule_intermission(&self, code: &str, delay: Duration) {
        let Some(service) = self.weak_self.upgrade() else {
            return;
        };
        let token = self.timers.arm(code, TimerKind::Intermission);
        let code = code.to_string();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep(delay) => service.intermission_elapsed(&code),
            }
        });
    }

    /// Start the next round once the intermission elapses. No-ops when the
    /// session was cancelled or finished in the meantime.
    fn intermission_elapsed(&self, code: &str) {
        let Some(shared) = self.store.get(code) else {
            debug!(code = %code, "Intermission elapsed; session gone");
            return;
        };

        let opened = {
            let mut session = shared.lock();
            if session.status != SessionStatus::Active {
                debug!(code = %code, "Intermission elapsed; session no longer active");
                return;
            }
            if session.open_round().is_some() {
                debug!(code = %code, "Intermission elapsed; round already open");
                return;
            }
            self.open_round_locked(&mut session)
        };

        if let Some(opened) = opened {
            self.schedule_round_expiry(code, opened.round_no, opened.duration);
            self.gateway.notify_session(code, &opened.event);
        }
    }

    pub(super) fn schedule_retention(&self, code: &str) {
        let Some(service) = self.weak_self.upgrade() else {
            return;
        };
        let token = self.timers.arm(code, TimerKind::Retention);
        let code = code.to_string();
        let delay = self.config.retention_window;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep(delay) => service.retention_elapsed(&code),
            }
        });
    }

    /// Reap a finished session once its retention window has elapsed.
    fn retention_elapsed(&self, code: &str) {
        let finished = self
            .store
            .get(code)
            .map(|shared| shared.lock().status == SessionStatus::Finished)
            .unwrap_or(false);
        if finished {
            self.store.remove(code);
            self.timers.cancel_all(code);
            info!(code = %code, "Finished session retired from store");
        }
    }
}
