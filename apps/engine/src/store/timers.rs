//! Cancellable timer slots, one per session and purpose.
//!
//! Timer tasks race their sleep against the token held in their slot. Arming
//! an occupied slot cancels the previous token first, so a session can never
//! have two pending timers of the same kind.

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

/// The timers a session can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Auto-cancel for lobbies that never start.
    Lobby,
    /// Expiry of the currently open round.
    RoundExpiry,
    /// Delay between a round closing and the next one starting.
    Intermission,
    /// Removal of a finished session from the store.
    Retention,
}

#[derive(Default)]
pub struct TimerRegistry {
    slots: DashMap<(String, TimerKind), CancellationToken>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Arm a slot, cancelling any token already occupying it. The returned
    /// token is what the timer task must race against its sleep.
    pub fn arm(&self, code: &str, kind: TimerKind) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.slots.insert((code.to_string(), kind), token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Disarm one slot. Harmless when the slot is empty or the timer has
    /// already fired.
    pub fn cancel(&self, code: &str, kind: TimerKind) {
        if let Some((_, token)) = self.slots.remove(&(code.to_string(), kind)) {
            token.cancel();
        }
    }

    /// Disarm every slot a session holds. Used on cancel/finish/removal so a
    /// stale timer can never act on a removed or reused code.
    pub fn cancel_all(&self, code: &str) {
        self.slots.retain(|slot, token| {
            if slot.0.as_str() == code {
                token.cancel();
                false
            } else {
                true
            }
        });
    }

    /// Whether a slot currently holds a token.
    pub fn is_armed(&self, code: &str, kind: TimerKind) -> bool {
        self.slots.contains_key(&(code.to_string(), kind))
    }
}
