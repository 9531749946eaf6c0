//! In-memory session store and player membership index.
//!
//! The store owns the only shared mutable structures in the engine: the
//! code -> session map and the player -> session index. Per-session state is
//! serialized behind one mutex per session; operations on different sessions
//! never contend with each other.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::state::{Session, UserId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, SharedSession>,
    memberships: DashMap<UserId, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            memberships: DashMap::new(),
        }
    }

    /// Insert a new session under its code. Fails on a code collision so the
    /// caller can regenerate and retry.
    pub fn insert(&self, session: Session) -> Result<SharedSession, DomainError> {
        let code = session.code.clone();
        match self.sessions.entry(code.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::CodeCollision,
                format!("Session code '{code}' already in use"),
            )),
            Entry::Vacant(slot) => {
                let shared = Arc::new(Mutex::new(session));
                slot.insert(shared.clone());
                Ok(shared)
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<SharedSession> {
        self.sessions.get(code).map(|entry| entry.value().clone())
    }

    pub fn require(&self, code: &str) -> Result<SharedSession, DomainError> {
        self.get(code).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("Unknown session code '{code}'"))
        })
    }

    /// Remove a session and release every membership still pointing at it.
    pub fn remove(&self, code: &str) -> Option<SharedSession> {
        let removed = self.sessions.remove(code).map(|(_, shared)| shared);
        if removed.is_some() {
            self.memberships
                .retain(|_, bound_code| bound_code.as_str() != code);
        }
        removed
    }

    pub fn contains(&self, code: &str) -> bool {
        self.sessions.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Point a user's single membership at `code`. Returns the code of the
    /// different session the user previously belonged to, if any.
    pub fn bind_membership(&self, user_id: UserId, code: &str) -> Option<String> {
        let previous = self.memberships.insert(user_id, code.to_string());
        previous.filter(|bound_code| bound_code.as_str() != code)
    }

    /// Release a user's membership only if it still points at `code`. Guards
    /// against unbinding a membership the user has since moved elsewhere.
    pub fn release_membership_for(&self, user_id: UserId, code: &str) -> bool {
        self.memberships
            .remove_if(&user_id, |_, bound_code| bound_code.as_str() == code)
            .is_some()
    }

    /// The session code a user currently belongs to.
    pub fn membership(&self, user_id: UserId) -> Option<String> {
        self.memberships.get(&user_id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;

    fn waiting_session(code: &str) -> Session {
        let mut session = fixtures::session_with_players(1, 3);
        session.code = code.to_string();
        session
    }

    #[test]
    fn insert_rejects_duplicate_codes() {
        let store = SessionStore::new();
        store.insert(waiting_session("AAAAAA")).unwrap();

        let result = store.insert(waiting_session("AAAAAA"));
        assert!(matches!(
            result,
            Err(DomainError::Conflict {
                kind: ConflictKind::CodeCollision,
                ..
            })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn require_reports_unknown_codes() {
        let store = SessionStore::new();
        let result = store.require("NOPE42");
        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                kind: NotFoundKind::Session,
                ..
            })
        ));
    }

    #[test]
    fn remove_releases_memberships() {
        let store = SessionStore::new();
        store.insert(waiting_session("AAAAAA")).unwrap();
        store.bind_membership(1, "AAAAAA");
        store.bind_membership(2, "AAAAAA");

        store.remove("AAAAAA");

        assert!(store.membership(1).is_none());
        assert!(store.membership(2).is_none());
        assert!(!store.contains("AAAAAA"));
    }

    #[test]
    fn bind_reports_previous_different_session() {
        let store = SessionStore::new();
        assert_eq!(store.bind_membership(1, "AAAAAA"), None);
        // Re-binding to the same session is not a move.
        assert_eq!(store.bind_membership(1, "AAAAAA"), None);
        assert_eq!(store.bind_membership(1, "BBBBBB"), Some("AAAAAA".into()));
    }

    #[test]
    fn release_is_scoped_to_the_named_session() {
        let store = SessionStore::new();
        store.bind_membership(1, "BBBBBB");

        assert!(!store.release_membership_for(1, "AAAAAA"));
        assert_eq!(store.membership(1), Some("BBBBBB".into()));
        assert!(store.release_membership_for(1, "BBBBBB"));
        assert!(store.membership(1).is_none());
    }
}
