//! Domain-level error type used across services and the store.
//!
//! This error type is transport-agnostic. Embedding layers should map it to
//! their own response format via [`DomainError::code`], which yields the
//! canonical [`ErrorCode`] and its retry classification.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Round,
}

/// Operations attempted outside their legal session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    /// Join attempted on a session that is no longer in its lobby.
    SessionNotJoinable,
    /// Guess or round operation on a session that is not running.
    SessionNotActive,
    /// Start attempted on a session that already left the lobby.
    AlreadyStarted,
    /// Caller is not a member of the session or has been eliminated.
    PlayerIneligible,
}

/// Semantic conflict kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicateGuess,
    DuplicateJoin,
    CodeCollision,
}

/// Capacity limit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CapacityKind {
    SessionFull,
    NotEnoughPlayers,
}

/// Central domain error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    #[error("validation error: {detail}")]
    Validation { detail: String },
    /// Missing resource in domain terms
    #[error("not found {kind:?}: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    /// Operation outside its legal state
    #[error("invalid state {kind:?}: {detail}")]
    InvalidState {
        kind: InvalidStateKind,
        detail: String,
    },
    /// Creator-only action attempted by another player
    #[error("permission denied: {detail}")]
    PermissionDenied { detail: String },
    /// Session full or below the starting minimum
    #[error("capacity {kind:?}: {detail}")]
    CapacityExceeded { kind: CapacityKind, detail: String },
    /// Semantic conflict
    #[error("conflict {kind:?}: {detail}")]
    Conflict { kind: ConflictKind, detail: String },
    /// The location provider could not satisfy the request
    #[error("upstream unavailable: {detail}")]
    UpstreamUnavailable { detail: String },
    /// Deployment configuration problem
    #[error("configuration error: {detail}")]
    Config { detail: String },
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            kind,
            detail: detail.into(),
        }
    }

    pub fn permission_denied(detail: impl Into<String>) -> Self {
        Self::PermissionDenied {
            detail: detail.into(),
        }
    }

    pub fn capacity(kind: CapacityKind, detail: impl Into<String>) -> Self {
        Self::CapacityExceeded {
            kind,
            detail: detail.into(),
        }
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Canonical error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { .. } => ErrorCode::ValidationError,
            DomainError::NotFound { kind, .. } => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::Round => ErrorCode::RoundNotFound,
            },
            DomainError::InvalidState { kind, .. } => match kind {
                InvalidStateKind::SessionNotJoinable => ErrorCode::SessionNotJoinable,
                InvalidStateKind::SessionNotActive => ErrorCode::SessionNotActive,
                InvalidStateKind::AlreadyStarted => ErrorCode::AlreadyStarted,
                InvalidStateKind::PlayerIneligible => ErrorCode::PlayerIneligible,
            },
            DomainError::PermissionDenied { .. } => ErrorCode::NotCreator,
            DomainError::CapacityExceeded { kind, .. } => match kind {
                CapacityKind::SessionFull => ErrorCode::SessionFull,
                CapacityKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
            },
            DomainError::Conflict { kind, .. } => match kind {
                ConflictKind::DuplicateGuess => ErrorCode::DuplicateGuess,
                ConflictKind::DuplicateJoin => ErrorCode::DuplicateJoin,
                ConflictKind::CodeCollision => ErrorCode::CodeCollision,
            },
            DomainError::UpstreamUnavailable { .. } => ErrorCode::InsufficientLocations,
            DomainError::Config { .. } => ErrorCode::ConfigError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::error_code::RetryAdvice;

    #[test]
    fn code_mapping_covers_each_kind() {
        assert_eq!(
            DomainError::not_found(NotFoundKind::Session, "x").code(),
            ErrorCode::SessionNotFound
        );
        assert_eq!(
            DomainError::not_found(NotFoundKind::Round, "x").code(),
            ErrorCode::RoundNotFound
        );
        assert_eq!(
            DomainError::invalid_state(InvalidStateKind::SessionNotJoinable, "x").code(),
            ErrorCode::SessionNotJoinable
        );
        assert_eq!(
            DomainError::permission_denied("x").code(),
            ErrorCode::NotCreator
        );
        assert_eq!(
            DomainError::capacity(CapacityKind::SessionFull, "x").code(),
            ErrorCode::SessionFull
        );
        assert_eq!(
            DomainError::conflict(ConflictKind::DuplicateGuess, "x").code(),
            ErrorCode::DuplicateGuess
        );
        assert_eq!(
            DomainError::upstream("x").code(),
            ErrorCode::InsufficientLocations
        );
    }

    #[test]
    fn callers_can_distinguish_rejection_classes() {
        // Conflicts and capacity limits are worth retrying.
        assert_eq!(
            DomainError::conflict(ConflictKind::DuplicateGuess, "x")
                .code()
                .retry_advice(),
            RetryAdvice::TryAgain
        );
        assert_eq!(
            DomainError::capacity(CapacityKind::NotEnoughPlayers, "x")
                .code()
                .retry_advice(),
            RetryAdvice::TryAgain
        );
        // Gone or state-mismatched sessions are not.
        assert_eq!(
            DomainError::not_found(NotFoundKind::Session, "x")
                .code()
                .retry_advice(),
            RetryAdvice::SessionOver
        );
        assert_eq!(
            DomainError::invalid_state(InvalidStateKind::SessionNotActive, "x")
                .code()
                .retry_advice(),
            RetryAdvice::SessionOver
        );
        // Creator-only operations are a permission problem.
        assert_eq!(
            DomainError::permission_denied("x").code().retry_advice(),
            RetryAdvice::NotAllowed
        );
    }
}
