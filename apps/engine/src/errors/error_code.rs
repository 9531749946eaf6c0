//! Error codes for the engine's public surface.
//!
//! This module defines all error codes surfaced by engine operations.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings a
//! transport layer should put on the wire.

use core::fmt;

/// How the caller of a rejected operation should interpret the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAdvice {
    /// Transient or input-level rejection; the operation may succeed later.
    TryAgain,
    /// The session or round this targeted is gone or past the legal state.
    SessionOver,
    /// The caller is not permitted to perform this operation.
    NotAllowed,
}

/// Centralized error codes for the session engine.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Session code is unknown to the store
    SessionNotFound,
    /// No round matches, or no round is open
    RoundNotFound,

    // Illegal State
    /// Session has left its lobby and cannot be joined
    SessionNotJoinable,
    /// Session is not running
    SessionNotActive,
    /// Session has already been started
    AlreadyStarted,
    /// Caller is not a member or has been eliminated
    PlayerIneligible,

    // Permissions
    /// Creator-only operation attempted by another player
    NotCreator,

    // Capacity
    /// Session is at its player cap
    SessionFull,
    /// Too few players to start
    NotEnoughPlayers,

    // Business Logic Conflicts
    /// A guess for this round was already accepted from this player
    DuplicateGuess,
    /// Concurrent join raced an existing membership
    DuplicateJoin,
    /// Generated session code already exists
    CodeCollision,

    // Upstream
    /// Location provider returned fewer candidates than required
    InsufficientLocations,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::SessionNotJoinable => "SESSION_NOT_JOINABLE",
            Self::SessionNotActive => "SESSION_NOT_ACTIVE",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::PlayerIneligible => "PLAYER_INELIGIBLE",
            Self::NotCreator => "NOT_CREATOR",
            Self::SessionFull => "SESSION_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::DuplicateGuess => "DUPLICATE_GUESS",
            Self::DuplicateJoin => "DUPLICATE_JOIN",
            Self::CodeCollision => "CODE_COLLISION",
            Self::InsufficientLocations => "INSUFFICIENT_LOCATIONS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Retry classification, so callers can distinguish "try again" from
    /// "this session is over" from "you're not allowed".
    pub const fn retry_advice(&self) -> RetryAdvice {
        match self {
            Self::SessionNotFound
            | Self::RoundNotFound
            | Self::SessionNotJoinable
            | Self::SessionNotActive
            | Self::AlreadyStarted
            | Self::PlayerIneligible => RetryAdvice::SessionOver,

            Self::NotCreator => RetryAdvice::NotAllowed,

            Self::SessionFull
            | Self::NotEnoughPlayers
            | Self::DuplicateGuess
            | Self::DuplicateJoin
            | Self::CodeCollision
            | Self::InsufficientLocations
            | Self::ValidationError => RetryAdvice::TryAgain,

            // Requires a deployment fix; retry once the operator intervenes.
            Self::ConfigError => RetryAdvice::TryAgain,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        // Verify that all error codes produce the expected SCREAMING_SNAKE_CASE strings
        assert_eq!(ErrorCode::SessionNotFound.as_str(), "SESSION_NOT_FOUND");
        assert_eq!(ErrorCode::RoundNotFound.as_str(), "ROUND_NOT_FOUND");
        assert_eq!(
            ErrorCode::SessionNotJoinable.as_str(),
            "SESSION_NOT_JOINABLE"
        );
        assert_eq!(ErrorCode::SessionNotActive.as_str(), "SESSION_NOT_ACTIVE");
        assert_eq!(ErrorCode::AlreadyStarted.as_str(), "ALREADY_STARTED");
        assert_eq!(ErrorCode::PlayerIneligible.as_str(), "PLAYER_INELIGIBLE");
        assert_eq!(ErrorCode::NotCreator.as_str(), "NOT_CREATOR");
        assert_eq!(ErrorCode::SessionFull.as_str(), "SESSION_FULL");
        assert_eq!(ErrorCode::NotEnoughPlayers.as_str(), "NOT_ENOUGH_PLAYERS");
        assert_eq!(ErrorCode::DuplicateGuess.as_str(), "DUPLICATE_GUESS");
        assert_eq!(ErrorCode::DuplicateJoin.as_str(), "DUPLICATE_JOIN");
        assert_eq!(ErrorCode::CodeCollision.as_str(), "CODE_COLLISION");
        assert_eq!(
            ErrorCode::InsufficientLocations.as_str(),
            "INSUFFICIENT_LOCATIONS"
        );
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::SessionNotFound), "SESSION_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::DuplicateGuess), "DUPLICATE_GUESS");
    }
}
