//! Deployment-level engine configuration.
//!
//! Values are fixed per deployment, loaded from `ROYALE_*` environment
//! variables with documented defaults. Invalid values are configuration
//! errors; they are never silently replaced with defaults.

use std::env;
use std::time::Duration;

use crate::domain::scoring::ScoringParams;
use crate::errors::domain::DomainError;

/// Engine-wide tunables. Per-session settings derive their defaults here.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard cap on players in one session.
    pub max_players_per_session: usize,
    /// Minimum players before the creator may start.
    pub min_players_to_start: usize,
    /// Round duration used when the create request does not override it.
    pub default_round_duration: Duration,
    /// Fraction of surviving guessers eliminated each round close.
    pub default_elimination_rate: f64,
    /// Rounds per session; also the number of locations requested at creation.
    pub max_rounds: u32,
    /// Waiting sessions are auto-cancelled after this long.
    pub lobby_timeout: Duration,
    /// Pause between a round closing and the next round starting.
    pub intermission: Duration,
    /// Finished sessions stay readable this long before removal.
    pub retention_window: Duration,
    /// Score for a perfect guess.
    pub max_score: u32,
    /// Distance at which the score has decayed by a factor of e.
    pub score_decay_km: f64,
    /// Guesses at or beyond this distance score zero.
    pub score_zero_beyond_km: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_players_per_session: 8,
            min_players_to_start: 2,
            default_round_duration: Duration::from_secs(60),
            default_elimination_rate: 0.25,
            max_rounds: 5,
            lobby_timeout: Duration::from_secs(600),
            intermission: Duration::from_secs(10),
            retention_window: Duration::from_secs(300),
            max_score: 5000,
            score_decay_km: 2000.0,
            score_zero_beyond_km: 20_000.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment on top of the defaults.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Some(v) = parsed_var::<usize>("ROYALE_MAX_PLAYERS")? {
            config.max_players_per_session = v;
        }
        if let Some(v) = parsed_var::<usize>("ROYALE_MIN_PLAYERS")? {
            config.min_players_to_start = v;
        }
        if let Some(v) = parsed_var::<u64>("ROYALE_ROUND_DURATION_SECS")? {
            config.default_round_duration = Duration::from_secs(v);
        }
        if let Some(v) = parsed_var::<f64>("ROYALE_ELIMINATION_RATE")? {
            config.default_elimination_rate = v;
        }
        if let Some(v) = parsed_var::<u32>("ROYALE_MAX_ROUNDS")? {
            config.max_rounds = v;
        }
        if let Some(v) = parsed_var::<u64>("ROYALE_LOBBY_TIMEOUT_SECS")? {
            config.lobby_timeout = Duration::from_secs(v);
        }
        if let Some(v) = parsed_var::<u64>("ROYALE_INTERMISSION_SECS")? {
            config.intermission = Duration::from_secs(v);
        }
        if let Some(v) = parsed_var::<u64>("ROYALE_RETENTION_SECS")? {
            config.retention_window = Duration::from_secs(v);
        }
        if let Some(v) = parsed_var::<u32>("ROYALE_MAX_SCORE")? {
            config.max_score = v;
        }
        if let Some(v) = parsed_var::<f64>("ROYALE_SCORE_DECAY_KM")? {
            config.score_decay_km = v;
        }
        if let Some(v) = parsed_var::<f64>("ROYALE_SCORE_ZERO_BEYOND_KM")? {
            config.score_zero_beyond_km = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make sessions unplayable.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_players_to_start < 2 {
            return Err(DomainError::config(
                "ROYALE_MIN_PLAYERS must be at least 2",
            ));
        }
        if self.max_players_per_session < self.min_players_to_start {
            return Err(DomainError::config(format!(
                "ROYALE_MAX_PLAYERS ({}) must be >= ROYALE_MIN_PLAYERS ({})",
                self.max_players_per_session, self.min_players_to_start
            )));
        }
        if self.max_rounds == 0 {
            return Err(DomainError::config("ROYALE_MAX_ROUNDS must be at least 1"));
        }
        if !(self.default_elimination_rate > 0.0 && self.default_elimination_rate < 1.0) {
            return Err(DomainError::config(format!(
                "ROYALE_ELIMINATION_RATE must be within (0, 1), got {}",
                self.default_elimination_rate
            )));
        }
        if self.default_round_duration.is_zero() {
            return Err(DomainError::config(
                "ROYALE_ROUND_DURATION_SECS must be positive",
            ));
        }
        if self.max_score == 0 {
            return Err(DomainError::config("ROYALE_MAX_SCORE must be positive"));
        }
        if self.score_decay_km <= 0.0 {
            return Err(DomainError::config(
                "ROYALE_SCORE_DECAY_KM must be positive",
            ));
        }
        if self.score_zero_beyond_km <= 0.0 {
            return Err(DomainError::config(
                "ROYALE_SCORE_ZERO_BEYOND_KM must be positive",
            ));
        }
        Ok(())
    }

    /// Scoring parameters derived from this configuration.
    pub fn scoring(&self) -> ScoringParams {
        ScoringParams {
            max_score: self.max_score,
            decay_km: self.score_decay_km,
            zero_beyond_km: self.score_zero_beyond_km,
        }
    }
}

/// Read and parse an optional environment variable.
fn parsed_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, DomainError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            DomainError::config(format!("Invalid value for '{name}': '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_score, 5000);
        assert_eq!(config.max_rounds, 5);
    }

    #[test]
    #[serial]
    fn env_overrides_are_applied() {
        std::env::set_var("ROYALE_MAX_ROUNDS", "7");
        std::env::set_var("ROYALE_ELIMINATION_RATE", "0.5");
        let config = EngineConfig::from_env().unwrap();
        std::env::remove_var("ROYALE_MAX_ROUNDS");
        std::env::remove_var("ROYALE_ELIMINATION_RATE");

        assert_eq!(config.max_rounds, 7);
        assert_eq!(config.default_elimination_rate, 0.5);
    }

    #[test]
    #[serial]
    fn invalid_env_value_is_a_config_error() {
        std::env::set_var("ROYALE_MAX_ROUNDS", "not-a-number");
        let result = EngineConfig::from_env();
        std::env::remove_var("ROYALE_MAX_ROUNDS");

        assert!(matches!(result, Err(DomainError::Config { .. })));
    }

    #[test]
    #[serial]
    fn out_of_range_elimination_rate_is_rejected() {
        std::env::set_var("ROYALE_ELIMINATION_RATE", "1.5");
        let result = EngineConfig::from_env();
        std::env::remove_var("ROYALE_ELIMINATION_RATE");

        assert!(matches!(result, Err(DomainError::Config { .. })));
    }
}
