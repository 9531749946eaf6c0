//! Distance-to-score mapping.

/// Parameters for the exponential score decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Score for a perfect guess.
    pub max_score: u32,
    /// Distance at which the score has decayed by a factor of e.
    pub decay_km: f64,
    /// Guesses at or beyond this distance score zero.
    pub zero_beyond_km: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_score: 5000,
            decay_km: 2000.0,
            zero_beyond_km: 20_000.0,
        }
    }
}

/// Score for a guess `distance_km` away from the target.
///
/// `round(max_score * e^(-distance / decay_km))`, with a hard zero at and
/// beyond `zero_beyond_km`. Distance 0 scores `max_score`; the score is
/// monotonically non-increasing in distance.
pub fn score_for_distance(distance_km: f64, params: &ScoringParams) -> u32 {
    if distance_km >= params.zero_beyond_km {
        return 0;
    }
    let raw = f64::from(params.max_score) * (-distance_km / params.decay_km).exp();
    raw.round() as u32
}
