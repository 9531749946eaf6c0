//! Property tests for the scoring curve (pure domain).

use proptest::prelude::*;

use crate::domain::scoring::{score_for_distance, ScoringParams};
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the score never exceeds the configured maximum.
    #[test]
    fn prop_score_bounded_by_max(
        distance in 0.0f64..25_000.0,
        max_score in 100u32..=10_000,
    ) {
        let params = ScoringParams { max_score, ..ScoringParams::default() };
        let score = score_for_distance(distance, &params);
        prop_assert!(score <= max_score,
            "score {score} exceeds max {max_score} at distance {distance}");
    }

    /// Property: the score is monotonically non-increasing in distance.
    #[test]
    fn prop_score_monotone_in_distance(
        d1 in 0.0f64..25_000.0,
        d2 in 0.0f64..25_000.0,
    ) {
        let params = ScoringParams::default();
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(
            score_for_distance(near, &params) >= score_for_distance(far, &params),
            "score increased between {near} and {far}"
        );
    }

    /// Property: anything at or beyond the cutoff scores zero.
    #[test]
    fn prop_cutoff_is_hard_zero(
        beyond in 0.0f64..10_000.0,
    ) {
        let params = ScoringParams::default();
        let score = score_for_distance(params.zero_beyond_km + beyond, &params);
        prop_assert_eq!(score, 0);
    }
}
