use crate::domain::scoring::{score_for_distance, ScoringParams};

#[test]
fn perfect_guess_earns_max_score() {
    let params = ScoringParams::default();
    assert_eq!(score_for_distance(0.0, &params), 5000);
}

#[test]
fn score_at_one_decay_constant() {
    let params = ScoringParams::default();
    // 5000 / e = 1839.397... -> rounds to 1839
    assert_eq!(score_for_distance(2000.0, &params), 1839);
}

#[test]
fn score_is_zero_at_and_beyond_cutoff() {
    let params = ScoringParams::default();
    assert_eq!(score_for_distance(20_000.0, &params), 0);
    assert_eq!(score_for_distance(30_000.0, &params), 0);
}

#[test]
fn score_is_monotone_non_increasing_over_samples() {
    let params = ScoringParams::default();
    let distances = [0.0, 1.0, 10.0, 100.0, 500.0, 2000.0, 5000.0, 19_999.0, 20_000.0];
    let scores: Vec<u32> = distances
        .iter()
        .map(|d| score_for_distance(*d, &params))
        .collect();
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1], "scores not monotone: {scores:?}");
    }
}

#[test]
fn custom_max_score_is_respected() {
    let params = ScoringParams {
        max_score: 1000,
        ..ScoringParams::default()
    };
    assert_eq!(score_for_distance(0.0, &params), 1000);
    assert!(score_for_distance(100.0, &params) < 1000);
}
