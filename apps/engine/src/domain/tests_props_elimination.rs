//! Property tests for elimination math (pure domain, no timers).
//!
//! Ruleset contract:
//! - Players who did not guess are always eliminated.
//! - With more than two guessing players, exactly
//!   `max(1, floor(k * rate))` of them are eliminated.
//! - Every eliminated round score is <= every surviving round score.
//! - `is_alive` never flips back to true.

use proptest::prelude::*;

use crate::domain::elimination::{apply_round_elimination, EliminationReason};
use crate::domain::fixtures::{open_round, record_guess, session_with_players};
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: elimination count law for k > 2 guessing players.
    #[test]
    fn prop_elimination_count_law(
        scores in prop::collection::vec(0u32..=5000, 3..=10),
        rate in 0.05f64..0.95,
    ) {
        let k = scores.len();
        let mut session = session_with_players(k, 1);
        open_round(&mut session, 1);
        for (ix, score) in scores.iter().enumerate() {
            record_guess(&mut session, 1, ix as i64 + 1, *score);
        }

        let outcome = apply_round_elimination(&mut session, 1, rate);

        let expected = std::cmp::max(1, ((k as f64) * rate).floor() as usize);
        prop_assert_eq!(outcome.eliminated.len(), expected,
            "k={}, rate={}", k, rate);
        prop_assert_eq!(outcome.remaining_alive, k - expected);
        for e in &outcome.eliminated {
            prop_assert_eq!(e.reason, EliminationReason::LowScore);
        }
    }

    /// Property: eliminated round scores never beat surviving round scores.
    #[test]
    fn prop_eliminated_scores_are_the_worst(
        scores in prop::collection::vec(0u32..=5000, 3..=10),
        rate in 0.05f64..0.95,
    ) {
        let k = scores.len();
        let mut session = session_with_players(k, 1);
        open_round(&mut session, 1);
        for (ix, score) in scores.iter().enumerate() {
            record_guess(&mut session, 1, ix as i64 + 1, *score);
        }

        let outcome = apply_round_elimination(&mut session, 1, rate);

        let worst_survivor = session
            .players
            .iter()
            .filter(|p| p.is_alive)
            .map(|p| p.guesses[&1].score)
            .min();
        if let Some(min_survivor) = worst_survivor {
            for e in &outcome.eliminated {
                prop_assert!(e.round_score <= min_survivor,
                    "eliminated score {} beats surviving score {min_survivor}",
                    e.round_score);
            }
        }
    }

    /// Property: already-dead players never come back.
    #[test]
    fn prop_is_alive_is_monotonic(
        scores in prop::collection::vec(0u32..=5000, 4..=10),
        rate in 0.05f64..0.95,
        dead_ix in 0usize..4,
    ) {
        let k = scores.len();
        let mut session = session_with_players(k, 1);
        let dead_id = dead_ix as i64 + 1;
        session.player_mut(dead_id).unwrap().is_alive = false;
        open_round(&mut session, 1);
        for (ix, score) in scores.iter().enumerate() {
            let user_id = ix as i64 + 1;
            if user_id != dead_id {
                record_guess(&mut session, 1, user_id, *score);
            }
        }

        let outcome = apply_round_elimination(&mut session, 1, rate);

        prop_assert!(!session.player(dead_id).unwrap().is_alive);
        prop_assert!(outcome.eliminated.iter().all(|e| e.user_id != dead_id),
            "a dead player was eliminated again");
    }

    /// Property: final ranks fill the slots directly below the survivors,
    /// contiguously.
    #[test]
    fn prop_final_ranks_are_contiguous(
        scores in prop::collection::vec(0u32..=5000, 3..=10),
        rate in 0.05f64..0.95,
    ) {
        let k = scores.len();
        let mut session = session_with_players(k, 1);
        open_round(&mut session, 1);
        for (ix, score) in scores.iter().enumerate() {
            record_guess(&mut session, 1, ix as i64 + 1, *score);
        }

        let outcome = apply_round_elimination(&mut session, 1, rate);

        let mut expected_rank = outcome.remaining_alive as u32 + 1;
        for e in &outcome.eliminated {
            prop_assert_eq!(e.final_rank, expected_rank);
            expected_rank += 1;
        }
        prop_assert_eq!(expected_rank as usize, k + 1);
    }
}
