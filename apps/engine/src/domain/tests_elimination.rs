use crate::domain::elimination::{apply_round_elimination, EliminationReason};
use crate::domain::fixtures::{open_round, record_guess, session_with_players};

#[test]
fn four_players_at_rate_point_two_lose_exactly_one() {
    // floor(4 * 0.2) = 0, forced up to the minimum of 1.
    let mut session = session_with_players(4, 3);
    open_round(&mut session, 1);
    record_guess(&mut session, 1, 1, 4000);
    record_guess(&mut session, 1, 2, 3000);
    record_guess(&mut session, 1, 3, 2000);
    record_guess(&mut session, 1, 4, 1000);

    let outcome = apply_round_elimination(&mut session, 1, 0.2);

    assert_eq!(outcome.eliminated.len(), 1);
    assert_eq!(outcome.remaining_alive, 3);
    assert_eq!(outcome.eliminated[0].user_id, 4);
    assert_eq!(outcome.eliminated[0].reason, EliminationReason::LowScore);
    assert_eq!(outcome.eliminated[0].final_rank, 4);
    assert!(!session.player(4).unwrap().is_alive);
}

#[test]
fn elimination_count_follows_the_floor_rule() {
    // floor(8 * 0.25) = 2
    let mut session = session_with_players(8, 3);
    open_round(&mut session, 1);
    for user_id in 1..=8 {
        record_guess(&mut session, 1, user_id, (user_id as u32) * 500);
    }

    let outcome = apply_round_elimination(&mut session, 1, 0.25);

    assert_eq!(outcome.eliminated.len(), 2);
    assert_eq!(outcome.remaining_alive, 6);
    let ids: Vec<i64> = outcome.eliminated.iter().map(|e| e.user_id).collect();
    // Users 1 and 2 hold the two lowest round scores.
    assert!(ids.contains(&1) && ids.contains(&2));
}

#[test]
fn players_without_a_guess_are_eliminated_unconditionally() {
    let mut session = session_with_players(3, 3);
    open_round(&mut session, 1);
    record_guess(&mut session, 1, 1, 2500);
    record_guess(&mut session, 1, 2, 1500);
    // Player 3 never guesses.

    let outcome = apply_round_elimination(&mut session, 1, 0.25);

    // Only two players guessed, so the rate-based cut does not apply.
    assert_eq!(outcome.eliminated.len(), 1);
    assert_eq!(outcome.eliminated[0].user_id, 3);
    assert_eq!(outcome.eliminated[0].reason, EliminationReason::NoGuess);
    assert_eq!(outcome.remaining_alive, 2);
    assert!(session.player(1).unwrap().is_alive);
    assert!(session.player(2).unwrap().is_alive);
}

#[test]
fn two_guessers_are_never_rate_eliminated() {
    let mut session = session_with_players(2, 3);
    open_round(&mut session, 1);
    record_guess(&mut session, 1, 1, 100);
    record_guess(&mut session, 1, 2, 5000);

    let outcome = apply_round_elimination(&mut session, 1, 0.5);

    assert!(outcome.eliminated.is_empty());
    assert_eq!(outcome.remaining_alive, 2);
}

#[test]
fn score_ties_eliminate_the_earlier_submission() {
    let mut session = session_with_players(4, 3);
    open_round(&mut session, 1);
    // Submission order: 1, 2, 3, 4. Players 2 and 3 tie at the bottom.
    record_guess(&mut session, 1, 1, 4000);
    record_guess(&mut session, 1, 2, 1000);
    record_guess(&mut session, 1, 3, 1000);
    record_guess(&mut session, 1, 4, 3000);

    let outcome = apply_round_elimination(&mut session, 1, 0.25);

    assert_eq!(outcome.eliminated.len(), 1);
    assert_eq!(
        outcome.eliminated[0].user_id, 2,
        "earlier submission should lose the tie"
    );
}

#[test]
fn no_guess_eliminations_rank_below_score_eliminations() {
    let mut session = session_with_players(5, 3);
    open_round(&mut session, 1);
    record_guess(&mut session, 1, 1, 4000);
    record_guess(&mut session, 1, 2, 3000);
    record_guess(&mut session, 1, 3, 2000);
    record_guess(&mut session, 1, 4, 1000);
    // Player 5 never guesses.

    // floor(4 * 0.25) = 1 score elimination (player 4) + player 5 by absence.
    let outcome = apply_round_elimination(&mut session, 1, 0.25);

    assert_eq!(outcome.eliminated.len(), 2);
    assert_eq!(outcome.remaining_alive, 3);
    assert_eq!(outcome.eliminated[0].user_id, 4);
    assert_eq!(outcome.eliminated[0].final_rank, 4);
    assert_eq!(outcome.eliminated[1].user_id, 5);
    assert_eq!(outcome.eliminated[1].final_rank, 5);
}

#[test]
fn dead_players_are_excluded_from_the_math() {
    let mut session = session_with_players(5, 3);
    session.player_mut(5).unwrap().is_alive = false;
    open_round(&mut session, 1);
    record_guess(&mut session, 1, 1, 4000);
    record_guess(&mut session, 1, 2, 3000);
    record_guess(&mut session, 1, 3, 2000);
    record_guess(&mut session, 1, 4, 1000);

    let outcome = apply_round_elimination(&mut session, 1, 0.25);

    // k = 4 alive guessers; the already-dead player neither counts nor
    // reappears in the outcome.
    assert_eq!(outcome.eliminated.len(), 1);
    assert_eq!(outcome.eliminated[0].user_id, 4);
    assert_eq!(outcome.remaining_alive, 3);
}

#[test]
fn unknown_round_is_a_no_op() {
    let mut session = session_with_players(3, 3);
    let outcome = apply_round_elimination(&mut session, 9, 0.25);
    assert!(outcome.eliminated.is_empty());
    assert_eq!(session.alive_count(), 3);
}
