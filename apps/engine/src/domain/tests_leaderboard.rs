use crate::domain::fixtures::session_with_players;
use crate::domain::leaderboard::{build_leaderboard, decide_winner};

#[test]
fn leaderboard_orders_by_cumulative_score_descending() {
    let mut session = session_with_players(3, 3);
    session.player_mut(1).unwrap().score = 3000;
    session.player_mut(2).unwrap().score = 4500;
    session.player_mut(3).unwrap().score = 1200;

    let board = build_leaderboard(&session);

    assert_eq!(board.len(), 3);
    assert_eq!(board[0].user_id, 2);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].user_id, 1);
    assert_eq!(board[1].rank, 2);
    assert_eq!(board[2].user_id, 3);
    assert_eq!(board[2].rank, 3);
}

#[test]
fn ties_keep_join_order() {
    let mut session = session_with_players(3, 3);
    session.player_mut(1).unwrap().score = 2000;
    session.player_mut(2).unwrap().score = 2000;
    session.player_mut(3).unwrap().score = 2000;

    let board = build_leaderboard(&session);

    let ids: Vec<i64> = board.iter().map(|e| e.user_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn ranks_are_dense_and_one_based() {
    let mut session = session_with_players(4, 3);
    session.player_mut(2).unwrap().score = 100;

    let board = build_leaderboard(&session);
    let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn eliminated_players_stay_on_the_board() {
    let mut session = session_with_players(2, 3);
    session.player_mut(2).unwrap().is_alive = false;

    let board = build_leaderboard(&session);
    assert_eq!(board.len(), 2);
    assert!(board.iter().any(|e| !e.is_alive));
}

#[test]
fn winner_is_sole_survivor() {
    let mut session = session_with_players(3, 3);
    session.player_mut(1).unwrap().is_alive = false;
    session.player_mut(3).unwrap().is_alive = false;
    // The survivor wins even with a lower score.
    session.player_mut(1).unwrap().score = 9000;
    session.player_mut(2).unwrap().score = 10;

    assert_eq!(decide_winner(&session), Some(2));
}

#[test]
fn winner_among_several_alive_is_highest_score() {
    let mut session = session_with_players(2, 3);
    session.player_mut(1).unwrap().score = 3000;
    session.player_mut(2).unwrap().score = 4500;

    assert_eq!(decide_winner(&session), Some(2));
}

#[test]
fn winner_tie_goes_to_earliest_joined() {
    let mut session = session_with_players(3, 3);
    session.player_mut(2).unwrap().score = 2500;
    session.player_mut(3).unwrap().score = 2500;
    session.player_mut(1).unwrap().score = 1000;

    assert_eq!(decide_winner(&session), Some(2));
}

#[test]
fn winner_falls_back_to_best_score_when_nobody_survives() {
    let mut session = session_with_players(2, 3);
    session.player_mut(1).unwrap().is_alive = false;
    session.player_mut(2).unwrap().is_alive = false;
    session.player_mut(2).unwrap().score = 700;

    assert_eq!(decide_winner(&session), Some(2));
}
