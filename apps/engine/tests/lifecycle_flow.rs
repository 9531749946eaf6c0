//! Integration flows for session lifecycle operations: create, join, leave,
//! start, cancel, and the lobby timeout.

mod common;

use std::time::Duration;

use common::{harness, quick_config, settle};
use engine::{DomainError, ErrorCode, GameEvent, RetryAdvice, SessionStatus};
use engine_test_support::logging;
use uuid::Uuid;

#[tokio::test(start_paused = true)]
async fn create_join_start_happy_path() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;

    let snapshot = h.service.session_snapshot(&code).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Waiting);
    assert_eq!(snapshot.current_round_no, 0);
    assert_eq!(snapshot.max_rounds, 3);
    assert_eq!(snapshot.creator_id, 1);

    h.join(&code, 2);
    h.join(&code, 3);

    let snapshot = h.service.start_session(&code, 1).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Active);
    assert_eq!(snapshot.current_round_no, 1);
    assert!(snapshot.current_location.is_some());
    assert!(snapshot.round_deadline_unix.is_some());
    assert_eq!(snapshot.players.len(), 3);

    let names = h.gateway.session_event_names(&code);
    assert_eq!(
        names,
        vec!["player-joined", "player-joined", "round-started"]
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_session_codes_are_not_found() {
    logging::init();
    let h = harness(quick_config());

    let err = h
        .service
        .join_session("ZZZZZZ", 9, "Nobody", Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    assert_eq!(err.code().retry_advice(), RetryAdvice::SessionOver);
}

#[tokio::test(start_paused = true)]
async fn only_the_creator_can_start() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;
    h.join(&code, 2);

    let err = h.service.start_session(&code, 2).unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied { .. }));
    assert_eq!(err.code(), ErrorCode::NotCreator);
    assert_eq!(err.code().retry_advice(), RetryAdvice::NotAllowed);

    // The failed start changed nothing.
    let snapshot = h.service.session_snapshot(&code).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Waiting);
}

#[tokio::test(start_paused = true)]
async fn starting_below_the_minimum_is_rejected() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;

    let err = h.service.start_session(&code, 1).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotEnoughPlayers);
    assert_eq!(err.code().retry_advice(), RetryAdvice::TryAgain);
}

#[tokio::test(start_paused = true)]
async fn starting_twice_is_rejected() {
    logging::init();
    let h = harness(quick_config());
    let code = h.started(2).await;

    let err = h.service.start_session(&code, 1).unwrap_err();
    assert!(matches!(err, DomainError::InvalidState { .. }));
    assert_eq!(err.code(), ErrorCode::AlreadyStarted);
}

#[tokio::test(start_paused = true)]
async fn a_full_lobby_rejects_joins() {
    logging::init();
    let mut config = quick_config();
    config.max_players_per_session = 2;
    let h = harness(config);
    let code = h.create(1).await;
    h.join(&code, 2);

    let err = h
        .service
        .join_session(&code, 3, "Latecomer", Uuid::new_v4())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionFull);
    assert_eq!(err.code().retry_advice(), RetryAdvice::TryAgain);
}

#[tokio::test(start_paused = true)]
async fn non_members_cannot_join_an_active_session() {
    logging::init();
    let h = harness(quick_config());
    let code = h.started(2).await;

    let err = h
        .service
        .join_session(&code, 9, "Latecomer", Uuid::new_v4())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotJoinable);
}

#[tokio::test(start_paused = true)]
async fn rejoining_is_an_idempotent_reconnect() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;
    h.join(&code, 2);

    // Second join with a fresh transport handle must not duplicate.
    let snapshot = h
        .service
        .join_session(&code, 2, "Player Two", Uuid::new_v4())
        .unwrap();
    assert_eq!(snapshot.players.len(), 2);

    let joined_events = h
        .gateway
        .session_events()
        .into_iter()
        .filter(|(_, e)| matches!(e, GameEvent::PlayerJoined { user_id: 2, .. }))
        .count();
    assert_eq!(joined_events, 1);
}

#[tokio::test(start_paused = true)]
async fn members_can_reconnect_after_the_game_starts() {
    logging::init();
    let h = harness(quick_config());
    let code = h.started(2).await;

    assert!(h.service.leave_session(&code, 2).unwrap());
    let snapshot = h.service.session_snapshot(&code).unwrap();
    let player = snapshot.players.iter().find(|p| p.user_id == 2).unwrap();
    assert!(!player.connected);
    assert!(player.is_alive, "leaving an active game is not elimination");

    h.service
        .join_session(&code, 2, "Player Two", Uuid::new_v4())
        .unwrap();
    let snapshot = h.service.session_snapshot(&code).unwrap();
    let player = snapshot.players.iter().find(|p| p.user_id == 2).unwrap();
    assert!(player.connected);
}

#[tokio::test(start_paused = true)]
async fn joining_elsewhere_releases_the_previous_membership() {
    logging::init();
    let h = harness(quick_config());
    let first = h.create(1).await;
    h.join(&first, 2);

    let second = h.create(3).await;
    h.join(&second, 2);

    assert_eq!(h.service.session_for_user(2), Some(second.clone()));
    let snapshot = h.service.session_snapshot(&first).unwrap();
    assert!(snapshot.players.iter().all(|p| p.user_id != 2));

    let left_first = h
        .gateway
        .session_events()
        .into_iter()
        .any(|(code, e)| code == first && matches!(e, GameEvent::PlayerLeft { user_id: 2, .. }));
    assert!(left_first, "the first session should see a player-left");
}

#[tokio::test(start_paused = true)]
async fn leaving_a_waiting_lobby_removes_the_player() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;
    h.join(&code, 2);

    assert!(h.service.leave_session(&code, 2).unwrap());
    let snapshot = h.service.session_snapshot(&code).unwrap();
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(h.service.session_for_user(2), None);

    // Leaving again reports non-membership without failing.
    assert!(!h.service.leave_session(&code, 2).unwrap());
}

#[tokio::test(start_paused = true)]
async fn the_last_player_leaving_cancels_the_lobby() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;

    assert!(h.service.leave_session(&code, 1).unwrap());

    let err = h.service.session_snapshot(&code).unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    let names = h.gateway.session_event_names(&code);
    assert!(names.contains(&"session-ended"));
}

#[tokio::test(start_paused = true)]
async fn lobbies_that_never_start_time_out() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;
    h.join(&code, 2);

    tokio::time::sleep(Duration::from_secs(121)).await;
    settle().await;

    let err = h.service.session_snapshot(&code).unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    assert_eq!(h.service.session_for_user(1), None);
    assert_eq!(h.service.session_for_user(2), None);

    let ended = h
        .gateway
        .session_events()
        .into_iter()
        .any(|(c, e)| c == code && matches!(e, GameEvent::SessionEnded { winner: None, .. }));
    assert!(ended, "a timed-out lobby announces its end");
}

#[tokio::test(start_paused = true)]
async fn started_lobbies_do_not_time_out() {
    logging::init();
    let mut config = quick_config();
    // A round long enough that only the lobby timer could fire in this test.
    config.default_round_duration = Duration::from_secs(600);
    let h = harness(config);
    let code = h.started(2).await;

    tokio::time::sleep(Duration::from_secs(121)).await;
    settle().await;

    // Still present; round 1 is still open on its own timer.
    let snapshot = h.service.session_snapshot(&code).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Active);
    assert_eq!(snapshot.current_round_no, 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_is_idempotent() {
    logging::init();
    let h = harness(quick_config());
    let code = h.create(1).await;

    assert!(h.service.cancel_session(&code, "operator request"));
    assert!(!h.service.cancel_session(&code, "operator request"));
    assert_eq!(
        h.service.session_snapshot(&code).unwrap_err().code(),
        ErrorCode::SessionNotFound
    );
}
