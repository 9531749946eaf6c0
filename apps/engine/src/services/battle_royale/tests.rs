//! Service-level tests for the close-once guarantee. Full flows live in the
//! integration tests; these exercise the internal trigger paths directly.

use std::sync::Arc;

use uuid::Uuid;

use super::round_lifecycle::CloseTrigger;
use super::{BattleRoyaleService, CreateSessionRequest};
use crate::config::engine::EngineConfig;
use crate::providers::locations::StaticLocationProvider;
use crate::realtime::gateway::RecordingGateway;

fn config() -> EngineConfig {
    EngineConfig {
        min_players_to_start: 2,
        max_rounds: 3,
        ..EngineConfig::default()
    }
}

async fn started_session(
    gateway: Arc<RecordingGateway>,
    players: i64,
) -> (Arc<BattleRoyaleService>, String) {
    let provider = Arc::new(StaticLocationProvider::with_world_cities());
    let service = BattleRoyaleService::new(gateway, provider, config());
    let snapshot = service
        .create_session(1, "Creator", Uuid::new_v4(), CreateSessionRequest::default())
        .await
        .unwrap();
    let code = snapshot.code;
    for user_id in 2..=players {
        service
            .join_session(&code, user_id, format!("Player {user_id}"), Uuid::new_v4())
            .unwrap();
    }
    service.start_session(&code, 1).unwrap();
    (service, code)
}

#[tokio::test]
async fn closing_a_closed_round_changes_nothing() {
    let gateway = Arc::new(RecordingGateway::new());
    let (service, code) = started_session(gateway.clone(), 4).await;

    // Everyone guesses; the fourth guess closes round 1 early.
    service.submit_guess(&code, 1, 48.8566, 2.3522).unwrap();
    service.submit_guess(&code, 2, 51.5074, -0.1278).unwrap();
    service.submit_guess(&code, 3, 35.6762, 139.6503).unwrap();
    service.submit_guess(&code, 4, -33.8688, 151.2093).unwrap();

    let names = gateway.session_event_names(&code);
    assert_eq!(names.iter().filter(|n| **n == "round-ended").count(), 1);
    let snapshot = service.session_snapshot(&code).unwrap();
    let alive_after = snapshot.players.iter().filter(|p| p.is_alive).count();
    assert_eq!(alive_after, 3);

    // Both triggers fire again on the already-closed round.
    service.close_round(&code, 1, CloseTrigger::Expiry);
    service.close_round(&code, 1, CloseTrigger::AllSubmitted);

    let names = gateway.session_event_names(&code);
    assert_eq!(names.iter().filter(|n| **n == "round-ended").count(), 1);
    let snapshot = service.session_snapshot(&code).unwrap();
    assert_eq!(
        snapshot.players.iter().filter(|p| p.is_alive).count(),
        alive_after
    );
    let eliminated_notices = gateway.user_events().len();
    assert_eq!(eliminated_notices, 1);
}

#[tokio::test]
async fn close_for_a_gone_session_is_a_quiet_no_op() {
    let gateway = Arc::new(RecordingGateway::new());
    let (service, code) = started_session(gateway.clone(), 2).await;

    service.cancel_session(&code, "test teardown");
    let events_after_cancel = gateway.session_events().len();

    service.close_round(&code, 1, CloseTrigger::Expiry);

    assert_eq!(gateway.session_events().len(), events_after_cancel);
}
