#![allow(dead_code)]

//! Shared harness for engine integration tests.

use std::sync::Arc;
use std::time::Duration;

use engine::domain::state::TargetLocation;
use engine::{
    BattleRoyaleService, CreateSessionRequest, EngineConfig, RecordingGateway,
    StaticLocationProvider,
};
use engine_test_support::unique_helpers::unique_display_name;
use uuid::Uuid;

pub struct Harness {
    pub service: Arc<BattleRoyaleService>,
    pub gateway: Arc<RecordingGateway>,
    /// The provider pool, in round order, so tests know the true targets.
    pub targets: Vec<TargetLocation>,
}

/// Small, fast settings for test games.
pub fn quick_config() -> EngineConfig {
    EngineConfig {
        min_players_to_start: 2,
        max_rounds: 3,
        default_round_duration: Duration::from_secs(30),
        intermission: Duration::from_secs(5),
        lobby_timeout: Duration::from_secs(120),
        retention_window: Duration::from_secs(60),
        ..EngineConfig::default()
    }
}

pub fn harness(config: EngineConfig) -> Harness {
    let provider = StaticLocationProvider::with_world_cities();
    let targets = provider.pool().to_vec();
    let gateway = Arc::new(RecordingGateway::new());
    let service = BattleRoyaleService::new(gateway.clone(), Arc::new(provider), config);
    Harness {
        service,
        gateway,
        targets,
    }
}

impl Harness {
    pub async fn create(&self, creator_id: i64) -> String {
        self.service
            .create_session(
                creator_id,
                unique_display_name("Creator"),
                Uuid::new_v4(),
                CreateSessionRequest::default(),
            )
            .await
            .unwrap()
            .code
    }

    pub fn join(&self, code: &str, user_id: i64) {
        self.service
            .join_session(code, user_id, unique_display_name("Player"), Uuid::new_v4())
            .unwrap();
    }

    /// Create with user 1 as creator, join users `2..=players`, start.
    pub async fn started(&self, players: i64) -> String {
        let code = self.create(1).await;
        for user_id in 2..=players {
            self.join(&code, user_id);
        }
        self.service.start_session(&code, 1).unwrap();
        code
    }

    /// Guess the exact target of a round (0-based target index).
    pub fn guess_exact(&self, code: &str, user_id: i64, target_ix: usize) {
        let coords = self.targets[target_ix].coords;
        self.service
            .submit_guess(code, user_id, coords.latitude, coords.longitude)
            .unwrap();
    }

    /// Guess `offset_deg` degrees of longitude away from a round's target;
    /// larger offsets score lower.
    pub fn guess_offset(&self, code: &str, user_id: i64, target_ix: usize, offset_deg: f64) {
        let coords = self.targets[target_ix].coords;
        self.service
            .submit_guess(code, user_id, coords.latitude, coords.longitude + offset_deg)
            .unwrap();
    }

    pub fn alive_count(&self, code: &str) -> usize {
        self.service
            .session_snapshot(code)
            .unwrap()
            .players
            .iter()
            .filter(|p| p.is_alive)
            .count()
    }
}

/// Let spawned timer tasks run to completion after a paused-clock advance.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
