//! Test fixtures and helpers for integration testing

use courtside::config::AppConfig;
use courtside::lobby::manager::{CreateLobby, LobbyManager};
use courtside::service::AppState;
use courtside::store::memory::{InMemoryClubStore, InMemoryLobbyStore, InMemoryPlayerStore};
use courtside::store::player::PlayerStore;
use courtside::types::{Club, Player, SkillLevel};
use courtside::utils::current_timestamp;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// A registered player with a deterministic profile
pub fn test_player(id: &str) -> Player {
    Player {
        id: id.to_string(),
        name: format!("Player {id}"),
        skill_level: Some(SkillLevel::A2),
        profile_picture: None,
        city: Some("Galway".to_string()),
        external_auth_id: Some(format!("auth-{id}")),
        email: Some(format!("{id}@example.com")),
    }
}

pub fn test_club(id: &str) -> Club {
    Club {
        id: id.to_string(),
        name: format!("Club {id}"),
        address: "1 Quay St".to_string(),
        city: "Galway".to_string(),
        slug: Some(id.to_string()),
    }
}

/// A start time offset from now, so listings have a stable order
pub fn start_in_hours(hours: i64) -> DateTime<Utc> {
    current_timestamp() + Duration::hours(hours)
}

/// A creation request with the usual defaults
pub fn create_request(creator_id: &str, start_at: DateTime<Utc>) -> CreateLobby {
    CreateLobby {
        creator_id: creator_id.to_string(),
        start_at,
        duration_minutes: 90,
        club_id: None,
        court_name: None,
        max_players_by_side: None,
        visibility: None,
    }
}

/// Integration test setup that wires a complete system over in-memory
/// stores, with players p1..p5 registered
pub async fn create_test_system() -> (
    LobbyManager,
    Arc<InMemoryLobbyStore>,
    Arc<InMemoryPlayerStore>,
    Arc<InMemoryClubStore>,
) {
    let lobby_store = Arc::new(InMemoryLobbyStore::new());
    let player_store = Arc::new(InMemoryPlayerStore::new());
    let club_store = Arc::new(InMemoryClubStore::new());

    for id in ["p1", "p2", "p3", "p4", "p5"] {
        player_store.upsert(test_player(id)).await.unwrap();
    }

    let manager = LobbyManager::new(
        lobby_store.clone(),
        player_store.clone(),
        club_store.clone(),
    );

    (manager, lobby_store, player_store, club_store)
}

/// A fully wired application over in-memory stores, for HTTP-level tests
pub fn create_test_app() -> AppState {
    AppState::new(AppConfig::default())
}
