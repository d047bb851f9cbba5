//! Integration tests for the courtside booking service
//!
//! These tests validate the system working together, including:
//! - Complete lobby lifecycle workflows (create, fill, reopen, delete)
//! - Persistence round-trips through the row mapping
//! - Filter parity between row-level and in-memory evaluation
//! - The HTTP surface and its error translation

// Modules for organizing tests
mod fixtures;

use courtside::error::LobbyError;
use courtside::lobby::filter::LobbyFilters;
use courtside::store::club::ClubStore;
use courtside::store::lobby::LobbyStore;
use courtside::types::{LobbyStatus, Side};

use fixtures::{create_request, create_test_system, start_in_hours, test_club};

#[tokio::test]
async fn test_complete_lobby_lifecycle() {
    let (manager, _, _, _) = create_test_system().await;

    // Create an empty lobby; the creator is recorded, not seated
    let lobby = manager
        .create_lobby(create_request("p1", start_in_hours(2)))
        .await
        .unwrap();
    assert_eq!(lobby.status(), LobbyStatus::Open);
    assert_eq!(lobby.players().count(), 0);

    let id = lobby.id();

    // Fill both sides: creator joins left explicitly, then three more
    manager.join_lobby(id, "p1", Side::Left).await.unwrap();
    manager.join_lobby(id, "p2", Side::Left).await.unwrap();
    manager.join_lobby(id, "p3", Side::Right).await.unwrap();
    let confirmed = manager.join_lobby(id, "p4", Side::Right).await.unwrap();
    assert_eq!(confirmed.status(), LobbyStatus::Confirmed);
    assert!(confirmed.is_full());

    // A fifth player bounces off the full lobby on either side
    for side in [Side::Left, Side::Right] {
        let err = manager.join_lobby(id, "p5", side).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LobbyError>(),
            Some(LobbyError::LobbyFull { .. })
        ));
    }

    // Leaving reopens the lobby and frees exactly one seat
    let reopened = manager.leave_lobby(id, "p2").await.unwrap();
    assert_eq!(reopened.status(), LobbyStatus::Open);
    assert_eq!(reopened.side_slots(Side::Left).len(), 1);
    assert_eq!(reopened.side_slots(Side::Left)[0].id(), "p1");

    // Now p5 fits
    let refilled = manager.join_lobby(id, "p5", Side::Left).await.unwrap();
    assert_eq!(refilled.status(), LobbyStatus::Confirmed);

    manager.delete_lobby(id).await.unwrap();
    let err = manager.get_lobby(id).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LobbyError>(),
        Some(LobbyError::LobbyNotFound { .. })
    ));
}

#[tokio::test]
async fn test_domain_rule_violations_surface_as_typed_errors() {
    let (manager, _, _, _) = create_test_system().await;
    let lobby = manager
        .create_lobby(create_request("p1", start_in_hours(1)))
        .await
        .unwrap();
    let id = lobby.id();

    manager.join_lobby(id, "p2", Side::Left).await.unwrap();

    // Same player again, even on the other side
    for side in [Side::Left, Side::Right] {
        let err = manager.join_lobby(id, "p2", side).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LobbyError>(),
            Some(LobbyError::PlayerAlreadyPresent { .. })
        ));
    }

    // Target side at capacity while the lobby is still open
    manager.join_lobby(id, "p3", Side::Left).await.unwrap();
    let err = manager.join_lobby(id, "p4", Side::Left).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LobbyError>(),
        Some(LobbyError::LobbyFull { .. })
    ));

    // Leaving without being seated
    let err = manager.leave_lobby(id, "p5").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LobbyError>(),
        Some(LobbyError::PlayerNotInLobby { .. })
    ));

    // The failed operations left membership untouched
    let loaded = manager.get_lobby(id).await.unwrap();
    assert_eq!(loaded.side_slots(Side::Left).len(), 2);
    assert!(loaded.side_slots(Side::Right).is_empty());
}

#[tokio::test]
async fn test_persistence_round_trip_preserves_membership_and_status() {
    let (manager, lobby_store, _, _) = create_test_system().await;

    let lobby = manager
        .create_lobby(create_request("p1", start_in_hours(1)))
        .await
        .unwrap();
    let id = lobby.id();
    manager.join_lobby(id, "p1", Side::Left).await.unwrap();
    manager.join_lobby(id, "p2", Side::Left).await.unwrap();
    manager.join_lobby(id, "p3", Side::Right).await.unwrap();
    let saved = manager.join_lobby(id, "p4", Side::Right).await.unwrap();

    let loaded = lobby_store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded.status(), saved.status());
    assert_eq!(loaded.max_players_by_side(), saved.max_players_by_side());
    for side in [Side::Left, Side::Right] {
        let mut expected: Vec<String> = saved
            .side_slots(side)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        let mut actual: Vec<String> = loaded
            .side_slots(side)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual, "{side} side membership differs");
    }
}

#[tokio::test]
async fn test_filter_parity_between_row_and_memory_evaluation() {
    let (manager, lobby_store, _, club_store) = create_test_system().await;
    club_store.upsert(test_club("club-1")).await.unwrap();
    club_store.upsert(test_club("club-2")).await.unwrap();

    // A mixed set: different clubs, creators, times and fullness
    let mut request = create_request("p1", start_in_hours(3));
    request.club_id = Some("club-1".to_string());
    let open_club1 = manager.create_lobby(request).await.unwrap();

    let mut request = create_request("p2", start_in_hours(1));
    request.club_id = Some("club-1".to_string());
    request.max_players_by_side = Some(1);
    let full_club1 = manager.create_lobby(request).await.unwrap();
    manager
        .join_lobby(full_club1.id(), "p3", Side::Left)
        .await
        .unwrap();
    manager
        .join_lobby(full_club1.id(), "p4", Side::Right)
        .await
        .unwrap();

    let mut request = create_request("p2", start_in_hours(2));
    request.club_id = Some("club-2".to_string());
    let open_club2 = manager.create_lobby(request).await.unwrap();

    let filter_variants = vec![
        LobbyFilters::default(),
        LobbyFilters {
            status: Some(LobbyStatus::Open),
            club_id: Some("club-1".to_string()),
            ..LobbyFilters::default()
        },
        LobbyFilters {
            created_by: Some("p2".to_string()),
            ..LobbyFilters::default()
        },
        LobbyFilters {
            available_only: Some(true),
            ..LobbyFilters::default()
        },
        LobbyFilters {
            start_after: Some(start_in_hours(1)),
            start_before: Some(start_in_hours(3)),
            ..LobbyFilters::default()
        },
    ];

    let everything = lobby_store.list(&LobbyFilters::default()).await.unwrap();
    assert_eq!(everything.len(), 3);

    for filters in filter_variants {
        // Row-level evaluation inside the store
        let from_store = lobby_store.list(&filters).await.unwrap();
        // In-memory evaluation over the reconstructed aggregates
        let in_memory = filters.apply(everything.clone());

        let store_ids: Vec<_> = from_store.iter().map(|l| l.id()).collect();
        let memory_ids: Vec<_> = in_memory.iter().map(|l| l.id()).collect();
        assert_eq!(store_ids, memory_ids, "paths disagree for {filters:?}");

        // Ascending by start time in both cases
        assert!(from_store
            .windows(2)
            .all(|w| w[0].start_at() <= w[1].start_at()));
    }

    // Spot-check one variant against the known fixture set
    let open_at_club1 = lobby_store
        .list(&LobbyFilters {
            status: Some(LobbyStatus::Open),
            club_id: Some("club-1".to_string()),
            ..LobbyFilters::default()
        })
        .await
        .unwrap();
    assert_eq!(open_at_club1.len(), 1);
    assert_eq!(open_at_club1[0].id(), open_club1.id());
    let _ = open_club2;
}

mod http {
    //! HTTP surface tests driving the axum router directly

    use super::fixtures::{create_test_app, test_player};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn register_players(router: &Router, ids: &[&str]) {
        for id in ids {
            let (status, _) = send(
                router,
                post("/players", serde_json::to_value(test_player(id)).unwrap()),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
    }

    async fn create_lobby(router: &Router, creator: &str) -> String {
        let (status, body) = send(
            router,
            post(
                "/lobbies",
                json!({
                    "creatorId": creator,
                    "startAt": "2026-09-01T18:00:00Z",
                    "durationMinutes": 90,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_join_and_confirm_over_http() {
        let app = create_test_app();
        let router = app.router();
        register_players(&router, &["p1", "p2", "p3", "p4"]).await;

        let id = create_lobby(&router, "p1").await;

        for (player, side) in [
            ("p1", "left"),
            ("p2", "left"),
            ("p3", "right"),
        ] {
            let (status, body) = send(
                &router,
                post(
                    &format!("/lobbies/{id}/join"),
                    json!({ "playerId": player, "side": side }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "open");
        }

        let (status, body) = send(
            &router,
            post(
                &format!("/lobbies/{id}/join"),
                json!({ "playerId": "p4", "side": "right" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "confirmed");
        assert_eq!(body["leftSide"].as_array().unwrap().len(), 2);
        assert_eq!(body["rightSide"].as_array().unwrap().len(), 2);

        // Detail view resolves registered players
        let (status, body) = send(&router, get(&format!("/lobbies/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["playerCount"]["total"], 4);
        assert_eq!(body["leftSide"][0]["kind"], "resolved");
    }

    #[tokio::test]
    async fn test_error_translation_over_http() {
        let app = create_test_app();
        let router = app.router();
        register_players(&router, &["p1", "p2", "p3", "p4", "p5"]).await;

        // Unknown creator: 404
        let (status, _) = send(
            &router,
            post(
                "/lobbies",
                json!({
                    "creatorId": "ghost",
                    "startAt": "2026-09-01T18:00:00Z",
                    "durationMinutes": 90,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Schema violation: 400
        let (status, _) = send(
            &router,
            post(
                "/lobbies",
                json!({
                    "creatorId": "p1",
                    "startAt": "2026-09-01T18:00:00Z",
                    "durationMinutes": 0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let id = create_lobby(&router, "p1").await;
        for (player, side) in [
            ("p1", "left"),
            ("p2", "left"),
            ("p3", "right"),
            ("p4", "right"),
        ] {
            let (status, _) = send(
                &router,
                post(
                    &format!("/lobbies/{id}/join"),
                    json!({ "playerId": player, "side": side }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        // Full lobby: conflict
        let (status, body) = send(
            &router,
            post(
                &format!("/lobbies/{id}/join"),
                json!({ "playerId": "p5", "side": "left" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("full"));

        // Duplicate seat: conflict
        let (status, _) = send(
            &router,
            post(
                &format!("/lobbies/{id}/leave"),
                json!({ "playerId": "p2" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(
            &router,
            post(
                &format!("/lobbies/{id}/join"),
                json!({ "playerId": "p1", "side": "left" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Leaving while not seated: conflict
        let (status, _) = send(
            &router,
            post(
                &format!("/lobbies/{id}/leave"),
                json!({ "playerId": "p2" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Unknown lobby: 404
        let missing = uuid::Uuid::new_v4();
        let (status, _) = send(
            &router,
            post(
                &format!("/lobbies/{missing}/join"),
                json!({ "playerId": "p5", "side": "left" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_delete_and_health_over_http() {
        let app = create_test_app();
        let router = app.router();
        register_players(&router, &["p1", "p2"]).await;

        let first = create_lobby(&router, "p1").await;
        let second = create_lobby(&router, "p2").await;

        let (status, body) = send(&router, get("/lobbies")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&router, get("/lobbies?createdBy=p2")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], second.as_str());

        // includePlayers switches the list to the detail shape
        let (status, body) = send(&router, get("/lobbies?includePlayers=true")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap()[0]["playerCount"].is_object());

        // Lobbies for a player require a seat, not just creatorship
        let (status, body) = send(&router, get("/lobbies/player/p1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
        let (status, _) = send(
            &router,
            post(
                &format!("/lobbies/{first}/join"),
                json!({ "playerId": "p1", "side": "left" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&router, get("/lobbies/player/p1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&router, get("/lobbies/player/ghost")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Delete is 204, then the lobby is gone
        let (status, _) = send(&router, delete(&format!("/lobbies/{first}"))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, get(&format!("/lobbies/{first}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&router, delete(&format!("/lobbies/{first}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Health reports service statistics
        let (status, body) = send(&router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stats"]["total_lobbies"], 1);
    }
}
