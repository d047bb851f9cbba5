//! HTTP routes for the booking service
//!
//! A thin axum layer: handlers validate request shape, invoke the lobby
//! manager or the reference-entity stores, and serialize the result.
//! Domain errors pass through untouched and get their status codes in
//! `api::error`.

use crate::api::error::{bad_request, ApiResult};
use crate::api::serializers::{lobby_details, LobbyDetails, LobbySummary};
use crate::api::ApiState;
use crate::error::LobbyError;
use crate::lobby::filter::LobbyFilters;
use crate::lobby::manager::CreateLobby;
use crate::service::health::HealthCheck;
use crate::types::{Club, ClubId, LobbyId, LobbyStatus, Player, PlayerId, Side, Visibility};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Build the full application router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/alive", get(alive))
        .route("/lobbies", post(create_lobby).get(list_lobbies))
        .route("/lobbies/{id}", get(get_lobby).delete(delete_lobby))
        .route("/lobbies/{id}/join", post(join_lobby))
        .route("/lobbies/{id}/leave", post(leave_lobby))
        .route("/lobbies/player/{player_id}", get(lobbies_for_player))
        .route("/players", post(create_player).get(list_players))
        .route("/players/{id}", get(get_player).put(update_player).delete(delete_player))
        .route("/clubs", post(create_club).get(list_clubs))
        .route("/clubs/{id}", get(get_club).put(update_club).delete(delete_club))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLobbyBody {
    creator_id: PlayerId,
    start_at: DateTime<Utc>,
    duration_minutes: u32,
    club_id: Option<ClubId>,
    court_name: Option<String>,
    max_players_by_side: Option<usize>,
    visibility: Option<Visibility>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinLobbyBody {
    player_id: PlayerId,
    side: Side,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaveLobbyBody {
    player_id: PlayerId,
}

/// Query parameters for `GET /lobbies`. Kept flat so every field
/// deserializes straight from the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListLobbiesQuery {
    status: Option<LobbyStatus>,
    club_id: Option<ClubId>,
    created_by: Option<PlayerId>,
    start_after: Option<DateTime<Utc>>,
    start_before: Option<DateTime<Utc>>,
    available_only: Option<bool>,
    include_players: Option<bool>,
}

impl ListLobbiesQuery {
    fn filters(&self) -> LobbyFilters {
        LobbyFilters {
            status: self.status,
            club_id: self.club_id.clone(),
            created_by: self.created_by.clone(),
            start_after: self.start_after,
            start_before: self.start_before,
            available_only: self.available_only,
        }
    }
}

async fn health(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let health = HealthCheck::check(&state).await?;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(health)))
}

async fn alive() -> impl IntoResponse {
    Json(json!({ "status": "alive" }))
}

async fn create_lobby(
    State(state): State<ApiState>,
    Json(body): Json<CreateLobbyBody>,
) -> ApiResult<impl IntoResponse> {
    if body.creator_id.is_empty() {
        return Err(bad_request("creatorId must not be empty"));
    }
    if body.duration_minutes == 0 {
        return Err(bad_request("durationMinutes must be positive"));
    }
    if let Some(max) = body.max_players_by_side {
        if !(2..=10).contains(&max) {
            return Err(bad_request("maxPlayersBySide must be between 2 and 10"));
        }
    }
    if matches!(&body.court_name, Some(name) if name.is_empty()) {
        return Err(bad_request("courtName must not be empty"));
    }

    let lobby = state
        .lobby_manager
        .create_lobby(CreateLobby {
            creator_id: body.creator_id,
            start_at: body.start_at,
            duration_minutes: body.duration_minutes,
            club_id: body.club_id,
            court_name: body.court_name,
            max_players_by_side: body.max_players_by_side,
            visibility: body.visibility,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LobbySummary::from_lobby(&lobby))))
}

async fn get_lobby(
    State(state): State<ApiState>,
    Path(id): Path<LobbyId>,
) -> ApiResult<Json<LobbyDetails>> {
    let lobby = state.lobby_manager.get_lobby(id).await?;
    let details = lobby_details(&lobby, state.player_store.as_ref()).await?;
    Ok(Json(details))
}

async fn list_lobbies(
    State(state): State<ApiState>,
    Query(query): Query<ListLobbiesQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let lobbies = state.lobby_manager.list_lobbies(&query.filters()).await?;

    if query.include_players.unwrap_or(false) {
        let mut details = Vec::with_capacity(lobbies.len());
        for lobby in &lobbies {
            details.push(lobby_details(lobby, state.player_store.as_ref()).await?);
        }
        Ok(Json(json!(details)))
    } else {
        let summaries: Vec<_> = lobbies.iter().map(LobbySummary::from_lobby).collect();
        Ok(Json(json!(summaries)))
    }
}

async fn lobbies_for_player(
    State(state): State<ApiState>,
    Path(player_id): Path<PlayerId>,
) -> ApiResult<Json<Vec<LobbyDetails>>> {
    let lobbies = state.lobby_manager.lobbies_for_player(&player_id).await?;

    let mut details = Vec::with_capacity(lobbies.len());
    for lobby in &lobbies {
        details.push(lobby_details(lobby, state.player_store.as_ref()).await?);
    }
    Ok(Json(details))
}

async fn join_lobby(
    State(state): State<ApiState>,
    Path(id): Path<LobbyId>,
    Json(body): Json<JoinLobbyBody>,
) -> ApiResult<Json<LobbySummary>> {
    if body.player_id.is_empty() {
        return Err(bad_request("playerId must not be empty"));
    }

    let lobby = state
        .lobby_manager
        .join_lobby(id, &body.player_id, body.side)
        .await?;
    Ok(Json(LobbySummary::from_lobby(&lobby)))
}

async fn leave_lobby(
    State(state): State<ApiState>,
    Path(id): Path<LobbyId>,
    Json(body): Json<LeaveLobbyBody>,
) -> ApiResult<Json<LobbySummary>> {
    if body.player_id.is_empty() {
        return Err(bad_request("playerId must not be empty"));
    }

    let lobby = state
        .lobby_manager
        .leave_lobby(id, &body.player_id)
        .await?;
    Ok(Json(LobbySummary::from_lobby(&lobby)))
}

async fn delete_lobby(
    State(state): State<ApiState>,
    Path(id): Path<LobbyId>,
) -> ApiResult<StatusCode> {
    state.lobby_manager.delete_lobby(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_player(
    State(state): State<ApiState>,
    Json(player): Json<Player>,
) -> ApiResult<impl IntoResponse> {
    if player.id.is_empty() || player.name.is_empty() {
        return Err(bad_request("id and name are required"));
    }

    state.player_store.upsert(player.clone()).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

async fn list_players(State(state): State<ApiState>) -> ApiResult<Json<Vec<Player>>> {
    Ok(Json(state.player_store.list().await?))
}

async fn get_player(
    State(state): State<ApiState>,
    Path(id): Path<PlayerId>,
) -> ApiResult<Json<Player>> {
    let player = state.player_store.get_by_id(&id).await?.ok_or_else(|| {
        LobbyError::PlayerNotFound {
            player_id: id.clone(),
        }
    })?;
    Ok(Json(player))
}

async fn update_player(
    State(state): State<ApiState>,
    Path(id): Path<PlayerId>,
    Json(mut player): Json<Player>,
) -> ApiResult<Json<Player>> {
    // Path id wins over whatever the body carries
    player.id = id;
    if player.name.is_empty() {
        return Err(bad_request("name is required"));
    }

    state.player_store.upsert(player.clone()).await?;
    Ok(Json(player))
}

async fn delete_player(
    State(state): State<ApiState>,
    Path(id): Path<PlayerId>,
) -> ApiResult<StatusCode> {
    // Seats referencing the id keep working as unresolved references
    state.player_store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_club(
    State(state): State<ApiState>,
    Json(club): Json<Club>,
) -> ApiResult<impl IntoResponse> {
    if club.id.is_empty() || club.name.is_empty() {
        return Err(bad_request("id and name are required"));
    }

    state.club_store.upsert(club.clone()).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

async fn list_clubs(State(state): State<ApiState>) -> ApiResult<Json<Vec<Club>>> {
    Ok(Json(state.club_store.list().await?))
}

async fn get_club(
    State(state): State<ApiState>,
    Path(id): Path<ClubId>,
) -> ApiResult<Json<Club>> {
    let club = state
        .club_store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| LobbyError::ClubNotFound { club_id: id.clone() })?;
    Ok(Json(club))
}

async fn update_club(
    State(state): State<ApiState>,
    Path(id): Path<ClubId>,
    Json(mut club): Json<Club>,
) -> ApiResult<Json<Club>> {
    club.id = id;
    if club.name.is_empty() {
        return Err(bad_request("name is required"));
    }

    state.club_store.upsert(club.clone()).await?;
    Ok(Json(club))
}

async fn delete_club(
    State(state): State<ApiState>,
    Path(id): Path<ClubId>,
) -> ApiResult<StatusCode> {
    state.club_store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
