//! Response shapes for lobbies
//!
//! Two renditions: a summary that carries player ids only, and a detail
//! view that hydrates seats from the player store. Seats that cannot be
//! hydrated stay explicit `Unresolved` references instead of being padded
//! with placeholder profiles.

use crate::error::Result;
use crate::lobby::aggregate::LobbyAggregate;
use crate::store::player::PlayerStore;
use crate::types::{ClubRef, LobbyId, LobbyStatus, Player, PlayerId, PlayerRef, Side, Visibility};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Lobby with seats as player ids
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbySummary {
    pub id: LobbyId,
    pub status: LobbyStatus,
    pub left_side: Vec<PlayerId>,
    pub right_side: Vec<PlayerId>,
    pub players: Vec<PlayerId>,
    pub created_by: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubRef>,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub court_name: String,
    pub max_players_by_side: usize,
    pub visibility: Visibility,
}

impl LobbySummary {
    pub fn from_lobby(lobby: &LobbyAggregate) -> Self {
        let side_ids = |side| {
            lobby
                .side_slots(side)
                .iter()
                .map(|seat| seat.id().to_string())
                .collect::<Vec<_>>()
        };

        Self {
            id: lobby.id(),
            status: lobby.status(),
            left_side: side_ids(Side::Left),
            right_side: side_ids(Side::Right),
            players: lobby.players().map(|seat| seat.id().to_string()).collect(),
            created_by: lobby.created_by().id().to_string(),
            club: lobby.club().cloned(),
            start_at: lobby.start_at(),
            duration_minutes: lobby.duration_minutes(),
            court_name: lobby.court_name().to_string(),
            max_players_by_side: lobby.max_players_by_side(),
            visibility: lobby.visibility(),
        }
    }
}

/// Seat counts per side
#[derive(Debug, Clone, Serialize)]
pub struct PlayerCounts {
    pub left: usize,
    pub right: usize,
    pub total: usize,
}

/// Lobby with seats hydrated from the player store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDetails {
    pub id: LobbyId,
    pub status: LobbyStatus,
    pub left_side: Vec<PlayerRef>,
    pub right_side: Vec<PlayerRef>,
    pub players: Vec<Player>,
    pub created_by: PlayerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubRef>,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub court_name: String,
    pub max_players_by_side: usize,
    pub visibility: Visibility,
    pub player_count: PlayerCounts,
}

/// Build the detail view, resolving every seat and the creator against
/// the player store in one batch
pub async fn lobby_details(
    lobby: &LobbyAggregate,
    player_store: &dyn PlayerStore,
) -> Result<LobbyDetails> {
    let mut ids: Vec<PlayerId> = lobby.players().map(|seat| seat.id().to_string()).collect();
    ids.push(lobby.created_by().id().to_string());

    let found = player_store.get_by_ids(&ids).await?;
    let by_id: HashMap<&str, &Player> = found.iter().map(|p| (p.id.as_str(), p)).collect();

    let resolve = |seat: &PlayerRef| match by_id.get(seat.id()) {
        Some(player) => PlayerRef::from((*player).clone()),
        // Keep an existing in-memory hydration; otherwise stay a stub
        None => seat.clone(),
    };

    let left_side: Vec<PlayerRef> = lobby.side_slots(Side::Left).iter().map(resolve).collect();
    let right_side: Vec<PlayerRef> = lobby.side_slots(Side::Right).iter().map(resolve).collect();

    Ok(LobbyDetails {
        id: lobby.id(),
        status: lobby.status(),
        players: lobby
            .players()
            .filter_map(|seat| by_id.get(seat.id()).map(|p| (*p).clone()))
            .collect(),
        created_by: resolve(lobby.created_by()),
        club: lobby.club().cloned(),
        start_at: lobby.start_at(),
        duration_minutes: lobby.duration_minutes(),
        court_name: lobby.court_name().to_string(),
        max_players_by_side: lobby.max_players_by_side(),
        visibility: lobby.visibility(),
        player_count: PlayerCounts {
            left: left_side.len(),
            right: right_side.len(),
            total: left_side.len() + right_side.len(),
        },
        left_side,
        right_side,
    })
}
