//! Plain row records and the mapping between aggregates and storage
//!
//! The aggregate stays free of persistence annotations; these records are
//! the relational shape (`lobbies` + `side_slots` columns) and the
//! `to_rows`/`from_rows` pair is the only translation point. Reconstruction
//! yields unresolved player/club references, hydration is a serialization
//! concern.

use crate::lobby::aggregate::LobbyAggregate;
use crate::types::{ClubId, ClubRef, LobbyId, LobbyStatus, PlayerId, PlayerRef, Side, Visibility};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scalar columns of the `lobbies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyRow {
    pub id: LobbyId,
    pub created_by: PlayerId,
    pub status: LobbyStatus,
    pub visibility: Visibility,
    pub max_players_by_side: usize,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub court_name: String,
    pub club_id: Option<ClubId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the `side_slots` table: a single player's occupancy of one
/// side of one lobby
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSlotRow {
    pub lobby_id: LobbyId,
    pub player_id: PlayerId,
    pub side: Side,
}

/// Flatten an aggregate into its scalar row plus one slot row per seat
pub fn to_rows(lobby: &LobbyAggregate) -> (LobbyRow, Vec<SideSlotRow>) {
    let row = LobbyRow {
        id: lobby.id(),
        created_by: lobby.created_by().id().to_string(),
        status: lobby.status(),
        visibility: lobby.visibility(),
        max_players_by_side: lobby.max_players_by_side(),
        start_at: lobby.start_at(),
        duration_minutes: lobby.duration_minutes(),
        court_name: lobby.court_name().to_string(),
        club_id: lobby.club().map(|club| club.id().to_string()),
        created_at: lobby.created_at(),
        updated_at: lobby.updated_at(),
    };

    let mut slots = Vec::with_capacity(lobby.players().count());
    for side in [Side::Left, Side::Right] {
        for seat in lobby.side_slots(side) {
            slots.push(SideSlotRow {
                lobby_id: lobby.id(),
                player_id: seat.id().to_string(),
                side,
            });
        }
    }

    (row, slots)
}

/// Rebuild an aggregate from its scalar row and slot rows, partitioning
/// the slots back into left/right sequences
pub fn from_rows(row: LobbyRow, slots: &[SideSlotRow]) -> LobbyAggregate {
    let mut left_side = Vec::new();
    let mut right_side = Vec::new();
    for slot in slots.iter().filter(|slot| slot.lobby_id == row.id) {
        let seat = PlayerRef::unresolved(slot.player_id.clone());
        match slot.side {
            Side::Left => left_side.push(seat),
            Side::Right => right_side.push(seat),
        }
    }

    LobbyAggregate::from_parts(
        row.id,
        PlayerRef::unresolved(row.created_by),
        row.status,
        row.visibility,
        row.max_players_by_side,
        left_side,
        right_side,
        row.start_at,
        row.duration_minutes,
        row.court_name,
        row.club_id.map(ClubRef::unresolved),
        row.created_at,
        row.updated_at,
    )
}
