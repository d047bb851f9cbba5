//! Lobby aggregate implementation and membership state machine
//!
//! This module contains the core lobby logic for seating players on two
//! sides, enforcing capacity and uniqueness invariants, and deriving the
//! open/confirmed status.

use crate::error::LobbyError;
use crate::types::{ClubRef, LobbyId, LobbyStatus, PlayerRef, Side, Visibility};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-side capacity used when a creation request does not specify one
pub const DEFAULT_MAX_PLAYERS_BY_SIDE: usize = 2;

/// Court label used when a creation request does not specify one
pub const DEFAULT_COURT_NAME: &str = "Court 1";

/// Creation-time knobs for a lobby. All fields are fixed once the lobby
/// exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbySettings {
    /// Free-text court label
    pub court_name: String,
    /// Capacity per side
    pub max_players_by_side: usize,
    /// Stored visibility, not enforced here
    pub visibility: Visibility,
    /// Optional club reference
    pub club: Option<ClubRef>,
}

impl Default for LobbySettings {
    fn default() -> Self {
        Self {
            court_name: DEFAULT_COURT_NAME.to_string(),
            max_players_by_side: DEFAULT_MAX_PLAYERS_BY_SIDE,
            visibility: Visibility::default(),
            club: None,
        }
    }
}

/// The lobby plus its side membership, treated as one consistency boundary.
///
/// Status is always derived: `Confirmed` iff both sides are at capacity.
/// Every mutation recomputes it; there is no locked-once-confirmed
/// semantics, so removing a player from a confirmed lobby reopens it.
#[derive(Debug, Clone, PartialEq)]
pub struct LobbyAggregate {
    id: LobbyId,
    created_by: PlayerRef,
    status: LobbyStatus,
    visibility: Visibility,
    max_players_by_side: usize,
    left_side: Vec<PlayerRef>,
    right_side: Vec<PlayerRef>,
    start_at: DateTime<Utc>,
    duration_minutes: u32,
    court_name: String,
    club: Option<ClubRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LobbyAggregate {
    /// Create a new open lobby with both sides empty.
    ///
    /// The creator is recorded but not seated; joining a side is always an
    /// explicit operation. Inputs are structurally trusted, validation
    /// happens upstream.
    pub fn create(
        id: LobbyId,
        created_by: PlayerRef,
        start_at: DateTime<Utc>,
        duration_minutes: u32,
        settings: LobbySettings,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id,
            created_by,
            status: LobbyStatus::Open,
            visibility: settings.visibility,
            max_players_by_side: settings.max_players_by_side,
            left_side: Vec::new(),
            right_side: Vec::new(),
            start_at,
            duration_minutes,
            court_name: settings.court_name,
            club: settings.club,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reassemble a lobby from persisted state. Used by the storage
    /// mapping; trusts that the slot sequences already satisfy the
    /// capacity and uniqueness invariants.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: LobbyId,
        created_by: PlayerRef,
        status: LobbyStatus,
        visibility: Visibility,
        max_players_by_side: usize,
        left_side: Vec<PlayerRef>,
        right_side: Vec<PlayerRef>,
        start_at: DateTime<Utc>,
        duration_minutes: u32,
        court_name: String,
        club: Option<ClubRef>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            created_by,
            status,
            visibility,
            max_players_by_side,
            left_side,
            right_side,
            start_at,
            duration_minutes,
            court_name,
            club,
            created_at,
            updated_at,
        }
    }

    /// Seat a player on the requested side.
    ///
    /// Fails with `LobbyFull` when both sides are at capacity or when the
    /// requested side alone is, and with `PlayerAlreadyPresent` when the
    /// player id already occupies either side. The side-full case is a
    /// hard error, never a silent no-op.
    pub fn add_player(&mut self, player: PlayerRef, side: Side) -> Result<(), LobbyError> {
        if self.is_full() {
            return Err(LobbyError::LobbyFull {
                lobby_id: self.id.to_string(),
            });
        }

        if self.has_player(player.id()) {
            return Err(LobbyError::PlayerAlreadyPresent {
                player_id: player.id().to_string(),
            });
        }

        if self.side_slots(side).len() >= self.max_players_by_side {
            return Err(LobbyError::LobbyFull {
                lobby_id: self.id.to_string(),
            });
        }

        self.side_slots_mut(side).push(player);
        self.update_status();

        Ok(())
    }

    /// Unseat a player from whichever side holds them.
    ///
    /// Fails with `PlayerNotInLobby` when the id is absent from both
    /// sides, leaving the lobby untouched.
    pub fn remove_player(&mut self, player_id: &str) -> Result<PlayerRef, LobbyError> {
        for side in [Side::Left, Side::Right] {
            let slots = self.side_slots_mut(side);
            if let Some(pos) = slots.iter().position(|seat| seat.id() == player_id) {
                let removed = slots.remove(pos);
                self.update_status();
                return Ok(removed);
            }
        }

        Err(LobbyError::PlayerNotInLobby {
            player_id: player_id.to_string(),
        })
    }

    /// Both sides at capacity
    pub fn is_full(&self) -> bool {
        self.left_side.len() >= self.max_players_by_side
            && self.right_side.len() >= self.max_players_by_side
    }

    /// Player id present on either side
    pub fn has_player(&self, player_id: &str) -> bool {
        self.players().any(|seat| seat.id() == player_id)
    }

    /// Seats on one side, in join order
    pub fn side_slots(&self, side: Side) -> &[PlayerRef] {
        match side {
            Side::Left => &self.left_side,
            Side::Right => &self.right_side,
        }
    }

    /// All seated players, left side first
    pub fn players(&self) -> impl Iterator<Item = &PlayerRef> {
        self.left_side.iter().chain(self.right_side.iter())
    }

    /// Number of seats still open across both sides
    pub fn open_slots(&self) -> usize {
        let capacity = self.max_players_by_side * 2;
        capacity.saturating_sub(self.left_side.len() + self.right_side.len())
    }

    fn side_slots_mut(&mut self, side: Side) -> &mut Vec<PlayerRef> {
        match side {
            Side::Left => &mut self.left_side,
            Side::Right => &mut self.right_side,
        }
    }

    /// Recompute status from fullness. Called after every membership
    /// mutation; confirmed lobbies reopen when a seat frees up.
    fn update_status(&mut self) {
        self.status = if self.is_full() {
            LobbyStatus::Confirmed
        } else {
            LobbyStatus::Open
        };
    }

    pub fn id(&self) -> LobbyId {
        self.id
    }

    pub fn created_by(&self) -> &PlayerRef {
        &self.created_by
    }

    pub fn status(&self) -> LobbyStatus {
        self.status
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn max_players_by_side(&self) -> usize {
        self.max_players_by_side
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn court_name(&self) -> &str {
        &self.court_name
    }

    pub fn club(&self) -> Option<&ClubRef> {
        self.club.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
