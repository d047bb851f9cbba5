//! In-memory store implementations
//!
//! The lobby store keeps the *relational* shape (scalar row + slot rows)
//! rather than the aggregate, so every load and save goes through the same
//! `to_rows`/`from_rows` mapping a database-backed store would use, and
//! filter evaluation runs at the row level exactly like a query would.
//! Useful as the test double and for running the service without a
//! database.

use crate::error::{LobbyError, Result};
use crate::lobby::aggregate::LobbyAggregate;
use crate::lobby::filter::LobbyFilters;
use crate::store::club::ClubStore;
use crate::store::lobby::LobbyStore;
use crate::store::player::PlayerStore;
use crate::store::rows::{from_rows, to_rows, LobbyRow, SideSlotRow};
use crate::types::{Club, ClubId, LobbyId, Player, PlayerId};
use crate::utils::current_timestamp;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Lobby store backed by a process-local map of rows
#[derive(Debug, Default)]
pub struct InMemoryLobbyStore {
    tables: RwLock<HashMap<LobbyId, (LobbyRow, Vec<SideSlotRow>)>>,
}

impl InMemoryLobbyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> LobbyError {
        LobbyError::InternalError {
            message: "Failed to acquire lobby table lock".to_string(),
        }
    }
}

#[async_trait]
impl LobbyStore for InMemoryLobbyStore {
    async fn save(&self, lobby: &LobbyAggregate) -> Result<()> {
        let (mut row, slots) = to_rows(lobby);
        row.updated_at = current_timestamp();

        // One write lock for the whole replacement keeps scalar and slot
        // state from tearing
        let mut tables = self.tables.write().map_err(|_| Self::lock_error())?;
        tables.insert(row.id, (row, slots));
        Ok(())
    }

    async fn find_by_id(&self, id: LobbyId) -> Result<Option<LobbyAggregate>> {
        let tables = self.tables.read().map_err(|_| Self::lock_error())?;
        Ok(tables
            .get(&id)
            .map(|(row, slots)| from_rows(row.clone(), slots)))
    }

    async fn delete(&self, id: LobbyId) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| Self::lock_error())?;
        if tables.remove(&id).is_none() {
            return Err(LobbyError::LobbyNotFound {
                lobby_id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn list(&self, filters: &LobbyFilters) -> Result<Vec<LobbyAggregate>> {
        let tables = self.tables.read().map_err(|_| Self::lock_error())?;
        let mut lobbies: Vec<_> = tables
            .values()
            .filter(|(row, slots)| filters.matches_rows(row, slots))
            .map(|(row, slots)| from_rows(row.clone(), slots))
            .collect();
        lobbies.sort_by_key(|lobby| lobby.start_at());
        Ok(lobbies)
    }
}

/// Player store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> LobbyError {
        LobbyError::InternalError {
            message: "Failed to acquire player table lock".to_string(),
        }
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn upsert(&self, player: Player) -> Result<()> {
        let mut players = self.players.write().map_err(|_| Self::lock_error())?;
        players.insert(player.id.clone(), player);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Player>> {
        let players = self.players.read().map_err(|_| Self::lock_error())?;
        Ok(players.get(id).cloned())
    }

    async fn get_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>> {
        let players = self.players.read().map_err(|_| Self::lock_error())?;
        Ok(ids
            .iter()
            .filter_map(|id| players.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<Player>> {
        let players = self.players.read().map_err(|_| Self::lock_error())?;
        let mut all: Vec<_> = players.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut players = self.players.write().map_err(|_| Self::lock_error())?;
        if players.remove(id).is_none() {
            return Err(LobbyError::PlayerNotFound {
                player_id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Club store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryClubStore {
    clubs: RwLock<HashMap<ClubId, Club>>,
}

impl InMemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> LobbyError {
        LobbyError::InternalError {
            message: "Failed to acquire club table lock".to_string(),
        }
    }
}

#[async_trait]
impl ClubStore for InMemoryClubStore {
    async fn upsert(&self, club: Club) -> Result<()> {
        let mut clubs = self.clubs.write().map_err(|_| Self::lock_error())?;
        clubs.insert(club.id.clone(), club);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Club>> {
        let clubs = self.clubs.read().map_err(|_| Self::lock_error())?;
        Ok(clubs.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Club>> {
        let clubs = self.clubs.read().map_err(|_| Self::lock_error())?;
        let mut all: Vec<_> = clubs.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut clubs = self.clubs.write().map_err(|_| Self::lock_error())?;
        if clubs.remove(id).is_none() {
            return Err(LobbyError::ClubNotFound {
                club_id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
