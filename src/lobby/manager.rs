//! Lobby manager implementation for booking use cases
//!
//! This module orchestrates lobby creation, joins, leaves and listing on
//! top of the store contracts. Each operation is one load-mutate-save
//! round: the aggregate is loaded, exactly one mutation is applied, and
//! the full slot replacement is persisted before the result is returned.

use crate::error::{LobbyError, Result};
use crate::lobby::aggregate::{LobbyAggregate, LobbySettings, DEFAULT_MAX_PLAYERS_BY_SIDE};
use crate::lobby::filter::LobbyFilters;
use crate::store::club::ClubStore;
use crate::store::lobby::LobbyStore;
use crate::store::player::PlayerStore;
use crate::types::{ClubId, ClubRef, LobbyId, PlayerId, PlayerRef, Side, Visibility};
use crate::utils::generate_lobby_id;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Inputs for creating a lobby. Structural validation (positive duration,
/// positive capacity) happens at the API boundary.
#[derive(Debug, Clone)]
pub struct CreateLobby {
    pub creator_id: PlayerId,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub club_id: Option<ClubId>,
    pub court_name: Option<String>,
    pub max_players_by_side: Option<usize>,
    pub visibility: Option<Visibility>,
}

/// The main lobby manager
#[derive(Clone)]
pub struct LobbyManager {
    lobby_store: Arc<dyn LobbyStore>,
    player_store: Arc<dyn PlayerStore>,
    club_store: Arc<dyn ClubStore>,
    default_court_name: String,
}

impl LobbyManager {
    /// Create a new lobby manager over the given stores
    pub fn new(
        lobby_store: Arc<dyn LobbyStore>,
        player_store: Arc<dyn PlayerStore>,
        club_store: Arc<dyn ClubStore>,
    ) -> Self {
        Self {
            lobby_store,
            player_store,
            club_store,
            default_court_name: crate::lobby::aggregate::DEFAULT_COURT_NAME.to_string(),
        }
    }

    /// Override the court label used when creation requests omit one
    pub fn with_default_court_name(mut self, court_name: impl Into<String>) -> Self {
        self.default_court_name = court_name.into();
        self
    }

    /// Create a new lobby. The creator must be a registered player; the
    /// club reference stays unresolved when the club is unknown to us,
    /// never padded with empty display fields.
    pub async fn create_lobby(&self, request: CreateLobby) -> Result<LobbyAggregate> {
        let creator = self
            .player_store
            .get_by_id(&request.creator_id)
            .await?
            .ok_or_else(|| LobbyError::PlayerNotFound {
                player_id: request.creator_id.clone(),
            })?;

        let club = match request.club_id {
            Some(club_id) => Some(match self.club_store.get_by_id(&club_id).await? {
                Some(club) => ClubRef::from(club),
                None => ClubRef::unresolved(club_id),
            }),
            None => None,
        };

        let settings = LobbySettings {
            court_name: request
                .court_name
                .unwrap_or_else(|| self.default_court_name.clone()),
            max_players_by_side: request
                .max_players_by_side
                .unwrap_or(DEFAULT_MAX_PLAYERS_BY_SIDE),
            visibility: request.visibility.unwrap_or_default(),
            club,
        };

        let lobby = LobbyAggregate::create(
            generate_lobby_id(),
            PlayerRef::from(creator),
            request.start_at,
            request.duration_minutes,
            settings,
        );

        self.lobby_store.save(&lobby).await?;

        info!(
            "Created lobby {} by '{}' at {} ({} players per side)",
            lobby.id(),
            lobby.created_by().id(),
            lobby.start_at(),
            lobby.max_players_by_side()
        );
        Ok(lobby)
    }

    /// Seat a player on a side of an existing lobby
    pub async fn join_lobby(
        &self,
        lobby_id: LobbyId,
        player_id: &str,
        side: Side,
    ) -> Result<LobbyAggregate> {
        let mut lobby = self.load(lobby_id).await?;

        // Hydrate the seat when the player is known to us; an unknown id
        // joins as an unresolved reference
        let seat = match self.player_store.get_by_id(player_id).await? {
            Some(player) => PlayerRef::from(player),
            None => PlayerRef::unresolved(player_id),
        };

        lobby.add_player(seat, side)?;
        self.lobby_store.save(&lobby).await?;

        info!(
            "Player '{}' joined lobby {} on the {} side (status: {})",
            player_id,
            lobby_id,
            side,
            lobby.status()
        );
        Ok(lobby)
    }

    /// Unseat a player from an existing lobby
    pub async fn leave_lobby(&self, lobby_id: LobbyId, player_id: &str) -> Result<LobbyAggregate> {
        let mut lobby = self.load(lobby_id).await?;

        lobby.remove_player(player_id)?;
        self.lobby_store.save(&lobby).await?;

        info!(
            "Player '{}' left lobby {} (status: {})",
            player_id,
            lobby_id,
            lobby.status()
        );
        Ok(lobby)
    }

    /// Fetch one lobby
    pub async fn get_lobby(&self, lobby_id: LobbyId) -> Result<LobbyAggregate> {
        self.load(lobby_id).await
    }

    /// List lobbies matching the filters, ascending by start time
    pub async fn list_lobbies(&self, filters: &LobbyFilters) -> Result<Vec<LobbyAggregate>> {
        let lobbies = self.lobby_store.list(filters).await?;
        debug!("Listed {} lobbies for {:?}", lobbies.len(), filters);
        Ok(lobbies)
    }

    /// All lobbies where the given registered player is seated
    pub async fn lobbies_for_player(&self, player_id: &str) -> Result<Vec<LobbyAggregate>> {
        if self.player_store.get_by_id(player_id).await?.is_none() {
            return Err(LobbyError::PlayerNotFound {
                player_id: player_id.to_string(),
            }
            .into());
        }

        let lobbies = self.lobby_store.list(&LobbyFilters::default()).await?;
        Ok(lobbies
            .into_iter()
            .filter(|lobby| lobby.has_player(player_id))
            .collect())
    }

    /// Delete a lobby and its slots
    pub async fn delete_lobby(&self, lobby_id: LobbyId) -> Result<()> {
        self.lobby_store.delete(lobby_id).await?;
        info!("Deleted lobby {}", lobby_id);
        Ok(())
    }

    async fn load(&self, lobby_id: LobbyId) -> Result<LobbyAggregate> {
        self.lobby_store
            .find_by_id(lobby_id)
            .await?
            .ok_or_else(|| {
                LobbyError::LobbyNotFound {
                    lobby_id: lobby_id.to_string(),
                }
                .into()
            })
    }
}
