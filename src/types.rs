//! Common types used throughout the booking service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for clubs
pub type ClubId = String;

/// Unique identifier for lobbies
pub type LobbyId = Uuid;

/// One of the two symmetric player groups within a lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Membership status of a lobby, derived from side fullness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LobbyStatus {
    /// At least one side still has remaining capacity
    Open,
    /// Both sides are at capacity
    Confirmed,
}

impl std::fmt::Display for LobbyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LobbyStatus::Open => write!(f, "open"),
            LobbyStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Who can see and join a lobby. Stored but not enforced by the core;
/// access control lives upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Invite,
    Private,
}

/// Self-reported skill bracket for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    A1,
    A2,
    A3,
    F1,
    F2,
    F3,
}

/// Player profile. Reference entity owned externally; the lobby aggregate
/// never manages player lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<SkillLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_auth_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Club profile. Reference entity owned externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A player reference held by a lobby. `Unresolved` marks a seat that is
/// known only by id, so consumers never have to infer hydration from
/// sentinel values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerRef {
    Resolved(Player),
    Unresolved { id: PlayerId },
}

impl PlayerRef {
    /// Reference a player by id only
    pub fn unresolved(id: impl Into<PlayerId>) -> Self {
        PlayerRef::Unresolved { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            PlayerRef::Resolved(player) => &player.id,
            PlayerRef::Unresolved { id } => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, PlayerRef::Resolved(_))
    }

    /// The full profile, when hydrated
    pub fn player(&self) -> Option<&Player> {
        match self {
            PlayerRef::Resolved(player) => Some(player),
            PlayerRef::Unresolved { .. } => None,
        }
    }
}

impl From<Player> for PlayerRef {
    fn from(player: Player) -> Self {
        PlayerRef::Resolved(player)
    }
}

/// A club reference held by a lobby, mirroring [`PlayerRef`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClubRef {
    Resolved(Club),
    Unresolved { id: ClubId },
}

impl ClubRef {
    pub fn unresolved(id: impl Into<ClubId>) -> Self {
        ClubRef::Unresolved { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            ClubRef::Resolved(club) => &club.id,
            ClubRef::Unresolved { id } => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ClubRef::Resolved(_))
    }
}

impl From<Club> for ClubRef {
    fn from(club: Club) -> Self {
        ClubRef::Resolved(club)
    }
}
