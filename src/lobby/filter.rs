//! Listing filters for lobbies
//!
//! The same filter set can be evaluated two ways: against reconstructed
//! aggregates (for in-memory collections) or against the relational rows
//! (what a database query would compute). Both paths must return identical
//! results; that equivalence is the contract the store tests pin down.

use crate::lobby::aggregate::LobbyAggregate;
use crate::store::rows::{LobbyRow, SideSlotRow};
use crate::types::{ClubId, LobbyStatus, PlayerId, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional predicates for listing lobbies. All provided filters are
/// ANDed; results always sort ascending by start time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LobbyFilters {
    /// Exact status match
    pub status: Option<LobbyStatus>,
    /// Exact match on the lobby's club id
    pub club_id: Option<ClubId>,
    /// Exact match on the creator id
    pub created_by: Option<PlayerId>,
    /// Exclusive lower bound on `start_at`
    pub start_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `start_at`
    pub start_before: Option<DateTime<Utc>>,
    /// Keep lobbies where at least one side has remaining capacity
    pub available_only: Option<bool>,
}

impl LobbyFilters {
    /// No predicates set
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.club_id.is_none()
            && self.created_by.is_none()
            && self.start_after.is_none()
            && self.start_before.is_none()
            && !self.available_only.unwrap_or(false)
    }

    /// Evaluate against an in-memory aggregate
    pub fn matches(&self, lobby: &LobbyAggregate) -> bool {
        if let Some(status) = self.status {
            if lobby.status() != status {
                return false;
            }
        }

        if let Some(club_id) = &self.club_id {
            if lobby.club().map(|club| club.id()) != Some(club_id.as_str()) {
                return false;
            }
        }

        if let Some(created_by) = &self.created_by {
            if lobby.created_by().id() != created_by {
                return false;
            }
        }

        if let Some(start_after) = self.start_after {
            if lobby.start_at() <= start_after {
                return false;
            }
        }

        if let Some(start_before) = self.start_before {
            if lobby.start_at() >= start_before {
                return false;
            }
        }

        if self.available_only.unwrap_or(false) && lobby.is_full() {
            return false;
        }

        true
    }

    /// Evaluate against the persisted row shape. Mirrors the SQL a
    /// database-backed store would run, counting slot rows per side for
    /// the availability predicate.
    pub fn matches_rows(&self, row: &LobbyRow, slots: &[SideSlotRow]) -> bool {
        if let Some(status) = self.status {
            if row.status != status {
                return false;
            }
        }

        if let Some(club_id) = &self.club_id {
            if row.club_id.as_deref() != Some(club_id.as_str()) {
                return false;
            }
        }

        if let Some(created_by) = &self.created_by {
            if &row.created_by != created_by {
                return false;
            }
        }

        if let Some(start_after) = self.start_after {
            if row.start_at <= start_after {
                return false;
            }
        }

        if let Some(start_before) = self.start_before {
            if row.start_at >= start_before {
                return false;
            }
        }

        if self.available_only.unwrap_or(false) {
            let left = slots.iter().filter(|s| s.side == Side::Left).count();
            let right = slots.iter().filter(|s| s.side == Side::Right).count();
            if left >= row.max_players_by_side && right >= row.max_players_by_side {
                return false;
            }
        }

        true
    }

    /// Filter and sort an in-memory collection, ascending by `start_at`
    pub fn apply(&self, lobbies: Vec<LobbyAggregate>) -> Vec<LobbyAggregate> {
        let mut filtered: Vec<_> = lobbies
            .into_iter()
            .filter(|lobby| self.matches(lobby))
            .collect();
        filtered.sort_by_key(|lobby| lobby.start_at());
        filtered
    }
}
