//! Persistence contract for lobby aggregates
//!
//! A store persists the aggregate as one scalar row plus its slot rows and
//! reconstructs it on load. `save` replaces the slot set wholesale
//! (delete-all-then-reinsert keyed by lobby id) so the persisted slots
//! always equal the in-memory sequences and no orphan rows survive.
//!
//! Known gap: callers run load-mutate-save without optimistic locking, so
//! two concurrent joins against the same lobby id can race. A version
//! column or a per-lobby serialization point would close it;
//! implementations that serialize writers internally (like the in-memory
//! store) only narrow the window.

use crate::error::Result;
use crate::lobby::aggregate::LobbyAggregate;
use crate::lobby::filter::LobbyFilters;
use crate::types::LobbyId;
use async_trait::async_trait;

/// Boundary contract for loading and saving lobbies
#[async_trait]
pub trait LobbyStore: Send + Sync {
    /// Idempotent upsert: scalar fields plus a full replace of the slot
    /// rows. Touches `updated_at`.
    async fn save(&self, lobby: &LobbyAggregate) -> Result<()>;

    /// Reconstruct the aggregate from its rows, or `None` if unknown
    async fn find_by_id(&self, id: LobbyId) -> Result<Option<LobbyAggregate>>;

    /// Remove the lobby and its slot rows. Fails with `LobbyNotFound` if
    /// the id is unknown.
    async fn delete(&self, id: LobbyId) -> Result<()>;

    /// All lobbies matching the filters, ordered ascending by `start_at`
    async fn list(&self, filters: &LobbyFilters) -> Result<Vec<LobbyAggregate>>;
}
