//! Persistence contract for player reference entities

use crate::error::Result;
use crate::types::{Player, PlayerId};
use async_trait::async_trait;

/// Lookup and registration of player profiles. The lobby core only reads
/// from this; player lifecycle is owned upstream.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Insert or replace a player profile
    async fn upsert(&self, player: Player) -> Result<()>;

    /// Fetch one player by id
    async fn get_by_id(&self, id: &str) -> Result<Option<Player>>;

    /// Fetch the subset of the given ids that exist. Order and
    /// completeness are not guaranteed; callers index by id.
    async fn get_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>>;

    /// All registered players
    async fn list(&self) -> Result<Vec<Player>>;

    /// Remove a player profile. Fails with `PlayerNotFound` if the id is
    /// unknown. Seats referencing the id survive as unresolved references.
    async fn delete(&self, id: &str) -> Result<()>;
}
