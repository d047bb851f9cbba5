//! Persistence contract for club reference entities

use crate::error::Result;
use crate::types::Club;
use async_trait::async_trait;

/// Lookup and registration of clubs
#[async_trait]
pub trait ClubStore: Send + Sync {
    /// Insert or replace a club
    async fn upsert(&self, club: Club) -> Result<()>;

    /// Fetch one club by id
    async fn get_by_id(&self, id: &str) -> Result<Option<Club>>;

    /// All registered clubs
    async fn list(&self) -> Result<Vec<Club>>;

    /// Remove a club. Fails with `ClubNotFound` if the id is unknown.
    async fn delete(&self, id: &str) -> Result<()>;
}
