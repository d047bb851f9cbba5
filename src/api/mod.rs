//! HTTP boundary for the booking service
//!
//! Routes, response serializers, and the domain-error-to-status-code
//! translation live here. Handlers stay thin; all state transitions go
//! through the lobby manager.

pub mod error;
pub mod routes;
pub mod serializers;

use crate::lobby::manager::LobbyManager;
use crate::store::club::ClubStore;
use crate::store::player::PlayerStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use serializers::{LobbyDetails, LobbySummary};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub lobby_manager: Arc<LobbyManager>,
    pub player_store: Arc<dyn PlayerStore>,
    pub club_store: Arc<dyn ClubStore>,
    /// Service name reported by the health endpoint
    pub service_name: String,
    /// Process start time, for uptime reporting
    pub started_at: DateTime<Utc>,
}
