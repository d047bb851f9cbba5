//! Health check reporting
//!
//! This module provides health check functionality for the booking
//! service: component probes over the stores plus a small statistics
//! block for monitoring.

use crate::api::ApiState;
use crate::error::Result;
use crate::lobby::filter::LobbyFilters;
use crate::types::LobbyStatus;
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    /// Service statistics
    pub stats: ServiceStats,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional error message if unhealthy
    pub message: Option<String>,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Service statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Number of stored lobbies
    pub total_lobbies: usize,
    /// Lobbies still accepting players
    pub open_lobbies: usize,
    /// Lobbies with both sides at capacity
    pub confirmed_lobbies: usize,
    /// Players currently seated across all lobbies
    pub players_seated: usize,
    /// Registered players
    pub registered_players: usize,
    /// Seconds since process start
    pub uptime_seconds: i64,
}

impl HealthCheck {
    /// Probe the stores and assemble the health report
    pub async fn check(state: &ApiState) -> Result<Self> {
        let mut checks = Vec::new();
        let mut overall_status = HealthStatus::Healthy;

        let lobby_check = Self::check_lobby_store(state).await;
        if lobby_check.status != HealthStatus::Healthy {
            overall_status = HealthStatus::Unhealthy;
        }
        checks.push(lobby_check);

        let player_check = Self::check_player_store(state).await;
        if player_check.status == HealthStatus::Unhealthy {
            overall_status = HealthStatus::Unhealthy;
        } else if player_check.status == HealthStatus::Degraded
            && overall_status == HealthStatus::Healthy
        {
            overall_status = HealthStatus::Degraded;
        }
        checks.push(player_check);

        let stats = Self::gather_service_stats(state).await;

        Ok(HealthCheck {
            status: overall_status,
            service: state.service_name.clone(),
            version: crate::VERSION.to_string(),
            timestamp: current_timestamp(),
            checks,
            stats,
        })
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// Verify the lobby store answers a listing query
    async fn check_lobby_store(state: &ApiState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = match state.lobby_manager.list_lobbies(&LobbyFilters::default()).await
        {
            Ok(_) => (HealthStatus::Healthy, None),
            Err(e) => {
                error!("Lobby store check failed: {}", e);
                (
                    HealthStatus::Unhealthy,
                    Some(format!("Listing failed: {}", e)),
                )
            }
        };

        ComponentCheck {
            name: "lobby_store".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Verify the player store answers a listing query
    async fn check_player_store(state: &ApiState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = match state.player_store.list().await {
            Ok(_) => (HealthStatus::Healthy, None),
            Err(e) => {
                error!("Player store check failed: {}", e);
                (
                    HealthStatus::Degraded,
                    Some(format!("Listing failed: {}", e)),
                )
            }
        };

        ComponentCheck {
            name: "player_store".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Gather current service statistics
    async fn gather_service_stats(state: &ApiState) -> ServiceStats {
        let lobbies = state
            .lobby_manager
            .list_lobbies(&LobbyFilters::default())
            .await
            .unwrap_or_default();
        let registered_players = state
            .player_store
            .list()
            .await
            .map(|players| players.len())
            .unwrap_or(0);

        ServiceStats {
            total_lobbies: lobbies.len(),
            open_lobbies: lobbies
                .iter()
                .filter(|l| l.status() == LobbyStatus::Open)
                .count(),
            confirmed_lobbies: lobbies
                .iter()
                .filter(|l| l.status() == LobbyStatus::Confirmed)
                .count(),
            players_seated: lobbies.iter().map(|l| l.players().count()).sum(),
            registered_players,
            uptime_seconds: (current_timestamp() - state.started_at).num_seconds(),
        }
    }
}
