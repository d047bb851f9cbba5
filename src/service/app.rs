//! Application state and HTTP server lifecycle
//!
//! Wires the configuration and the stores into the lobby manager and the
//! router, and runs the axum server with graceful shutdown. Everything is
//! constructed once here and passed down by reference; no component
//! reaches for ambient/static state.

use crate::api::{self, ApiState};
use crate::config::AppConfig;
use crate::error::Result;
use crate::lobby::manager::LobbyManager;
use crate::store::club::ClubStore;
use crate::store::lobby::LobbyStore;
use crate::store::memory::{InMemoryClubStore, InMemoryLobbyStore, InMemoryPlayerStore};
use crate::store::player::PlayerStore;
use crate::utils::current_timestamp;
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;

/// Fully wired application state
pub struct AppState {
    config: AppConfig,
    api_state: ApiState,
    shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Wire the service with in-memory stores
    pub fn new(config: AppConfig) -> Self {
        let lobby_store: Arc<dyn LobbyStore> = Arc::new(InMemoryLobbyStore::new());
        let player_store: Arc<dyn PlayerStore> = Arc::new(InMemoryPlayerStore::new());
        let club_store: Arc<dyn ClubStore> = Arc::new(InMemoryClubStore::new());
        Self::with_stores(config, lobby_store, player_store, club_store)
    }

    /// Wire the service with caller-provided store implementations
    pub fn with_stores(
        config: AppConfig,
        lobby_store: Arc<dyn LobbyStore>,
        player_store: Arc<dyn PlayerStore>,
        club_store: Arc<dyn ClubStore>,
    ) -> Self {
        let lobby_manager = Arc::new(
            LobbyManager::new(lobby_store, player_store.clone(), club_store.clone())
                .with_default_court_name(config.booking.default_court_name.clone()),
        );

        let api_state = ApiState {
            lobby_manager,
            player_store,
            club_store,
            service_name: config.service.name.clone(),
            started_at: current_timestamp(),
        };

        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            api_state,
            shutdown_tx,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api_state(&self) -> &ApiState {
        &self.api_state
    }

    /// The full application router
    pub fn router(&self) -> Router {
        api::router(self.api_state.clone())
    }

    /// Signal the running server to drain and stop
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn serve(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.http.host, self.config.http.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid HTTP bind address {}:{}",
                    self.config.http.host, self.config.http.port
                )
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

        info!("HTTP server listening on {}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server shutting down");
            })
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
