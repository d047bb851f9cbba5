//! Error types for the booking service
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific booking scenarios
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Lobby not found: {lobby_id}")]
    LobbyNotFound { lobby_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Club not found: {club_id}")]
    ClubNotFound { club_id: String },

    #[error("Lobby is full: {lobby_id}")]
    LobbyFull { lobby_id: String },

    #[error("Player already in lobby: {player_id}")]
    PlayerAlreadyPresent { player_id: String },

    #[error("Player not in lobby: {player_id}")]
    PlayerNotInLobby { player_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
