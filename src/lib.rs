//! Courtside - Booking backend for court-based group activities
//!
//! This crate provides lobby scheduling for clubs and courts: players
//! register, create time-slotted lobbies, and join one of two sides until
//! capacity is reached and the lobby is confirmed.

pub mod api;
pub mod config;
pub mod error;
pub mod lobby;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LobbyError, Result};
pub use types::*;

// Re-export key components
pub use lobby::{LobbyAggregate, LobbyFilters, LobbyManager};
pub use store::{ClubStore, LobbyStore, PlayerStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
