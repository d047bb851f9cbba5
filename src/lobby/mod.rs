//! Lobby domain for the booking service
//!
//! This module holds the membership state machine, the listing filters,
//! and the manager that drives booking use cases over the stores.

pub mod aggregate;
pub mod filter;
pub mod manager;

// Re-export commonly used types
pub use aggregate::{LobbyAggregate, LobbySettings};
pub use filter::LobbyFilters;
pub use manager::{CreateLobby, LobbyManager};
