//! Persistence boundary for the booking service
//!
//! Traits describe the contracts the core consumes; the in-memory
//! implementations store the relational row shape so mapping and filter
//! behavior match what a database-backed store would do.

pub mod club;
pub mod lobby;
pub mod memory;
pub mod player;
pub mod rows;

// Re-export commonly used types
pub use club::ClubStore;
pub use lobby::LobbyStore;
pub use memory::{InMemoryClubStore, InMemoryLobbyStore, InMemoryPlayerStore};
pub use player::PlayerStore;
pub use rows::{from_rows, to_rows, LobbyRow, SideSlotRow};
