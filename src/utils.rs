//! Utility functions for the booking service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique lobby ID
pub fn generate_lobby_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}
