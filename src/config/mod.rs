//! Configuration management for the courtside service
//!
//! This module handles all configuration loading from environment
//! variables or a TOML file, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, BookingSettings, HttpSettings, ServiceSettings};
