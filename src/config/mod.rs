/// Database configuration and connection management
pub mod database;

/// Admin defaults and cache tuning from config.toml
pub mod defaults;

/// Startup settings from environment variables
pub mod settings;
