/// Database configuration and connection management
pub mod database;

/// Ledger settings loading from ledger.toml
pub mod settings;
