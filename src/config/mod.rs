/// Database configuration and connection management
pub mod database;

/// Batch seed configuration loading from config.toml
pub mod batches;
