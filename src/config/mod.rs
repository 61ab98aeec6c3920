/// Database connection and table creation
pub mod database;

/// Seed dataset loading from TOML
pub mod dataset;

/// Runtime settings from environment variables
pub mod runtime;
