//! Core error types for obsbind

use ob_protocol::ConsoleError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for obsbind operations
#[derive(Error, Debug)]
pub enum ObError {
    /// Console transport error
    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to bind against; saving would wipe every stored binding
    #[error("Player list is empty. Refresh first.")]
    EmptyRoster,
}

/// Configuration and persistence errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration rejected before any network attempt
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// State file could not be read
    #[error("Failed to read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// State file could not be written
    #[error("Failed to write {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
