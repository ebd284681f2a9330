//! Error types for inspekt

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV loader error: {0}")]
    CsvLoader(String),

    /// Credential could not be acquired or was rejected after a refresh
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Remote dataset fetch exhausted its retry budget
    #[error("{operation} failed: {message}")]
    Fetch { operation: String, message: String },

    /// Label color lookup exhausted its retry budget
    #[error("Color lookup for label {label_id} failed: {message}")]
    Lookup { label_id: String, message: String },

    #[error("Columns [{}] are not in the data, remove them from the key list", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Invalid inspection date in row {row}: {value:?} (expected YYYY-MM-DD)")]
    Render { row: usize, value: String },

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
