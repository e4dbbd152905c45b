//! Error types for geo-addresses

use thiserror::Error;

/// Main error type for geo-addresses operations
#[derive(Error, Debug)]
pub enum Error {
    /// No address matched the requested id or coordinates
    #[error("Address not found")]
    NotFound,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for geo-addresses operations
pub type Result<T> = std::result::Result<T, Error>;
