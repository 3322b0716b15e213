//! Error types for repeaterbook

use thiserror::Error;

/// Main error type for repeaterbook operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be completed (connection failure, non-2xx status)
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with its own error envelope
    #[error("API error: {0}")]
    Api(String),

    /// The response is structurally malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A cache artifact could not be read or atomically written
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for repeaterbook operations
pub type Result<T> = std::result::Result<T, Error>;
