//! Error types for nearby

use thiserror::Error;

/// Main error type for nearby operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Could not get your position: {0}")]
    NoPosition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Coordinator stopped")]
    CoordinatorStopped,
}

/// Result type alias for nearby operations
pub type Result<T> = std::result::Result<T, Error>;
