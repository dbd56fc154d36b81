//! Common error types for birdlog

use thiserror::Error;

/// Common result type for birdlog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across birdlog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or seed value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
