//! Common error types for gigset

use thiserror::Error;

/// Common result type for gigset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the gigset crates
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog database failure
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure other than a missing file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file or catalog entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected user input, such as an empty song title
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tracing setup and other unexpected failures
    #[error("Internal error: {0}")]
    Internal(String),
}
