//! Error types for the SMB explorer.

use thiserror::Error;

/// Common error type for the SMB explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Database error.
    ///
    /// Wraps any storage backend failure that is not a constraint violation.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty name, missing required field or otherwise malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Path that cannot be used for the requested operation.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// An entry already exists at the target path.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The share has no live session.
    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ExplorerError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ExplorerError::Conflict(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ExplorerError::DatabaseConnection(e.to_string())
            }
            _ => ExplorerError::Database(e.to_string()),
        }
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
