use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// A missing row is not an error: lookups return `Ok(None)` instead. All
/// failures propagate to the immediate caller; this layer never retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// An operation other than `initialize` ran before initialization.
    #[error("Storage not initialized")]
    Uninitialized,
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
