//! Error types for the movable domain.

use std::fmt;

use thiserror::Error;

/// Direction of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Failure reported by a repository collaborator.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Entity has no ID")]
    MissingId,

    #[error("Entity {0} is already stored")]
    AlreadyStored(i32),

    #[error("Entity not found: {0}")]
    NotFound(i32),

    #[error("Identifier sequence exhausted")]
    SequenceExhausted,

    #[error("{0}")]
    Custom(String),
}

impl RepositoryError {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        RepositoryError::Custom(msg.into())
    }
}

/// Failure reported by a cache collaborator.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Custom(String),
}

/// Error returned by service operations.
///
/// Precondition violations are raised by the service itself; storage
/// failures are the collaborator's error, passed through untouched.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Argument '{0}' must not be null")]
    NullArgument(&'static str),

    #[error("Entity {0} is not part of the collection")]
    NotInCollection(i32),

    #[error("Entity {id} can't be moved {direction}")]
    NotMovable { id: i32, direction: Direction },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ServiceError {
    /// Whether the caller broke an operation precondition.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ServiceError::NullArgument(_)
                | ServiceError::NotInCollection(_)
                | ServiceError::NotMovable { .. }
        )
    }

    /// Stable machine-readable code for structured reporting.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NullArgument(_) => "NULL_ARGUMENT",
            ServiceError::NotInCollection(_) => "NOT_IN_COLLECTION",
            ServiceError::NotMovable { .. } => "NOT_MOVABLE",
            ServiceError::Repository(_) => "REPOSITORY_ERROR",
            ServiceError::Cache(_) => "CACHE_ERROR",
        }
    }
}
