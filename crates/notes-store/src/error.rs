//! Error types for the storage layer.

use notes_core::{CodecError, NoteId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or driver error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// No note has this identifier.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// A stored identifier could not be decoded.
    #[error("corrupt note id in storage: {0}")]
    Codec(#[from] CodecError),

    /// The store did not confirm an insert.
    #[error("insert was not confirmed by the database")]
    WriteUnconfirmed,

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether this is a point-lookup miss rather than a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound(_))
    }
}
