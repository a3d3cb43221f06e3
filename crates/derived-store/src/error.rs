//! Store error types.

use thiserror::Error;

/// Errors that can occur when persisting or reading derived collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored alert level label was not one of the known values.
    #[error("invalid alert level `{0}` in stored row")]
    InvalidAlertLevel(String),
}

/// Result type for derived store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
