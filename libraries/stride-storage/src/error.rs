/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored row could not be mapped back to a domain type
    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow { table: String, reason: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a corrupt row error
    pub fn corrupt_row(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptRow {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for stride_core::StrideError {
    fn from(err: StorageError) -> Self {
        stride_core::StrideError::storage(err.to_string())
    }
}
