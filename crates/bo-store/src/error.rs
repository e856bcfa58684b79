//! Store error types

use bo_core::CoreError;
use thiserror::Error;

/// Error type for store operations
///
/// "Not found" on update/delete is NOT an error: those operations return
/// `Option`/`bool` so callers can distinguish "nothing changed" from
/// "operation failed".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Database(err.to_string())
    }
}
