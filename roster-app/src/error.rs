/// Error handling for the Roster application
///
/// Everything that can go wrong while booting the application funnels into
/// [`AppError`]. Store failures keep their own type underneath so callers can
/// still match on duplicate ids or emails.
///
/// # Example
///
/// ```
/// use roster_app::error::{AppError, AppResult};
///
/// fn check_pool_size(size: u32) -> AppResult<u32> {
///     if size == 0 {
///         return Err(AppError::Config("pool size must be positive".to_string()));
///     }
///     Ok(size)
/// }
///
/// assert_eq!(check_pool_size(0).unwrap_err().code(), "config_error");
/// ```

use roster_shared::store::StoreError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Application result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Connecting to or querying the database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying embedded migrations failed
    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),
}

impl AppError {
    /// Stable, machine-readable error code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Store(StoreError::DuplicateId(_)) | AppError::Store(StoreError::DuplicateEmail(_)) => {
                "conflict"
            }
            AppError::Store(StoreError::IdSpaceExhausted) => "id_space_exhausted",
            AppError::Store(StoreError::Database(_)) | AppError::Database(_) => "database_error",
            AppError::Migration(_) => "migration_error",
        }
    }
}
