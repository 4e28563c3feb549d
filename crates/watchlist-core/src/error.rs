use thiserror::Error;
use watchlist_sources::SourceError;

/// Error taxonomy shared by the catalog synchronizer and the list manager.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required entity absent, locally or upstream
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation references an entity that must already exist
    #[error("referential integrity: {0}")]
    Referential(String),

    /// Malformed caller input
    #[error("invalid input: {0}")]
    Validation(String),

    /// Metadata provider unreachable, timed out, or returned garbage
    #[error("metadata provider unavailable: {0}")]
    TransientProvider(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn referential(msg: impl Into<String>) -> Self {
        Self::Referential(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transient(msg: impl Into<String>) -> Self {
        Self::TransientProvider(msg.into())
    }
}

impl From<SourceError> for CoreError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::NotFound(what) => CoreError::NotFound(what),
            other => CoreError::TransientProvider(other.to_string()),
        }
    }
}

impl From<watchlist_models::ParseKindError> for CoreError {
    fn from(e: watchlist_models::ParseKindError) -> Self {
        CoreError::Validation(e.to_string())
    }
}
