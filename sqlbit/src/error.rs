use std::sync::PoisonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("primary key must be provided to load entity")]
    MissingPrimaryKey,

    #[error("type adapter {0} is not registered")]
    AdapterNotRegistered(String),

    #[error("type adapter {0} registered with a different type")]
    AdapterMismatch(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("Poison error: {0}")]
    Poisoned(String),

    #[error("database version {current} is newer than requested version {requested}")]
    Downgrade { current: u32, requested: u32 },

    #[error("invalid database version {0}, must be at least 1")]
    InvalidVersion(u32),
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(e: PoisonError<T>) -> Self {
        AppError::Poisoned(e.to_string())
    }
}
