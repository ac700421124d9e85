//! Typed error enum for the storage layer.
//!
//! A missing row is not an error here: lookups return `Option` and deletes
//! return `bool`. Everything in this enum is a genuine failure that the
//! service layer logs and propagates.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be decoded into a `Prompt`.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema setup failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database URL scheme not handled by any enabled backend.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

impl StorageError {
    /// Whether this error is likely transient (connectivity rather than data).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }

    pub(crate) fn corrupt(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DataCorruption { context: context.into(), source: source.into() }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::corrupt("JSON serialization/deserialization", err)
    }
}
