//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use prompt_curator_core::{CreatePromptInput, Prompt, PromptId, UpdatePromptInput};

use crate::error::StorageError;
use crate::traits::PromptStore;

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("enable at least one of the `sqlite` or `postgres` features");

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::SqliteStorage as PromptStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::PgStorage as PromptStore>::$method(s, $($arg),*).await,
        }
    };
}

/// Which backend a database URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Postgres,
}

impl BackendKind {
    #[must_use]
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStorage),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgStorage),
}

impl StorageBackend {
    /// Connects to the backend named by the URL scheme and runs its migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let kind = BackendKind::from_url(database_url);
        tracing::info!(url = %redact_url(database_url), ?kind, "connecting to storage");
        match kind {
            #[cfg(feature = "sqlite")]
            Some(BackendKind::Sqlite) => {
                Ok(Self::Sqlite(crate::SqliteStorage::new(database_url).await?))
            },
            #[cfg(feature = "postgres")]
            Some(BackendKind::Postgres) => {
                Ok(Self::Postgres(crate::PgStorage::new(database_url).await?))
            },
            _ => Err(StorageError::UnsupportedUrl(redact_url(database_url))),
        }
    }

    #[cfg(feature = "sqlite")]
    pub async fn new_sqlite_in_memory() -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteStorage::in_memory().await?))
    }

    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => BackendKind::Sqlite,
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => BackendKind::Postgres,
        }
    }
}

/// Hides the `user:password@` part of a connection URL for logging.
#[must_use]
pub fn redact_url(database_url: &str) -> String {
    match (database_url.find("://"), database_url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &database_url[..scheme_end], &database_url[at..])
        },
        _ => database_url.to_owned(),
    }
}

// ── PromptStore ──────────────────────────────────────────────────

#[async_trait]
impl PromptStore for StorageBackend {
    async fn create_prompt(&self, input: &CreatePromptInput) -> Result<Prompt, StorageError> {
        dispatch!(self, create_prompt(input))
    }

    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError> {
        dispatch!(self, get_prompt(id))
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError> {
        dispatch!(self, list_prompts())
    }

    async fn update_prompt(
        &self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, StorageError> {
        dispatch!(self, update_prompt(input))
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<bool, StorageError> {
        dispatch!(self, delete_prompt(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_scheme_selects_backend() {
        assert_eq!(BackendKind::from_url("postgres://u:p@db/prompts"), Some(BackendKind::Postgres));
        assert_eq!(BackendKind::from_url("postgresql://db/prompts"), Some(BackendKind::Postgres));
        assert_eq!(BackendKind::from_url("sqlite::memory:"), Some(BackendKind::Sqlite));
        assert_eq!(BackendKind::from_url("mysql://db"), None);
    }

    #[test]
    fn redact_hides_credentials() {
        assert_eq!(redact_url("postgres://user:secret@db:5432/p"), "postgres://***@db:5432/p");
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = StorageBackend::connect("mysql://root:pw@localhost/db").await.unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedUrl(ref url) if !url.contains("pw")));
    }
}
