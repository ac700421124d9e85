//! Storage layer for prompt-curator
//!
//! One `prompts` table behind the [`PromptStore`] trait, backed by
//! PostgreSQL or SQLite through sqlx.

mod backend;
mod codec;
pub mod error;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_migrations;
#[cfg(feature = "sqlite")]
mod sqlite_storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::{BackendKind, StorageBackend, redact_url};
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use sqlite_storage::SqliteStorage;
pub use traits::PromptStore;
