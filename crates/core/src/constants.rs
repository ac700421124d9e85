//! Shared constants for prompt-curator.
//!
//! Centralizes limits and defaults used by more than one crate.

/// Maximum prompt text length accepted by the client form.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Maximum description length accepted by the client form.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Maximum length of a single tag accepted by the client form.
pub const MAX_TAG_CHARS: usize = 20;

/// Maximum number of tags per prompt accepted by the client form.
pub const MAX_TAGS: usize = 10;

/// Default TCP port of the RPC server.
pub const DEFAULT_SERVER_PORT: u16 = 2022;

/// Default bind address of the RPC server.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// SQLite connection pool: maximum connections.
///
/// In-memory databases are per-connection, so they always use a single one.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 8;
