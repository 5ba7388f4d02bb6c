//! Connection pool creation and configuration.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use std::time::Duration;
use thiserror::Error;

/// Path that selects a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    ///
    /// Ignored for `:memory:` stores, which always use a single connection.
    pub pool_max_size: u32,

    /// How long pool creation and checkout wait for a usable connection,
    /// in milliseconds.
    pub connection_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 4,
            connection_timeout_ms: 30_000,
        }
    }
}

/// A type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Creates a new SQLite connection pool with foreign keys enabled.
///
/// File-backed stores run in WAL mode so readers do not block the single
/// writer. Each in-memory connection would be its own empty database, so a
/// `:memory:` path is capped at one connection and every caller shares it.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file. Use `:memory:` for an
///   in-memory database (useful for testing).
///
/// # Errors
///
/// Returns `PoolError::PoolInit` if no connection can be opened and
/// initialized within `connection_timeout_ms`.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

    let in_memory = db_path == IN_MEMORY_PATH;
    let busy_timeout_ms = settings.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(flags)
        .with_init(move |conn| prepare_connection(conn, in_memory, busy_timeout_ms));

    let max_size = if in_memory {
        1
    } else {
        settings.pool_max_size.max(1)
    };

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_millis(settings.connection_timeout_ms.max(1)))
        .build(manager)?;

    tracing::debug!(path = db_path, max_size, "database pool created");

    Ok(pool)
}

/// Applies the per-connection pragmas every pooled handle needs.
///
/// `foreign_keys` is off by default in SQLite and the answer cascade
/// depends on it.
fn prepare_connection(
    conn: &mut Connection,
    in_memory: bool,
    busy_timeout_ms: u64,
) -> rusqlite::Result<()> {
    if !in_memory {
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("wal") {
            tracing::warn!(journal_mode = %mode, "store did not switch to WAL journaling");
        }
    }
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_in_memory_pool() {
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 2_500,
            pool_max_size: 3,
            ..Default::default()
        };

        let pool = create_pool(":memory:", settings).expect("pool creation should succeed");
        let conn = pool.get().expect("should get a connection");

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(fk, 1, "foreign keys should be enabled");

        let busy_timeout: i32 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(busy_timeout, 2_500, "busy timeout should match settings");

        // A shared in-memory store must not fan out into separate databases.
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn in_memory_pool_shares_one_database() {
        let pool = create_pool(":memory:", DbRuntimeSettings::default()).unwrap();

        {
            let conn = pool.get().unwrap();
            conn.execute_batch("CREATE TABLE shared_marker (id INTEGER PRIMARY KEY);")
                .unwrap();
        }

        let conn = pool.get().unwrap();
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'shared_marker')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "second checkout should see the first one's table");
    }

    #[test]
    fn file_pool_uses_wal_and_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forum.db");
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 1_000,
            pool_max_size: 3,
            ..Default::default()
        };

        let pool = create_pool(path.to_str().unwrap(), settings).unwrap();
        assert_eq!(pool.max_size(), 3);

        let conn = pool.get().unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "wal");
    }

    #[test]
    fn unopenable_path_fails_within_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("forum.db");
        let settings = DbRuntimeSettings {
            connection_timeout_ms: 200,
            ..Default::default()
        };

        let err = create_pool(path.to_str().unwrap(), settings)
            .expect_err("a path under a missing directory cannot be opened");
        assert!(matches!(err, PoolError::PoolInit(_)));
    }
}
