//! Idempotent schema initialization.
//!
//! The forum has no versioned migrations: the schema is a fixed set of
//! `CREATE ... IF NOT EXISTS` statements applied on every start. Running it
//! against a database that already has the tables is a no-op.

use rusqlite::Connection;
use thiserror::Error;

/// DDL for the `questions` and `answers` tables and their indexes.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables the schema is expected to create.
const TABLES: &[&str] = &["questions", "answers"];

/// Errors that can occur while initializing the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A DDL statement failed.
    #[error("schema initialization failed: {0}")]
    ExecutionFailed(#[source] rusqlite::Error),

    /// The statements ran but a required table is still absent.
    #[error("table '{0}' missing after schema initialization")]
    MissingTable(&'static str),
}

/// Creates the `questions` and `answers` tables if they do not exist.
///
/// All statements run inside one transaction, so a failure leaves the
/// database as it was. The foreign key from `answers.question_id` carries
/// `ON DELETE CASCADE`; it is only enforced on connections with
/// `PRAGMA foreign_keys = ON`, which [`create_pool`](crate::create_pool)
/// sets on every connection.
///
/// # Errors
///
/// Returns `SchemaError` if any statement fails or a table is missing
/// afterwards.
pub fn initialize_schema(conn: &Connection) -> Result<(), SchemaError> {
    let tx = conn
        .unchecked_transaction()
        .map_err(SchemaError::ExecutionFailed)?;
    tx.execute_batch(SCHEMA_SQL)
        .map_err(SchemaError::ExecutionFailed)?;
    tx.commit().map_err(SchemaError::ExecutionFailed)?;

    for table in TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )
            .map_err(SchemaError::ExecutionFailed)?;
        if !exists {
            return Err(SchemaError::MissingTable(table));
        }
    }

    tracing::info!(tables = ?TABLES, "database schema ready");
    Ok(())
}
