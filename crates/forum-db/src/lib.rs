//! Database layer for the forum backend.
//!
//! Provides SQLite connection pooling (via `r2d2`) and the idempotent schema
//! initializer. Every table the forum uses is created by this crate.
//!
//! # Design decisions
//!
//! - **One pool per process**: the pool is created once at startup and handed
//!   to request handlers through application state. Handlers check out a
//!   connection for the duration of one operation; the pooled guard returns
//!   it on drop, so release happens on every exit path.
//! - **Foreign keys always on**: the `answers -> questions` cascade depends on
//!   `PRAGMA foreign_keys`, which SQLite leaves off by default. The pool's
//!   connection initializer turns it on for every connection it opens.
//! - **Embedded schema**: the DDL is compiled into the binary via
//!   `include_str!`, so the schema cannot drift from the code that queries it.

mod pool;
mod schema;

pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{initialize_schema, SchemaError};
