//! Forum server library logic.
//!
//! Builds the axum router for the question/answer API and owns the startup
//! sequence: the schema is initialized before the listener is bound, and a
//! failure at any startup step is returned as a [`StartupError`] instead of
//! serving against a broken store.

pub mod api;
pub mod api_answers;
pub mod api_questions;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use forum_db::DbPool;
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, created once at startup.
    pub pool: DbPool,
}

/// Maximum request body size (64 KiB).
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Errors that prevent the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The connection pool could not be created.
    #[error(transparent)]
    Pool(#[from] forum_db::PoolError),

    /// A connection for schema initialization could not be checked out.
    #[error("failed to get database connection for schema setup: {0}")]
    Connection(#[from] r2d2::Error),

    /// The schema could not be created.
    #[error(transparent)]
    Schema(#[from] forum_db::SchemaError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/questions",
            get(api_questions::list_questions_handler)
                .post(api_questions::create_question_handler),
        )
        .route(
            "/api/questions/{id}",
            get(api_questions::get_question_handler)
                .delete(api_questions::delete_question_handler),
        )
        .route(
            "/api/questions/{id}/answers",
            post(api_answers::create_answer_handler),
        )
        .route(
            "/api/answers/{id}",
            delete(api_answers::delete_answer_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

/// Opens the store and makes sure its schema exists.
///
/// Must complete before [`serve`] is called.
///
/// # Errors
///
/// Returns `StartupError` if the pool cannot be created or the schema
/// cannot be initialized.
pub fn init_database(config: &config::DatabaseConfig) -> Result<DbPool, StartupError> {
    let pool = forum_db::create_pool(&config.path, config.runtime_settings())?;
    {
        let conn = pool.get()?;
        forum_db::initialize_schema(&conn)?;
    }
    tracing::info!(path = %config.path, "database initialized");
    Ok(pool)
}

/// Binds the configured address and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns `StartupError::Bind` if the address is unavailable and
/// `StartupError::Serve` if the server fails while running.
pub async fn serve<F>(
    config: &config::ServerConfig,
    pool: DbPool,
    shutdown: F,
) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    let local_addr = listener.local_addr().unwrap_or(addr);
    tracing::info!(addr = %local_addr, "starting forum server");

    axum::serve(listener, app(AppState { pool }))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)
}
