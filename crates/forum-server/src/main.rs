//! Forum server binary.
//!
//! Loads configuration, initializes structured logging and the database
//! schema, then serves the question/answer API with graceful shutdown on
//! SIGTERM/SIGINT. Any startup failure exits with a non-zero status before
//! the listener accepts a connection.

use forum_server::config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("FORUM_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().unwrap_or("config.toml");

    let config = match config::load_config(Some(selected_config_path)) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet.
            eprintln!("forum-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path,
        "resolved startup configuration path"
    );

    let pool = match forum_server::init_database(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize database, refusing to serve");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = forum_server::serve(&config.server, pool, shutdown_signal()).await {
        tracing::error!(error = %e, "forum server stopped with an error");
        return ExitCode::FAILURE;
    }

    tracing::info!("forum server shut down");
    ExitCode::SUCCESS
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
