mod app;
mod config;
mod handlers;
mod state;
mod storage;
mod views;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::{create_app, DEFAULT_STATIC_DIR},
    config::{Config, LogFormat},
    state::AppState,
};

/// mvclab - A server-rendered item list
#[derive(Parser, Debug)]
#[command(name = "mvclab")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Connection URL of the item store
    #[arg(long, default_value = storage::DEFAULT_DATABASE_URL, env = "DATABASE_URL")]
    database_url: String,

    /// Directory served for paths that match no route
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "STATIC_DIR")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    init_tracing(config.log_format);

    // The store must be reachable before anything listens
    let items = storage::connect(&cli.database_url, &config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to connect to the item store"))
        .context("failed to connect to the item store")?;

    let state = AppState::new(items);
    let app = create_app(state, &cli.static_dir);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?
        }
    };

    tracing::info!(
        static_dir = %cli.static_dir.display(),
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mvclab=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "mvclab",
            "--port",
            "8080",
            "--database-url",
            "memory://other",
            "--static-dir",
            "assets",
        ])
        .unwrap();

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.database_url, "memory://other");
        assert_eq!(cli.static_dir, PathBuf::from("assets"));
    }

    #[cfg(feature = "inmemory")]
    #[tokio::test]
    async fn test_default_static_dir_serves_stylesheet() {
        use axum::{
            body::Body,
            http::{Request, StatusCode},
        };
        use tower::ServiceExt;

        std::env::remove_var("STATIC_DIR");
        let cli = Cli::try_parse_from(["mvclab"]).unwrap();
        assert_eq!(cli.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));

        let app = create_app(AppState::default(), &cli.static_dir);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
