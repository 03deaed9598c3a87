//! Vectorino - semantic Jeopardy search server
//!
//! # Usage
//!
//! ```bash
//! # Seed the collection once
//! cargo run --release --bin vectorino-seed
//!
//! # Serve the search page
//! cargo run --release -- --addr 127.0.0.1:3000
//! ```
//!
//! # Environment Variables
//!
//! - `WCD_URL`: Weaviate Cloud endpoint (required)
//! - `WCD_API_KEY`: Weaviate Cloud API key (required)
//! - `OPENAI_APIKEY`: key forwarded to the vectorizer (required)
//! - `VECTORINO_CONFIG`: path to a TOML config file
//! - `VECTORINO_SERVER_ADDR`: bind address override
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use vectorino::api::{create_app, AppState};
use vectorino::config::{AppConfig, Credentials};
use vectorino::store::{Connection, QuestionStore, WeaviateStore};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vectorino")]
#[command(about = "Vectorino semantic question search server")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a vectorino.toml config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// Server
// ============================================================================

/// Serve until `cancel_token` fires, then close the store connection.
async fn run_server(
    config: AppConfig,
    connection: Arc<Connection>,
    server_addr: &str,
    cancel_token: CancellationToken,
) -> Result<()> {
    let store: Arc<dyn QuestionStore> = Arc::new(WeaviateStore::new(
        Arc::clone(&connection),
        config.store.clone(),
    ));

    // Establish the connection up front; a failure here is retried on the
    // first request rather than aborting startup.
    match connection.client().await {
        Ok(_) => info!("✓ Vector store connected: {}", connection.endpoint()),
        Err(e) => warn!(
            error = %e,
            "Vector store not reachable at startup, will retry on first search"
        ),
    }

    let app = create_app(AppState::new(store, config.ui.clone()));

    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;

    info!("✓ HTTP server listening on {}", server_addr);
    info!("🔎 Search page available at: http://{}", server_addr);

    let shutdown = cancel_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    connection.close().await;
    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let credentials = Credentials::from_env().context("Missing vector store credentials")?;
    let server_addr = config.server_addr(args.addr);

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Vectorino - semantic question search");
    info!(
        "  Store: {} | Collection: {} | Limit: {}",
        credentials.endpoint, config.store.collection, config.store.result_limit
    );
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let connection = Arc::new(Connection::new(
        credentials,
        config.store.request_timeout_secs.map(Duration::from_secs),
    ));

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    run_server(config, connection, &server_addr, cancel_token).await?;

    info!("✓ Vectorino shutdown complete");
    Ok(())
}
