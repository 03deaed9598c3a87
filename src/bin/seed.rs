//! Vectorino seed: create the question collection and import the dataset
//!
//! ```bash
//! cargo run --release --bin vectorino-seed
//! ```
//!
//! ## Environment variables
//!
//! | Variable           | Required | Description                              |
//! |--------------------|----------|------------------------------------------|
//! | `WCD_URL`          | Yes      | Weaviate Cloud endpoint                  |
//! | `WCD_API_KEY`      | Yes      | Weaviate Cloud API key                   |
//! | `OPENAI_APIKEY`    | Yes      | Key forwarded to the vectorizer          |
//! | `VECTORINO_CONFIG` | No       | TOML config (collection, dataset URL)    |
//! | `VECTORINO_DATASET_URL` | No  | Dataset URL override (`--dataset-url`)   |
//!
//! Exits non-zero with the error on stderr if any step fails.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use vectorino::config::{AppConfig, Credentials};
use vectorino::seed;
use vectorino::store::{Connection, WeaviateStore};

#[derive(Parser, Debug)]
#[command(
    name = "vectorino-seed",
    version,
    about = "Create the Vectorino collection and bulk import the Jeopardy dataset"
)]
struct CliArgs {
    /// Path to a vectorino.toml config file
    #[arg(short, long, value_name = "PATH", env = "VECTORINO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the dataset URL from the config file
    #[arg(long, env = "VECTORINO_DATASET_URL")]
    dataset_url: Option<String>,
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut config =
        AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = args.dataset_url {
        config.seed.dataset_url = url;
        config.validate().context("Invalid --dataset-url")?;
    }
    let credentials = Credentials::from_env().context("Missing vector store credentials")?;

    let connection = Arc::new(Connection::new(
        credentials,
        config.store.request_timeout_secs.map(Duration::from_secs),
    ));
    let store = WeaviateStore::new(Arc::clone(&connection), config.store.clone());
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    info!(
        collection = %config.store.collection,
        dataset = %config.seed.dataset_url,
        "Seeding vector store"
    );

    let result = seed::run(&store, &http, &config.seed.dataset_url).await;
    connection.close().await;

    let report = result.context("Seed run failed")?;
    info!(
        collection = %report.collection,
        inserted = report.summary.inserted(),
        "Seed complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
