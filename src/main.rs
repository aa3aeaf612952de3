use clap::Parser;
use tracing_subscriber::EnvFilter;

use personnel_guard::cli::{self, Cli};
use personnel_guard::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, FIELD_ENCRYPTION_KEY, etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = config::config();
    tracing::debug!("Running in {:?} mode", config.environment);

    let result = cli::run(Cli::parse()).await;
    personnel_guard::database::DatabaseManager::close().await;
    result
}
