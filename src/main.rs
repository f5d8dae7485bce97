//! Repokit Server: generic repository demo over SQLite.
//!
//! Loads configuration, connects the persistence manager, runs migrations
//! and serves the dog demo API.

use tracing_subscriber::{EnvFilter, fmt};

use repokit_core::config::AppConfig;
use repokit_core::error::AppError;
use repokit_database::DataManager;
use repokit_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("REPOKIT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Repokit v{}", env!("CARGO_PKG_VERSION"));

    let manager = DataManager::connect(&config.database).await?;

    if config.database.run_migrations {
        run_migrations(&manager).await?;
    }

    repokit_api::run_server(config, manager).await
}
