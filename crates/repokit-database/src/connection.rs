//! SQLite connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::info;

use repokit_core::config::DatabaseConfig;
use repokit_core::error::{AppError, ErrorKind};
use repokit_core::result::StoreResult;

/// The persistence manager shared by every entity store.
///
/// Wraps the sqlx connection pool. Cloning is cheap and every clone refers
/// to the same pool.
#[derive(Debug, Clone)]
pub struct DataManager {
    /// The underlying sqlx connection pool.
    pool: SqlitePool,
}

impl DataManager {
    /// Create a new manager from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            in_memory = config.is_in_memory(),
            "Connecting to SQLite"
        );

        let connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database URL '{}'", config.url),
                    e,
                )
            })?
            .create_if_missing(true);

        let pool = pool_options(config)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Successfully connected to SQLite");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction on a pooled connection.
    pub async fn transaction(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Pool sizing for a configuration.
///
/// In-memory databases live only as long as their one connection, so that
/// connection is pinned: exactly one, never idled out, never recycled.
fn pool_options(config: &DatabaseConfig) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

    if config.is_in_memory() {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
    }
}
