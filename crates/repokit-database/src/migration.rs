//! Database migration runner.

use tracing::info;

use repokit_core::error::StoreError;
use repokit_core::result::StoreResult;

use crate::connection::DataManager;

/// Run all pending database migrations.
pub async fn run_migrations(manager: &DataManager) -> StoreResult<()> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(manager.pool())
        .await
        .map_err(StoreError::from)?;

    info!("Database migrations completed successfully");
    Ok(())
}
