//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use tower_http::trace::TraceLayer;

use repokit_core::config::AppConfig;
use repokit_core::error::AppError;
use repokit_database::DataManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Serve the API until Ctrl+C, then close the pool.
pub async fn run_server(config: AppConfig, manager: DataManager) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = AppState::new(manager.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Repokit server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    manager.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
