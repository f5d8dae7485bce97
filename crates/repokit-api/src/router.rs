//! Route definitions for the Repokit HTTP API.
//!
//! The dog demo lives at the root; health checks are mounted under `/api`.

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(dog_routes())
        .nest("/api", health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Dog demo endpoints
fn dog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::dog::list_dogs))
        .route("/create", get(handlers::dog::create_dog))
        .route("/dogs", get(handlers::dog::list_dogs_paged))
        .route("/dogs/{name}", get(handlers::dog::get_dog_by_name))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
