//! Health check handlers.

use axum::Json;
use axum::extract::State;

use repokit_database::CrudRepository;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<DetailedHealthResponse>>> {
    let connected = state.manager.health_check().await?;
    let dogs = state.dogs.count(None).await?;

    Ok(Json(ApiResponse::ok(DetailedHealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        database: if connected { "connected" } else { "unreachable" }.to_string(),
        dogs: dogs.count,
    })))
}
