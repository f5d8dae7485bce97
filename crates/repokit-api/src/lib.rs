//! # repokit-api
//!
//! HTTP layer for Repokit built on Axum.
//!
//! Exposes the dog demo endpoints and health checks, and maps domain errors
//! onto HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
