//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use repokit_api::{AppState, build_app};
use repokit_core::config::AppConfig;
use repokit_core::types::{Partial, SaveOptions};
use repokit_database::migration::run_migrations;
use repokit_database::{DataManager, GenericRepository};
use repokit_entity::Dog;

/// Connect a fresh in-memory database with the schema applied.
pub async fn manager() -> DataManager {
    let manager = DataManager::connect(&AppConfig::default().database)
        .await
        .expect("Failed to connect to test database");
    run_migrations(&manager)
        .await
        .expect("Failed to run migrations");
    manager
}

/// Generic dog repository over a fresh database.
pub async fn dogs() -> GenericRepository<Dog> {
    GenericRepository::from_manager(manager().await)
}

/// Partial dog with a name and an age.
pub fn dog(name: &str, age: i64) -> Partial<Dog> {
    Partial::new().set("name", name).set("age", age)
}

/// Insert one dog per `(name, age)` pair, in order.
pub async fn seed(repo: &GenericRepository<Dog>, pack: &[(&str, i64)]) -> Vec<Dog> {
    repo.create_many(
        pack.iter().map(|(name, age)| dog(name, *age)).collect(),
        SaveOptions::default(),
    )
    .await
    .expect("Failed to seed dogs")
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Persistence manager for direct checks
    pub manager: DataManager,
}

/// Test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let manager = manager().await;
        let router = build_app(AppState::new(manager.clone()));
        Self { router, manager }
    }

    /// Send a request with an empty body and parse the JSON response.
    pub async fn request(&self, method: &str, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }
}
