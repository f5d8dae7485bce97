//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use repokit_database::{DataManager, DogRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Persistence manager shared by every repository
    pub manager: DataManager,
    /// Dog repository
    pub dogs: Arc<DogRepository>,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire repositories onto a connected manager.
    pub fn new(manager: DataManager) -> Self {
        let dogs = Arc::new(DogRepository::new(manager.clone()));
        Self {
            manager,
            dogs,
            started_at: Instant::now(),
        }
    }
}
