//! Database configuration.

use serde::{Deserialize, Serialize};

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite::memory:` or `sqlite://path/to/file.db`).
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Whether to apply pending migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            url: default_url(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            run_migrations: true,
        }
    }

    /// Whether the URL points at an in-memory database.
    ///
    /// Every connection to such a URL opens its own empty database, so the
    /// pool must be pinned to a single connection that is never recycled.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn default_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_run_migrations() -> bool {
    true
}
