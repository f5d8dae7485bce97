//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: `"info"`, `"repokit_database=debug"`, ...
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
