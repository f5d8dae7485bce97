//! Result descriptors returned by bulk writes, counts and raw queries.

use serde::{Deserialize, Serialize};

/// Outcome of a bulk update or soft delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Number of rows changed.
    pub affected: u64,
}

/// Outcome of a physical delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Number of rows removed.
    pub affected: u64,
}

/// Row count wrapped in a named field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Number of matching rows.
    pub count: u64,
}

/// One untyped result row of a raw query, keyed by column name.
pub type RawRow = serde_json::Map<String, serde_json::Value>;
