//! Dog entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use repokit_core::traits::Entity;
use repokit_core::types::Partial;

/// A dog registered in the kennel.
///
/// Non-key fields fall back to their defaults when a projection leaves
/// them out of the selected columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Dog {
    /// Generated identifier.
    pub id: i64,
    /// Call name.
    #[sqlx(default)]
    pub name: String,
    /// Age in years.
    #[sqlx(default)]
    pub age: i64,
    /// When the row was inserted.
    #[sqlx(default)]
    pub created_at: DateTime<Utc>,
    /// Set when the dog has been soft-deleted.
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Dog {
    /// Whether the row carries a soft-delete mark.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Entity for Dog {
    const NAME: &'static str = "Dog";
    const TABLE: &'static str = "dogs";
    const COLUMNS: &'static [&'static str] = &["id", "name", "age", "created_at", "deleted_at"];

    fn defaults() -> Partial<Self> {
        Partial::new().set("age", 0)
    }
}
