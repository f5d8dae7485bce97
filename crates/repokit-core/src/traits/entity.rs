//! The entity trait: what a record type must declare to be persisted.

use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

use crate::types::partial::Partial;

/// A persisted record type with an identity column and a soft-delete column.
///
/// Rows are mapped with `sqlx::FromRow`. Column names listed in
/// [`COLUMNS`](Entity::COLUMNS) are the only identifiers a store will place
/// into generated SQL; everything else is bound as a parameter.
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// pub struct Dog {
///     pub id: i64,
///     pub name: String,
///     pub age: i64,
///     pub deleted_at: Option<DateTime<Utc>>,
/// }
///
/// impl Entity for Dog {
///     const NAME: &'static str = "Dog";
///     const TABLE: &'static str = "dogs";
///     const COLUMNS: &'static [&'static str] = &["id", "name", "age", "deleted_at"];
/// }
/// ```
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Human-readable entity name used in logs and errors.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Primary key column.
    const PRIMARY_KEY: &'static str = "id";
    /// Nullable timestamp column marking soft-deleted rows.
    const DELETED_AT: &'static str = "deleted_at";
    /// Every column of the table, primary key and soft-delete column included.
    const COLUMNS: &'static [&'static str];

    /// Values applied when a record is materialized, before caller data.
    fn defaults() -> Partial<Self> {
        Partial::new()
    }

    /// Whether `column` is declared by this entity.
    fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column)
    }
}
