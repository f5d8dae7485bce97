//! Entity store trait: the persistence capability a repository delegates to.

use async_trait::async_trait;

use crate::result::StoreResult;
use crate::traits::entity::Entity;
use crate::types::filter::Criteria;
use crate::types::find::{FindOptions, SaveOptions};
use crate::types::outcome::{DeleteResult, RawRow, UpdateResult};
use crate::types::partial::Partial;
use crate::types::value::Value;

/// A store bound to one entity type and one persistence manager.
///
/// Implementations own query generation, transactions and connection use.
/// Callers pass options through untouched and receive the store's errors
/// untouched.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync + 'static {
    /// The persistence context this store runs against.
    type Manager: Send + Sync;

    /// The shared persistence context.
    fn manager(&self) -> &Self::Manager;

    /// First row matching `options`, or `None`.
    async fn find_one(&self, options: FindOptions) -> StoreResult<Option<T>>;

    /// All rows matching `options`.
    async fn find(&self, options: FindOptions) -> StoreResult<Vec<T>>;

    /// Rows matching `options`, plus the number of matches ignoring `skip`/`take`.
    async fn find_and_count(&self, options: FindOptions) -> StoreResult<(Vec<T>, u64)>;

    /// Materialize a record from partial data without touching the database.
    fn create(&self, data: Partial<T>) -> Partial<T>;

    /// Materialize several records.
    fn create_many(&self, data: Vec<Partial<T>>) -> Vec<Partial<T>> {
        data.into_iter().map(|d| self.create(d)).collect()
    }

    /// Insert a record, or update it when its primary key is set.
    async fn save(&self, record: Partial<T>, options: SaveOptions) -> StoreResult<T>;

    /// Save several records.
    async fn save_many(&self, records: Vec<Partial<T>>, options: SaveOptions)
    -> StoreResult<Vec<T>>;

    /// Like [`save`](Self::save), but the primary key is mandatory.
    async fn upsert(&self, record: Partial<T>, options: SaveOptions) -> StoreResult<T>;

    /// Set `patch` on every row matching `criteria`.
    async fn update(&self, criteria: Criteria, patch: Partial<T>) -> StoreResult<UpdateResult>;

    /// Run caller-supplied SQL with positional parameters.
    async fn query(&self, sql: &str, params: Vec<Value>) -> StoreResult<Vec<RawRow>>;

    /// Mark rows matching `criteria` as deleted.
    async fn soft_delete(&self, criteria: Criteria) -> StoreResult<UpdateResult>;

    /// Physically remove rows matching `criteria`.
    async fn delete(&self, criteria: Criteria) -> StoreResult<DeleteResult>;

    /// Number of rows matching `options`.
    async fn count(&self, options: FindOptions) -> StoreResult<u64>;
}
