//! Generic repository facade and the extension trait for concrete repositories.
//!
//! [`GenericRepository`] exposes the same CRUD surface for every entity and
//! forwards each call to the [`EntityStore`] it was constructed with.
//! Options go through unchanged and store errors come back unchanged.
//!
//! [`CrudRepository`] is how a concrete repository customizes that surface.
//! It holds a `GenericRepository`, returns it from [`CrudRepository::base`],
//! and overrides only the operations that need extra behavior. Every
//! operation it leaves alone falls through to the facade.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use repokit_core::error::StoreError;
use repokit_core::result::StoreResult;
use repokit_core::traits::{Entity, EntityStore};
use repokit_core::types::{
    CountResult, Criteria, DeleteResult, FindOptions, PageRequest, PageResponse, Partial, RawRow,
    SaveOptions, UpdateResult, Value,
};

use crate::connection::DataManager;
use crate::store::SqlxRepository;

/// CRUD facade over an injected entity store.
pub struct GenericRepository<T: Entity, R: EntityStore<T> = SqlxRepository<T>> {
    repository: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R: EntityStore<T>> GenericRepository<T, R> {
    /// Wrap a store bound to `T`.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    /// The bound store, for repositories that need to bypass the facade.
    pub fn store(&self) -> &R {
        &self.repository
    }

    /// The persistence manager shared with every other store.
    pub fn manager(&self) -> &R::Manager {
        self.repository.manager()
    }

    /// First entity matching `options`. No match is `Ok(None)`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn find_one(&self, options: FindOptions) -> StoreResult<Option<T>> {
        self.repository.find_one(options).await
    }

    /// Entities matching `options`, in order; empty when nothing matches.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn find_many(&self, options: FindOptions) -> StoreResult<Vec<T>> {
        self.repository.find(options).await
    }

    /// Entities matching `options` and the total match count ignoring `skip`/`take`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn find_many_and_count(&self, options: FindOptions) -> StoreResult<(Vec<T>, u64)> {
        self.repository.find_and_count(options).await
    }

    /// One page of entities matching `options`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME, page = page.page))]
    pub async fn find_page(
        &self,
        options: FindOptions,
        page: &PageRequest,
    ) -> StoreResult<PageResponse<T>>
    where
        T: Serialize,
    {
        let (items, total) = self
            .repository
            .find_and_count(options.paginate(page))
            .await?;
        Ok(PageResponse::new(items, page, total))
    }

    /// Materialize `data` and persist it. The result carries its identity.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn create(&self, data: Partial<T>, options: SaveOptions) -> StoreResult<T> {
        let record = self.repository.create(data);
        self.repository.save(record, options).await
    }

    /// Materialize and persist several records.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME, records = data.len()))]
    pub async fn create_many(
        &self,
        data: Vec<Partial<T>>,
        options: SaveOptions,
    ) -> StoreResult<Vec<T>> {
        let records = self.repository.create_many(data);
        self.repository.save_many(records, options).await
    }

    /// Persist changes to the entity `data` identifies.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn update(&self, data: Partial<T>, options: SaveOptions) -> StoreResult<T> {
        self.repository.upsert(data, options).await
    }

    /// Apply `patch` to every row matching `criteria`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn update_many(
        &self,
        criteria: Criteria,
        patch: Partial<T>,
    ) -> StoreResult<UpdateResult> {
        self.repository.update(criteria, patch).await
    }

    /// Run raw SQL. The text is executed as given.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn raw_query(&self, query: &str, parameters: Vec<Value>) -> StoreResult<Vec<RawRow>> {
        self.repository.query(query, parameters).await
    }

    /// Soft-delete rows matching `criteria`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn delete(&self, criteria: Criteria) -> StoreResult<UpdateResult> {
        self.repository.soft_delete(criteria).await
    }

    /// Physically remove rows matching `criteria`.
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn hard_delete(&self, criteria: Criteria) -> StoreResult<DeleteResult> {
        self.repository.delete(criteria).await
    }

    /// Number of entities matching `options` (all non-deleted rows when `None`).
    #[instrument(level = "debug", skip_all, fields(entity = T::NAME))]
    pub async fn count(&self, options: Option<FindOptions>) -> StoreResult<CountResult> {
        let count = self.repository.count(options.unwrap_or_default()).await?;
        Ok(CountResult { count })
    }
}

impl<T: Entity> GenericRepository<T> {
    /// Facade over a fresh [`SqlxRepository`] bound to `manager`.
    pub fn from_manager(manager: DataManager) -> Self {
        Self::new(SqlxRepository::new(manager))
    }
}

impl<T: Entity, R: EntityStore<T> + Clone> Clone for GenericRepository<T, R> {
    fn clone(&self) -> Self {
        Self::new(self.repository.clone())
    }
}

impl<T: Entity, R: EntityStore<T> + std::fmt::Debug> std::fmt::Debug for GenericRepository<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericRepository")
            .field("entity", &T::NAME)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Repository contract with default delegation to a [`GenericRepository`].
///
/// Implementors provide [`base`](Self::base) and pick an error type that
/// store errors convert into. Any method may be overridden; an override can
/// still call `self.base()` for the default behavior.
#[async_trait]
pub trait CrudRepository<T: Entity>: Send + Sync {
    /// The store the base facade is bound to.
    type Store: EntityStore<T>;
    /// Error surfaced to callers.
    type Error: From<StoreError> + Send;

    /// The facade every non-overridden operation delegates to.
    fn base(&self) -> &GenericRepository<T, Self::Store>;

    /// The persistence manager of the base facade.
    fn manager(&self) -> &<Self::Store as EntityStore<T>>::Manager {
        self.base().manager()
    }

    async fn find_one(&self, options: FindOptions) -> Result<Option<T>, Self::Error> {
        Ok(self.base().find_one(options).await?)
    }

    async fn find_many(&self, options: FindOptions) -> Result<Vec<T>, Self::Error> {
        Ok(self.base().find_many(options).await?)
    }

    async fn find_many_and_count(
        &self,
        options: FindOptions,
    ) -> Result<(Vec<T>, u64), Self::Error> {
        Ok(self.base().find_many_and_count(options).await?)
    }

    async fn create(&self, data: Partial<T>, options: SaveOptions) -> Result<T, Self::Error> {
        Ok(self.base().create(data, options).await?)
    }

    async fn create_many(
        &self,
        data: Vec<Partial<T>>,
        options: SaveOptions,
    ) -> Result<Vec<T>, Self::Error> {
        Ok(self.base().create_many(data, options).await?)
    }

    async fn update(&self, data: Partial<T>, options: SaveOptions) -> Result<T, Self::Error> {
        Ok(self.base().update(data, options).await?)
    }

    async fn update_many(
        &self,
        criteria: Criteria,
        patch: Partial<T>,
    ) -> Result<UpdateResult, Self::Error> {
        Ok(self.base().update_many(criteria, patch).await?)
    }

    async fn raw_query(
        &self,
        query: &str,
        parameters: Vec<Value>,
    ) -> Result<Vec<RawRow>, Self::Error> {
        Ok(self.base().raw_query(query, parameters).await?)
    }

    async fn delete(&self, criteria: Criteria) -> Result<UpdateResult, Self::Error> {
        Ok(self.base().delete(criteria).await?)
    }

    async fn hard_delete(&self, criteria: Criteria) -> Result<DeleteResult, Self::Error> {
        Ok(self.base().hard_delete(criteria).await?)
    }

    async fn count(&self, options: Option<FindOptions>) -> Result<CountResult, Self::Error> {
        Ok(self.base().count(options).await?)
    }
}
