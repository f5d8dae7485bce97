//! The sqlx-backed entity store.
//!
//! [`SqlxRepository<T>`] is bound to one entity type and one [`DataManager`].
//! It is the persistence layer the generic repository facade delegates to:
//! it generates SQL from find options and partial records, runs it, and
//! maps rows back into entities.

mod rows;
mod sql;

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::debug;

use repokit_core::error::StoreError;
use repokit_core::result::StoreResult;
use repokit_core::traits::{Entity, EntityStore};
use repokit_core::types::{
    Criteria, DeleteResult, FindOptions, Partial, RawRow, SaveOptions, UpdateResult, Value,
};

use crate::connection::DataManager;

/// Entity store for `T` over a SQLite pool.
pub struct SqlxRepository<T> {
    manager: DataManager,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqlxRepository<T> {
    /// Bind a store for `T` to a persistence manager.
    pub fn new(manager: DataManager) -> Self {
        Self {
            manager,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for SqlxRepository<T> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SqlxRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxRepository")
            .field("entity", &std::any::type_name::<T>())
            .finish()
    }
}

/// The primary key of `record`, unless absent or null.
fn identity<T: Entity>(record: &Partial<T>) -> Option<Value> {
    record
        .get(T::PRIMARY_KEY)
        .filter(|id| !id.is_null())
        .cloned()
}

/// Insert `record`, or update the row its primary key names.
///
/// A primary key that matches no row is inserted as given.
async fn save_record<T: Entity>(
    conn: &mut SqliteConnection,
    mut record: Partial<T>,
) -> StoreResult<T> {
    if let Some(id) = identity(&record) {
        let existing = if record.len() > 1 {
            let mut qb = sql::update_by_id(&record, &id)?;
            debug!(entity = T::NAME, sql = qb.sql(), "save: update");
            qb.build_query_as::<T>().fetch_optional(&mut *conn).await?
        } else {
            let mut qb = sql::select_by_id::<T>(&id)?;
            debug!(entity = T::NAME, sql = qb.sql(), "save: reload");
            qb.build_query_as::<T>().fetch_optional(&mut *conn).await?
        };
        if let Some(entity) = existing {
            return Ok(entity);
        }
    } else {
        record.remove(T::PRIMARY_KEY);
    }

    let mut qb = sql::insert(&record)?;
    debug!(entity = T::NAME, sql = qb.sql(), "save: insert");
    Ok(qb.build_query_as::<T>().fetch_one(&mut *conn).await?)
}

#[async_trait]
impl<T: Entity> EntityStore<T> for SqlxRepository<T> {
    type Manager = DataManager;

    fn manager(&self) -> &DataManager {
        &self.manager
    }

    async fn find_one(&self, options: FindOptions) -> StoreResult<Option<T>> {
        let mut qb = sql::select::<T>(&options.take(1))?;
        debug!(entity = T::NAME, sql = qb.sql(), "find_one");
        Ok(qb
            .build_query_as::<T>()
            .fetch_optional(self.manager.pool())
            .await?)
    }

    async fn find(&self, options: FindOptions) -> StoreResult<Vec<T>> {
        let mut qb = sql::select::<T>(&options)?;
        debug!(entity = T::NAME, sql = qb.sql(), "find");
        Ok(qb.build_query_as::<T>().fetch_all(self.manager.pool()).await?)
    }

    async fn find_and_count(&self, options: FindOptions) -> StoreResult<(Vec<T>, u64)> {
        let total = self.count(options.clone()).await?;
        let items = self.find(options).await?;
        Ok((items, total))
    }

    fn create(&self, data: Partial<T>) -> Partial<T> {
        let mut record = T::defaults().merge(data);
        record.retain(|column| {
            let known = T::has_column(column);
            if !known {
                debug!(entity = T::NAME, column, "create: dropping unknown property");
            }
            known
        });
        record
    }

    async fn save(&self, record: Partial<T>, options: SaveOptions) -> StoreResult<T> {
        sql::check_columns(&record)?;
        if options.transaction {
            let mut tx = self.manager.transaction().await?;
            let saved = save_record(&mut tx, record).await?;
            tx.commit().await?;
            Ok(saved)
        } else {
            let mut conn = self.manager.pool().acquire().await?;
            save_record(&mut conn, record).await
        }
    }

    async fn save_many(
        &self,
        records: Vec<Partial<T>>,
        options: SaveOptions,
    ) -> StoreResult<Vec<T>> {
        for record in &records {
            sql::check_columns(record)?;
        }

        let batch_size = options.chunk.unwrap_or(records.len()).max(1);
        let mut saved = Vec::with_capacity(records.len());
        let mut pending = records.into_iter();
        loop {
            let batch: Vec<_> = pending.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            debug!(entity = T::NAME, batch = batch.len(), "save_many: batch");

            if options.transaction {
                let mut tx = self.manager.transaction().await?;
                for record in batch {
                    saved.push(save_record(&mut tx, record).await?);
                }
                tx.commit().await?;
            } else {
                let mut conn = self.manager.pool().acquire().await?;
                for record in batch {
                    saved.push(save_record(&mut conn, record).await?);
                }
            }
        }
        Ok(saved)
    }

    async fn upsert(&self, record: Partial<T>, options: SaveOptions) -> StoreResult<T> {
        if identity(&record).is_none() {
            return Err(StoreError::MissingIdentity {
                entity: T::NAME,
                key: T::PRIMARY_KEY,
            });
        }
        self.save(record, options).await
    }

    async fn update(&self, criteria: Criteria, patch: Partial<T>) -> StoreResult<UpdateResult> {
        if criteria.is_empty() {
            return Err(StoreError::EmptyCriteria {
                entity: T::NAME,
                operation: "update",
            });
        }
        if patch.is_empty() {
            return Err(StoreError::EmptyPatch { entity: T::NAME });
        }

        let mut qb = sql::update(&criteria, &patch)?;
        debug!(entity = T::NAME, sql = qb.sql(), "update");
        let result = qb.build().execute(self.manager.pool()).await?;
        Ok(UpdateResult {
            affected: result.rows_affected(),
        })
    }

    async fn query(&self, sql: &str, params: Vec<Value>) -> StoreResult<Vec<RawRow>> {
        debug!(entity = T::NAME, sql, params = params.len(), "query");
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                Value::Null => query.bind(None::<i64>),
                Value::Boolean(b) => query.bind(b),
                Value::Integer(i) => query.bind(i),
                Value::Float(f) => query.bind(f),
                Value::String(s) => query.bind(s),
                Value::List(_) => {
                    return Err(StoreError::InvalidValue(
                        "lists cannot be bound as raw query parameters".to_string(),
                    ));
                }
            };
        }

        let fetched = query.fetch_all(self.manager.pool()).await?;
        fetched.iter().map(rows::to_raw_row).collect()
    }

    async fn soft_delete(&self, criteria: Criteria) -> StoreResult<UpdateResult> {
        if criteria.is_empty() {
            return Err(StoreError::EmptyCriteria {
                entity: T::NAME,
                operation: "soft_delete",
            });
        }

        let mut qb = sql::soft_delete::<T>(&criteria)?;
        debug!(entity = T::NAME, sql = qb.sql(), "soft_delete");
        let result = qb.build().execute(self.manager.pool()).await?;
        Ok(UpdateResult {
            affected: result.rows_affected(),
        })
    }

    async fn delete(&self, criteria: Criteria) -> StoreResult<DeleteResult> {
        if criteria.is_empty() {
            return Err(StoreError::EmptyCriteria {
                entity: T::NAME,
                operation: "delete",
            });
        }

        let mut qb = sql::delete::<T>(&criteria)?;
        debug!(entity = T::NAME, sql = qb.sql(), "delete");
        let result = qb.build().execute(self.manager.pool()).await?;
        Ok(DeleteResult {
            affected: result.rows_affected(),
        })
    }

    async fn count(&self, options: FindOptions) -> StoreResult<u64> {
        let mut qb = sql::count::<T>(&options)?;
        debug!(entity = T::NAME, sql = qb.sql(), "count");
        let total: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.manager.pool())
            .await?;
        Ok(total as u64)
    }
}
