//! Dog repository.

use async_trait::async_trait;
use tracing::info;

use repokit_core::error::AppError;
use repokit_core::result::AppResult;
use repokit_core::types::{FindOptions, Partial, SaveOptions};
use repokit_entity::dog::Dog;

use crate::connection::DataManager;
use crate::repositories::generic::{CrudRepository, GenericRepository};
use crate::store::SqlxRepository;

/// Repository for dogs.
///
/// Logs every insert and treats a missing dog as an error on `find_one`.
/// All other operations are the generic ones.
#[derive(Debug, Clone)]
pub struct DogRepository {
    base: GenericRepository<Dog>,
}

impl DogRepository {
    /// Create a new dog repository.
    pub fn new(manager: DataManager) -> Self {
        Self {
            base: GenericRepository::from_manager(manager),
        }
    }
}

#[async_trait]
impl CrudRepository<Dog> for DogRepository {
    type Store = SqlxRepository<Dog>;
    type Error = AppError;

    fn base(&self) -> &GenericRepository<Dog> {
        &self.base
    }

    async fn create(&self, data: Partial<Dog>, options: SaveOptions) -> AppResult<Dog> {
        info!(data = %data.to_json(), "Inserting dog");
        Ok(self.base.create(data, options).await?)
    }

    /// Never returns `Ok(None)`: no match is [`ErrorKind::NotFound`](repokit_core::error::ErrorKind::NotFound).
    async fn find_one(&self, options: FindOptions) -> AppResult<Option<Dog>> {
        match self.base.find_one(options).await? {
            Some(dog) => Ok(Some(dog)),
            None => Err(AppError::not_found("Dog not found")),
        }
    }
}
