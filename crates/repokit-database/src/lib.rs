//! # repokit-database
//!
//! SQLite connection management, the sqlx-backed entity store, the generic
//! repository facade built on top of it, and concrete entity repositories.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DataManager;
pub use repositories::{CrudRepository, DogRepository, GenericRepository};
pub use store::SqlxRepository;
