//! # repokit-core
//!
//! Core crate for Repokit. Contains the entity and entity-store traits,
//! configuration schemas, query option types (filters, find options,
//! partial records, pagination, sorting) and the unified error system.
//!
//! This crate has **no** internal dependencies on other Repokit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, StoreError};
pub use result::{AppResult, StoreResult};
pub use traits::{Entity, EntityStore};
