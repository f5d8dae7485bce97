//! Core type definitions used across the Repokit workspace.

pub mod filter;
pub mod find;
pub mod outcome;
pub mod pagination;
pub mod partial;
pub mod sorting;
pub mod value;

pub use filter::{Condition, Criteria, FilterOp};
pub use find::{FindOptions, SaveOptions};
pub use outcome::{CountResult, DeleteResult, RawRow, UpdateResult};
pub use pagination::{PageRequest, PageResponse};
pub use partial::Partial;
pub use sorting::{SortDirection, SortField};
pub use value::Value;
