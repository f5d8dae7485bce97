//! Convenience result type aliases for Repokit.

use crate::error::{AppError, StoreError};

/// A specialized `Result` type for application-level operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;

/// Result of an entity-store or facade call. Errors are the store's own.
pub type StoreResult<T> = Result<T, StoreError>;
