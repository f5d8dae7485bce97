//! Error types for Repokit.
//!
//! Two layers exist:
//!
//! * [`StoreError`] is raised by entity stores and passes through the generic
//!   repository facade untouched.
//! * [`AppError`] is the application-level error used by concrete
//!   repositories, configuration, connection management and the HTTP layer.
//!   Every `StoreError` converts into it via `From`, so `?` works across the
//!   boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, broken reference, etc.).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// Errors raised by an entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver reported a failure (connectivity, constraint, syntax).
    #[error("database error :: {0}")]
    Database(#[from] sqlx::Error),
    /// Running schema migrations failed.
    #[error("migration error :: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    /// A filter, projection, ordering or patch named a column the entity does not declare.
    #[error("property `{column}` was not found in entity `{entity}`")]
    UnknownColumn {
        /// Entity name.
        entity: &'static str,
        /// The offending column name.
        column: String,
    },
    /// An identity-based write was requested without the primary key.
    #[error("cannot update entity `{entity}`: primary key `{key}` is missing")]
    MissingIdentity {
        /// Entity name.
        entity: &'static str,
        /// Primary key column.
        key: &'static str,
    },
    /// A bulk write was requested with no criteria at all.
    #[error("empty criteria are not allowed for `{operation}` on entity `{entity}`")]
    EmptyCriteria {
        /// Entity name.
        entity: &'static str,
        /// The bulk operation that was refused.
        operation: &'static str,
    },
    /// A bulk update was requested with no values to set.
    #[error("update values are not defined for entity `{entity}`")]
    EmptyPatch {
        /// Entity name.
        entity: &'static str,
    },
    /// A value could not be used in the requested position.
    #[error("invalid value :: {0}")]
    InvalidValue(String),
}

impl StoreError {
    /// Whether the failure came from a database constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => !matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::Other
            ),
            _ => false,
        }
    }
}

/// The unified application error used throughout Repokit.
///
/// Store errors are mapped into `AppError` using `From`, other failures
/// through the constructor helpers. This provides a single error type for
/// the application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let kind = match &err {
            StoreError::Database(sqlx::Error::RowNotFound) => ErrorKind::NotFound,
            StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                ErrorKind::ServiceUnavailable
            }
            e if e.is_constraint_violation() => ErrorKind::Conflict,
            StoreError::Database(_) | StoreError::Migration(_) => ErrorKind::Database,
            StoreError::UnknownColumn { .. }
            | StoreError::MissingIdentity { .. }
            | StoreError::EmptyCriteria { .. }
            | StoreError::EmptyPatch { .. }
            | StoreError::InvalidValue(_) => ErrorKind::Validation,
        };
        let message = err.to_string();
        Self::with_source(kind, message, err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
