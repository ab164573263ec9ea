//! Error types for the persistence layer.
//!
//! Errors are grouped by category: resource state, validation, query
//! construction and backend failures. [`StorageError`] wraps all of them so
//! callers only have to deal with a single type.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query construction errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to entity state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// A uniqueness constraint rejected the write.
    #[error("{entity} conflicts with an existing row: {message}")]
    Conflict { entity: String, message: String },
}

/// Errors raised before any store mutation takes place.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A new entity must not carry an identity.
    #[error("a new {entity} cannot already have an ID")]
    IdentityPresent { entity: String },

    /// An update was requested without an identity.
    #[error("invalid id: {entity} has no identity")]
    IdentityMissing { entity: String },

    /// The identity in the path and in the body differ.
    #[error("invalid ID: path id {path_id} does not match {entity} id {body_id}")]
    IdentityMismatch {
        entity: String,
        path_id: i64,
        body_id: i64,
    },

    /// The identity does not exist in the store.
    #[error("invalid ID: {entity} {id} not found")]
    IdentityNotFound { entity: String, id: i64 },

    /// Missing required field.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A relation points at a row that does not exist.
    #[error("invalid reference from {entity}: {message}")]
    InvalidReference { entity: String, message: String },

    /// A filter parameter could not be applied.
    #[error("invalid filter parameter {parameter}: {message}")]
    InvalidSearchParameter { parameter: String, message: String },
}

/// Errors related to query construction.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The sort property is not a sortable column of the entity.
    #[error("cannot sort {entity} by '{property}'")]
    UnsupportedSortProperty { entity: String, property: String },

    /// The page request is out of range.
    #[error("invalid page request: {message}")]
    InvalidPageRequest { message: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema bootstrap failed.
    #[error("schema initialization failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
        })
    }
}
