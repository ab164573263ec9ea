//! Error types for the REST API.
//!
//! Every error renders as an `application/problem+json` body with `title`,
//! `status` and `message`. Identity precondition failures also carry
//! `entityName` and `errorKey`, plus the alert headers
//! `X-roomkeeperApp-error` and `X-roomkeeperApp-params`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Error key |
//! |--------------|-------------|-----------|
//! | IdentityPresent | 400 | idexists |
//! | IdentityMissing | 400 | idnull |
//! | IdentityMismatch | 400 | idinvalid |
//! | IdentityNotFound | 400 | idnotfound |
//! | MissingRequiredField | 400 | validation |
//! | InvalidReference | 400 | |
//! | InvalidSearchParameter | 400 | |
//! | UnsupportedSortProperty | 400 | |
//! | InvalidPageRequest | 400 | |
//! | NotFound | 404 | |
//! | Conflict | 409 | |
//! | BackendError | 500 | |

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::error::{
    BackendError, ResourceError, SearchError, StorageError, ValidationError,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::responses::headers::failure_alert;

/// Media type of every error body.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Entity not found (HTTP 404).
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. "room".
        entity: String,
        /// The requested identity.
        id: i64,
    },

    /// A request rejected for an entity-specific reason (HTTP 400), reported
    /// with alert headers.
    #[error("{message}")]
    BadRequestAlert {
        /// Human-readable message.
        message: String,
        /// Entity name, e.g. "room".
        entity: String,
        /// Short machine-readable key, e.g. "idexists".
        error_key: String,
    },

    /// Bad request (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// A uniqueness constraint rejected the write (HTTP 409).
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    #[error("Unsupported media type: {content_type}")]
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates an alert-carrying bad request.
    pub fn alert(
        message: impl Into<String>,
        entity: impl Into<String>,
        error_key: impl Into<String>,
    ) -> Self {
        RestError::BadRequestAlert {
            message: message.into(),
            entity: entity.into(),
            error_key: error_key.into(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequestAlert { .. } | RestError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or("Error");

        let (body, alert) = match &self {
            RestError::BadRequestAlert {
                message,
                entity,
                error_key,
            } => (
                json!({
                    "title": message,
                    "status": status.as_u16(),
                    "message": format!("error.{}", error_key),
                    "entityName": entity,
                    "errorKey": error_key,
                }),
                Some(failure_alert(entity, error_key)),
            ),
            RestError::InternalError { .. } => (
                json!({
                    "title": reason,
                    "status": status.as_u16(),
                    "message": "error.http.500",
                }),
                None,
            ),
            other => (
                json!({
                    "title": reason,
                    "status": status.as_u16(),
                    "message": other.to_string(),
                }),
                None,
            ),
        };

        let mut response = (status, Json(body)).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        if let Some(alert) = alert {
            headers.extend(alert);
        }
        response
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Search(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { entity, id } => RestError::NotFound { entity, id },
            ResourceError::Conflict { .. } => RestError::Conflict {
                message: err.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        match err {
            ValidationError::IdentityPresent { entity } => {
                RestError::alert("A new entity cannot already have an ID", entity, "idexists")
            }
            ValidationError::IdentityMissing { entity } => {
                RestError::alert("Invalid id", entity, "idnull")
            }
            ValidationError::IdentityMismatch { entity, .. } => {
                RestError::alert("Invalid ID", entity, "idinvalid")
            }
            ValidationError::IdentityNotFound { entity, .. } => {
                RestError::alert("Entity not found", entity, "idnotfound")
            }
            ValidationError::MissingRequiredField { field } => RestError::BadRequest {
                message: format!("Missing required field: {}", field),
            },
            ValidationError::InvalidReference { .. }
            | ValidationError::InvalidSearchParameter { .. } => RestError::BadRequest { message },
        }
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        error!(error = %err, "Storage backend failure");
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
