//! Error types for the store, the service, and the HTTP handlers.
//!
//! # Design
//! Each layer owns one enum. The store reports engine failures verbatim, the
//! service adds the input-validation case, and the handler layer is the only
//! place where failures become status codes. Anything the handlers do not
//! recognise as a client error collapses to a generic 500 so internal detail
//! never reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures raised by [`crate::store::Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("task join error: {0}")]
    Join(String),

    #[error("store is closed")]
    Closed,
}

/// Failures raised by [`crate::service::RecordService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller supplied input that violates a record invariant.
    #[error("{0}")]
    InvalidInput(String),

    /// A row vanished between the write and the re-read that follows it.
    #[error("record {0} missing after write")]
    Missing(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON error envelope: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    pub fn record_not_found() -> Self {
        HandlerError::NotFound("record not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => HandlerError::BadRequest(msg),
            other => HandlerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HandlerError::BadRequest(msg) | HandlerError::NotFound(msg) => msg,
            HandlerError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
