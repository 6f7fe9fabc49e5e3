//! # HTTP API Errors
//!
//! Every failure is converted at the handler boundary into a status code and
//! a JSON body of the form `{"error": ..., "details": [...]}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::UserId;
use crate::observability::{Event, Logger};
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body missing, not JSON, or not a JSON object
    #[error("Request must be JSON")]
    MalformedRequest(String),

    /// One or more field rules violated
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Email collides with an existing user
    #[error("Email already exists")]
    DuplicateKey,

    /// No user with the given id
    #[error("User not found")]
    NotFound(UserId),

    /// Unknown path or an id segment that is not an integer
    #[error("Not found")]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Database could not be opened
    #[error("Database connection error")]
    StoreUnavailable(String),

    /// Unexpected storage or runtime failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateKey => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Details attached to the response body; only validation failures carry them.
    pub fn details(&self) -> Option<Vec<String>> {
        match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            _ => None,
        }
    }

    fn log(&self) {
        let status = self.status_code();
        let status_field = status.as_u16().to_string();
        let message = self.diagnostic();

        if status.is_server_error() {
            Logger::error(
                Event::RequestFailed.as_str(),
                &[("status", status_field.as_str()), ("error", message.as_str())],
            );
        } else {
            Logger::info(
                Event::RequestRejected.as_str(),
                &[("status", status_field.as_str()), ("error", message.as_str())],
            );
        }
    }

    fn diagnostic(&self) -> String {
        match self {
            ApiError::MalformedRequest(reason) => format!("{}: {}", self, reason),
            ApiError::Validation(errors) => format!("{}: {}", self, errors.join("; ")),
            ApiError::NotFound(id) => format!("{}: {}", self, id),
            ApiError::StoreUnavailable(reason) => format!("{}: {}", self, reason),
            _ => self.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => ApiError::DuplicateKey,
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Connection(reason) => ApiError::StoreUnavailable(reason),
            StoreError::Storage(reason) => ApiError::Internal(reason),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
