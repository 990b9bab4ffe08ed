//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Request payload failed validation; carries per-field messages.
    Validation(Vec<String>),
    /// Missing or malformed caller identity.
    Unauthorized(String),
    /// Domain logic error.
    Domain(DomainError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Validation(field_errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Validation Failed",
                    "fieldErrors": field_errors,
                }),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Domain(err) => {
                let (status, message) = domain_error_to_response(err);
                (status, serde_json::json!({ "error": message }))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "An unexpected error occurred" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Ownership failures deliberately share the 404 status with plain
/// not-found so that callers cannot probe for resources they do not own.
fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::RestaurantNotFound(_)
        | DomainError::RestaurantNotFoundOrNotOwned(_)
        | DomainError::MenuItemNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Store(store_err) => {
            tracing::error!(error = %store_err, "store error while handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            )
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Domain(DomainError::Store(err))
    }
}
