//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Validation failures are field errors (400); integrity failures coming
//! back from the database (restricted deletes, duplicates, check
//! constraints) are conflicts (409).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Delete blocked by referencing rows (409)
    StillReferenced { resource: &'static str, id: String },

    /// Unique constraint hit (409)
    Duplicate { resource: &'static str, id: String },

    /// Check constraint rejected the write (409)
    Integrity { constraint: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::StillReferenced { resource, id } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "still_referenced",
                    "message": format!("{} '{}' is still referenced by other rows", resource, id)
                }),
            ),
            Self::Duplicate { resource, id } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "duplicate",
                    "message": format!("{} '{}' already exists", resource, id)
                }),
            ),
            Self::Integrity { constraint } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "integrity_error",
                    "message": format!("write violates constraint '{}'", constraint)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::StillReferenced { resource, id } => Self::StillReferenced { resource, id },
            DbError::Duplicate { resource, id } => Self::Duplicate { resource, id },
            DbError::CheckViolation { constraint } => Self::Integrity { constraint },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::NotPositive { field: "price" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "rubric",
            id: "7".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn restricted_delete_is_409() {
        let err = ApiError::from(DbError::StillReferenced {
            resource: "rubric",
            id: "7".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn check_violation_is_409() {
        let err = ApiError::from(DbError::CheckViolation {
            constraint: "price_non_negative".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn raw_sqlx_error_is_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
