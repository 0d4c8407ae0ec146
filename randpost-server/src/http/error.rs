//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Store detail is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::BodyError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body rejected (400)
    Body(BodyError),

    /// Store failure of any kind (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Body(e) => {
                tracing::debug!("Rejected request body: {}", e);
                let code = match e {
                    BodyError::MalformedRequestBody { .. } => "malformed_body",
                    BodyError::MissingOrInvalidField { .. } => "invalid_field",
                };
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": code,
                        "message": e.to_string()
                    }),
                )
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
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

impl From<BodyError> for ApiError {
    fn from(e: BodyError) -> Self {
        Self::Body(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn body_errors_are_400() {
        let err = ApiError::Body(BodyError::MissingOrInvalidField { field: "content" });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Body(BodyError::MalformedRequestBody { reason: "eof".into() });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn every_store_error_is_500() {
        let errors = [
            StoreError::NoRowsFound,
            StoreError::Timeout(std::time::Duration::from_secs(1)),
            StoreError::QueryFailure(sqlx::Error::RowNotFound),
            StoreError::ConnectionFailure(sqlx::Error::PoolTimedOut),
        ];
        for err in errors {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn store_error_body_hides_detail() {
        let err = ApiError::Store(StoreError::QueryFailure(sqlx::Error::Protocol(
            "relation \"post\" does not exist".into(),
        )));
        let response = err.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "internal_error");
        assert!(!String::from_utf8_lossy(&bytes).contains("relation"));
    }
}
