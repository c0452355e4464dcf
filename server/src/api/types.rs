//! Shared API types
//!
//! Error responses use a uniform JSON body: `{"error", "code", "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::analytics::AnalyticsError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Map a domain analytics error onto the HTTP surface.
    ///
    /// Store and timeout details are logged but never leak into the
    /// response body.
    pub fn from_analytics(e: AnalyticsError) -> Self {
        match e {
            AnalyticsError::InvalidArgument => {
                Self::bad_request("INVALID_DRIVER_ID", "Driver id must be a positive integer")
            }
            AnalyticsError::NotFound => Self::not_found("DRIVER_NOT_FOUND", "Driver not found"),
            AnalyticsError::Timeout => {
                tracing::error!("Analytics query timed out");
                Self::internal("Analytics query failed")
            }
            AnalyticsError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                Self::internal("Analytics query failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use crate::data::postgres::StoreError;

    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let err = ApiError::from_analytics(AnalyticsError::InvalidArgument);
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "INVALID_DRIVER_ID"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from_analytics(AnalyticsError::NotFound);
        assert!(matches!(err, ApiError::NotFound { ref code, .. } if code == "DRIVER_NOT_FOUND"));
    }

    #[test]
    fn test_store_details_do_not_leak() {
        let err = ApiError::from_analytics(AnalyticsError::Store(StoreError::Config(
            "postgres://user:secret@db".to_string(),
        )));
        match err {
            ApiError::Internal { message } => {
                assert!(!message.contains("secret"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
