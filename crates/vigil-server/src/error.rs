//! Server error taxonomy
//!
//! Every failure a handler can surface, mapped onto the response
//! envelope with a stable machine-readable code.

use crate::api::rest::types::{ApiResponse, ErrorBody, RateLimitMeta, ResponseMeta};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;
use vigil_runtime::{RateLimitDecision, ValidationErrors};

/// Server error type
#[derive(Debug)]
pub enum ApiError {
    /// Request failed schema/size/enum validation
    Validation(ValidationErrors),

    /// Session unknown to the session store
    SessionNotFound(Uuid),

    /// Session exists but has not been analyzed yet
    AnalysisNotReady(Uuid),

    /// Per-session window saturated
    RateLimitExceeded(RateLimitDecision),

    /// Unrecoverable internal failure
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(_) => write!(f, "Request validation failed"),
            ApiError::SessionNotFound(id) => write!(f, "Session not found: {id}"),
            ApiError::AnalysisNotReady(id) => {
                write!(f, "Analysis not available for session: {id}")
            }
            ApiError::RateLimitExceeded(decision) => write!(
                f,
                "Rate limit exceeded, retry after {} seconds",
                decision.retry_after.as_secs()
            ),
            ApiError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound(_) | ApiError::AnalysisNotReady(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            ApiError::AnalysisNotReady(_) => "ANALYSIS_NOT_READY",
            ApiError::RateLimitExceeded(_) => "RATE_LIMIT_EXCEEDED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Option<HashMap<String, Vec<String>>> {
        match self {
            ApiError::Validation(errors) => Some(errors.clone().into_fields()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let mut meta = ResponseMeta::now();
        if let ApiError::RateLimitExceeded(decision) = &self {
            let reset_at = Utc::now()
                + ChronoDuration::from_std(decision.retry_after)
                    .unwrap_or_else(|_| ChronoDuration::seconds(60));
            meta = meta.with_rate_limit(RateLimitMeta {
                limit: decision.limit,
                remaining: decision.remaining,
                reset_at: Some(reset_at),
            });
        }

        let body = ApiResponse::failure(
            ErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
            meta,
        );

        (status, Json(body)).into_response()
    }
}

impl From<vigil_runtime::RuntimeError> for ApiError {
    fn from(err: vigil_runtime::RuntimeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<vigil_sdk::SdkError> for ApiError {
    fn from(err: vigil_sdk::SdkError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_and_code_mapping() {
        let mut validation = ValidationErrors::new();
        validation.add("clientId", "clientId is required");

        let cases: Vec<(ApiError, StatusCode, &str)> = vec![
            (
                ApiError::Validation(validation),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                ApiError::SessionNotFound(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
            ),
            (
                ApiError::AnalysisNotReady(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
                "ANALYSIS_NOT_READY",
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn test_rate_limit_message_names_retry_after() {
        let error = ApiError::RateLimitExceeded(RateLimitDecision {
            allowed: false,
            remaining: 0,
            limit: 100,
            retry_after: Duration::from_secs(17),
        });

        assert_eq!(error.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(error.to_string().contains("17 seconds"));
    }

    #[test]
    fn test_runtime_error_maps_to_internal() {
        let error: ApiError =
            vigil_runtime::RuntimeError::StorageError("lock poisoned".to_string()).into();
        assert_eq!(error.code(), "INTERNAL_ERROR");
        assert!(error.to_string().contains("lock poisoned"));
    }
}
