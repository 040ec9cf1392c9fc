//! REST API type definitions
//!
//! The uniform response envelope plus request/response payloads for
//! every endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use vigil_core::IncomingSignal;

/// Uniform response envelope
///
/// `data` is omitted on failure; `error` is omitted on success.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(ResponseMeta::now()),
        }
    }

    pub fn ok_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(meta),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Failure envelope; `T` is pinned to a JSON value since `data` is
    /// always absent
    pub fn failure(error: ErrorBody, meta: ResponseMeta) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            meta: Some(meta),
        }
    }
}

/// Machine-readable error payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,

    pub message: String,

    /// Field -> messages map for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
}

/// Envelope metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitMeta>,
}

impl ResponseMeta {
    pub fn now() -> Self {
        Self {
            request_id: Some(generate_request_id()),
            timestamp: Utc::now(),
            rate_limit: None,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitMeta) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }
}

/// Rate limit snapshot reported alongside rate-limited endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitMeta {
    pub limit: u32,

    pub remaining: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
}

/// Generate a request correlation ID
/// Format: req_YYYYMMDDHHmmss_xxxxxx
pub fn generate_request_id() -> String {
    use rand::Rng;

    let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

    format!("req_{}_{:06x}", datetime_str, random)
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Session creation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Signal batch request body
///
/// The path session ID is authoritative; a body `sessionId` is only
/// checked for agreement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSignalsRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,

    #[serde(default)]
    pub signals: Vec<IncomingSignal>,
}

/// Signal batch response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSignalsResponse {
    pub session_id: Uuid,
    pub signals_received: usize,
    pub total_signals: usize,
}

/// Session completion response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionResponse {
    pub session_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub signal_count: usize,
    pub analysis_available: bool,
}

/// Inline analysis request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Optional label for the resulting analysis; generated when absent
    #[serde(default)]
    pub session_id: Option<Uuid>,

    #[serde(default)]
    pub signals: Vec<IncomingSignal>,
}

/// Query parameters for the client session listing
#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}
