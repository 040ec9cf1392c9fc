//! API endpoint handlers
//!
//! Each handler enforces rate limits where applicable, validates the
//! request, performs its storage action, and wraps the outcome in the
//! uniform envelope. Failures map through [`ApiError`].

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use vigil_core::{CreateSessionRequest, FraudAnalysis, Session, Signal};
use vigil_runtime::validation::{validate_create_session, validate_signal_batch};
use vigil_runtime::ValidationErrors;

const DEFAULT_SESSION_LIST_LIMIT: usize = 20;
const MAX_SESSION_LIST_LIMIT: usize = 100;
const DEBUG_SIGNAL_LIMIT: usize = 100;

/// Health check endpoint
pub(super) async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Create a new session
pub(super) async fn create_session(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateSessionResponse>>), ApiError> {
    validate_create_session(&request).map_err(ApiError::Validation)?;

    let session = state.sessions.create(request).await?;
    info!(session_id = %session.id, client_id = %session.client_id, "session created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreateSessionResponse {
            session_id: session.id,
            created_at: session.created_at,
        })),
    ))
}

/// Fetch a session by ID
pub(super) async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await?
        .ok_or(ApiError::SessionNotFound(session_id))?;

    Ok(Json(ApiResponse::ok(session)))
}

/// Append a signal batch to a session
pub(super) async fn append_signals(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    JsonExtractor(request): JsonExtractor<AppendSignalsRequest>,
) -> Result<Json<ApiResponse<AppendSignalsResponse>>, ApiError> {
    let decision = state.limiter.check(session_id).await;
    if !decision.allowed {
        return Err(ApiError::RateLimitExceeded(decision));
    }

    if !state.sessions.exists(session_id).await? {
        return Err(ApiError::SessionNotFound(session_id));
    }

    if let Some(body_session_id) = request.session_id {
        if body_session_id != session_id {
            let mut errors = ValidationErrors::new();
            errors.add("sessionId", "sessionId does not match the request path");
            return Err(ApiError::Validation(errors));
        }
    }
    validate_signal_batch(&request.signals).map_err(ApiError::Validation)?;

    let signals: Vec<Signal> = request
        .signals
        .into_iter()
        .map(|s| s.into_signal(session_id))
        .collect();
    let received = signals.len();

    state.signals.append(session_id, signals).await?;
    let total = state.signals.count_by_session(session_id).await?;

    info!(%session_id, received, total, "signals appended");

    let meta = ResponseMeta::now().with_rate_limit(RateLimitMeta {
        limit: decision.limit,
        remaining: decision.remaining,
        reset_at: None,
    });

    Ok(Json(ApiResponse::ok_with_meta(
        AppendSignalsResponse {
            session_id,
            signals_received: received,
            total_signals: total,
        },
        meta,
    )))
}

/// Complete a session and evaluate its stored signals
pub(super) async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CompleteSessionResponse>>, ApiError> {
    let session = state
        .sessions
        .complete(session_id)
        .await?
        .ok_or(ApiError::SessionNotFound(session_id))?;
    let completed_at = session
        .completed_at
        .ok_or_else(|| ApiError::Internal("completed session missing timestamp".to_string()))?;

    // One snapshot read; appends racing past this point land in the
    // store but not in this analysis.
    let snapshot = state.signals.get_by_session(session_id).await?;
    let signal_count = snapshot.len();

    let analysis = state.evaluator.evaluate(session_id, &snapshot).await?;
    state.analyses.save(analysis).await?;

    info!(%session_id, signal_count, "session completed and analyzed");

    Ok(Json(ApiResponse::ok(CompleteSessionResponse {
        session_id,
        completed_at,
        signal_count,
        analysis_available: true,
    })))
}

/// Fetch the stored analysis for a session
pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FraudAnalysis>>, ApiError> {
    if let Some(analysis) = state.analyses.get_by_session(session_id).await? {
        return Ok(Json(ApiResponse::ok(analysis)));
    }

    if state.sessions.exists(session_id).await? {
        Err(ApiError::AnalysisNotReady(session_id))
    } else {
        Err(ApiError::SessionNotFound(session_id))
    }
}

/// One-shot evaluation without touching storage
pub(super) async fn analyze(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<AnalyzeRequest>,
) -> Result<Json<ApiResponse<FraudAnalysis>>, ApiError> {
    validate_signal_batch(&request.signals).map_err(ApiError::Validation)?;

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    let signals: Vec<Signal> = request
        .signals
        .into_iter()
        .map(|s| s.into_signal(session_id))
        .collect();

    let analysis = state.evaluator.evaluate(session_id, &signals).await?;

    Ok(Json(ApiResponse::ok(analysis)))
}

/// List a client's sessions, newest first
pub(super) async fn list_client_sessions(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<ApiResponse<Vec<Session>>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SESSION_LIST_LIMIT)
        .clamp(1, MAX_SESSION_LIST_LIMIT);

    let sessions = state.sessions.list_by_client(&client_id, limit).await?;

    Ok(Json(ApiResponse::ok(sessions)))
}

/// Development-only signal dump, capped at 100 entries
pub(super) async fn debug_session_signals(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Signal>>>, ApiError> {
    if !state.sessions.exists(session_id).await? {
        return Err(ApiError::SessionNotFound(session_id));
    }

    let mut signals = state.signals.get_by_session(session_id).await?;
    signals.truncate(DEBUG_SIGNAL_LIMIT);

    Ok(Json(ApiResponse::ok(signals)))
}
