//! Router creation and configuration

use super::handlers::*;
use crate::state::AppState;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the REST API router
pub fn create_router(state: AppState) -> Router {
    let mut api = Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/signals", post(append_signals))
        .route("/sessions/:id/complete", post(complete_session))
        .route("/sessions/:id/analysis", get(get_analysis))
        .route("/clients/:client_id/sessions", get(list_client_sessions))
        .route("/analyze", post(analyze));

    if state.config.is_development() {
        api = api.route("/debug/sessions/:id/signals", get(debug_session_signals));
    }

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(middleware::from_fn(preflight_no_content))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// The CORS layer answers preflights with 200; the API contract is 204
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }

    response
}
