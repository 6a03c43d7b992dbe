//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under a single Axum router: session
//! lifecycle, draft updates, submissions, terminal commands, and the
//! business-plan generator. Errors leave as `{code, message, retryable}`.

pub mod plan;
pub mod sessions;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ErrorBody, ErrorCode};
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/sessions/{id}/draft", put(sessions::put_draft))
        .route("/api/sessions/{id}/submit", post(sessions::submit))
        .route("/api/sessions/{id}/command", post(sessions::command))
        .route("/api/plan", post(plan::generate_plan))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// An error leaving the HTTP boundary: a status plus the JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { status, body: ErrorBody::from_error(err) }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<crate::services::session::SessionError> for ApiError {
    fn from(err: crate::services::session::SessionError) -> Self {
        use crate::services::session::SessionError;
        let status = match err {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::Capacity(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, &err)
    }
}

impl From<crate::conversation::mode::UnknownMode> for ApiError {
    fn from(err: crate::conversation::mode::UnknownMode) -> Self {
        Self::new(StatusCode::BAD_REQUEST, &err)
    }
}

impl From<crate::services::plan::PlanError> for ApiError {
    fn from(err: crate::services::plan::PlanError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, &err)
    }
}

/// A spawned submission task that panicked or was cancelled.
#[derive(Debug, thiserror::Error)]
#[error("submission task failed: {0}")]
pub struct TaskFailed(String);

impl ErrorCode for TaskFailed {
    fn error_code(&self) -> &'static str {
        "E_INTERNAL"
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &TaskFailed(err.to_string()))
    }
}
