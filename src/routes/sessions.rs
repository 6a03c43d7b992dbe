//! Conversation session routes.
//!
//! Submissions run on their own task. A client that disconnects mid-request
//! drops only the handler future; the spawned submission still finishes and
//! records its answer (or discards it if the session was unmounted).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiError;
use crate::conversation::{CommandOutcome, ConversationSnapshot, Mode, Persona, SubmitOutcome};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionBody {
    pub mode: String,
    #[serde(default)]
    pub persona: Persona,
}

#[derive(Debug, Deserialize)]
pub struct DraftBody {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitBody {
    /// Falls back to the session's draft when absent.
    pub question: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommandBody {
    pub line: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub snapshot: ConversationSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    #[serde(flatten)]
    pub result: CommandOutcome,
    pub snapshot: ConversationSnapshot,
}

/// `POST /api/sessions` — mount a conversation.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionBody>,
) -> Result<(StatusCode, Json<ConversationSnapshot>), ApiError> {
    let mode: Mode = body.mode.parse()?;
    let snapshot = session::mount(&state, mode, body.persona).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// `GET /api/sessions/:id` — current snapshot.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ConversationSnapshot>, ApiError> {
    let engine = session::get(&state, session_id).await?;
    Ok(Json(engine.snapshot()))
}

/// `DELETE /api/sessions/:id` — unmount.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    session::unmount(&state, session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/sessions/:id/draft` — replace the live input text.
pub async fn put_draft(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<DraftBody>,
) -> Result<Json<ConversationSnapshot>, ApiError> {
    let engine = session::get(&state, session_id).await?;
    engine.set_draft(body.text);
    Ok(Json(engine.snapshot()))
}

/// `POST /api/sessions/:id/submit` — submit a question (or the draft).
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let engine = session::get(&state, session_id).await?;
    let question = body.question.unwrap_or_else(|| engine.draft());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit_with_image(&question, body.image).await }
    });
    let outcome = task.await?;

    Ok(Json(SubmitResponse { outcome, snapshot: engine.snapshot() }))
}

/// `POST /api/sessions/:id/command` — run one terminal input line.
pub async fn command(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<CommandBody>,
) -> Result<Json<CommandResponse>, ApiError> {
    let engine = session::get(&state, session_id).await?;

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.execute(&body.line).await }
    });
    let result = task.await?;

    Ok(Json(CommandResponse { result, snapshot: engine.snapshot() }))
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
