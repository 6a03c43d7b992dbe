//! Business-plan route.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use super::ApiError;
use crate::services::plan::{self, PlanPreview};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanBody {
    pub idea: String,
}

/// `POST /api/plan` — generate a business-plan preview.
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(body): Json<PlanBody>,
) -> Result<Json<PlanPreview>, ApiError> {
    let preview = plan::generate_plan(&state, &body.idea).await?;
    Ok(Json(preview))
}
