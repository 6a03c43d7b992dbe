//! Business-plan generator for the commercial page.
//!
//! One collaborator call per idea, bounded by the same timeout as chat
//! generation. The result is a short preview, never written into a
//! conversation log. Failures degrade to a fixed fallback text.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::conversation::fallback::BUSINESS_PLAN_FALLBACK;
use crate::conversation::prompt::build_plan_instruction;
use crate::error::ErrorCode;
use crate::state::AppState;

/// Characters of generated text kept in the preview.
pub const PREVIEW_CHARS: usize = 500;

pub const PREVIEW_NOTE: &str = "(This is a preview. The full plan would be much more detailed.)";

/// Rate-limit bucket shared by all plan requests.
const PLAN_BUCKET: Uuid = Uuid::nil();

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("business idea is empty")]
    EmptyIdea,
}

impl ErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyIdea => "E_EMPTY_IDEA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPreview {
    pub text: String,
    /// The generated plan was longer than the preview.
    pub truncated: bool,
    /// The text is the fallback rather than a generated plan.
    pub fallback: bool,
}

impl PlanPreview {
    fn fallback() -> Self {
        Self { text: BUSINESS_PLAN_FALLBACK.to_string(), truncated: false, fallback: true }
    }
}

/// Generate a plan preview for `idea`.
///
/// # Errors
///
/// Returns [`PlanError::EmptyIdea`] when the idea is blank. Generation
/// failures are not errors; they yield the fallback preview.
pub async fn generate_plan(state: &AppState, idea: &str) -> Result<PlanPreview, PlanError> {
    let instruction = build_plan_instruction(idea).ok_or(PlanError::EmptyIdea)?;
    info!(idea_len = idea.trim().len(), "plan: generation requested");

    if let Err(e) = state.rate_limiter.check_and_record(PLAN_BUCKET) {
        warn!(error = %e, "plan: rate limited, using fallback");
        return Ok(PlanPreview::fallback());
    }

    let timeout = state.config.engine.generation_timeout;
    let result = tokio::time::timeout(timeout, state.generator.generate(&instruction)).await;
    match result {
        Ok(Ok(text)) if !text.trim().is_empty() => Ok(preview(text.trim())),
        Ok(Ok(_)) => {
            warn!("plan: empty response, using fallback");
            Ok(PlanPreview::fallback())
        }
        Ok(Err(e)) => {
            warn!(error = %e, code = e.error_code(), "plan: generation failed, using fallback");
            Ok(PlanPreview::fallback())
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis(), "plan: generation timed out, using fallback");
            Ok(PlanPreview::fallback())
        }
    }
}

/// Cut `text` to [`PREVIEW_CHARS`] characters and append the preview note.
fn preview(text: &str) -> PlanPreview {
    let truncated = text.chars().count() > PREVIEW_CHARS;
    let mut body: String = text.chars().take(PREVIEW_CHARS).collect();
    if truncated {
        body.push_str("...");
    }
    body.push_str("\n\n");
    body.push_str(PREVIEW_NOTE);
    PlanPreview { text: body, truncated, fallback: false }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
