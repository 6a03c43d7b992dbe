//! Conversation engine: drives one mode instance's log.
//!
//! DESIGN
//! ======
//! One engine per mounted page. State lives behind a `std::sync::Mutex`
//! that is only held for synchronous transitions, never across the
//! collaborator call. The `pending` flag is the single-in-flight guard:
//! a second submit while it is set is ignored, so entries are appended in
//! strict user → assistant order.
//!
//! `pending` is reset by a drop guard, so every exit path clears it: a
//! normal return, a panic inside the collaborator, or the caller dropping
//! the future. Failures never leave the engine; they are logged and turned
//! into the mode's fallback answer.
//!
//! Closing the engine (unmount) sets a liveness flag. A completion that
//! arrives afterwards is discarded instead of written into the log.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::fallback::{MOTIVATE_FALLBACK, fallback_answer};
use super::mode::{Mode, Persona};
use super::prompt::{MOTIVATE_INSTRUCTION, build_instruction};
use super::store::{ConversationEntry, ConversationState, Role};
use super::terminal::{self, Command};
use crate::config::DEFAULT_GENERATION_TIMEOUT_SECS;
use crate::error::ErrorCode;
use crate::llm::{LlmError, TextGenerator};
use crate::rate_limit::{RateLimitError, RateLimiter};

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Upper bound on a single collaborator call.
    pub generation_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS) }
    }
}

// =============================================================================
// ERRORS & OUTCOMES
// =============================================================================

/// Why a generation attempt produced no usable answer. Always recovered
/// locally by the fallback policy.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("generation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Llm(e) => e.error_code(),
            Self::Timeout(_) => "E_GENERATION_TIMEOUT",
            Self::RateLimited(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            Self::Timeout(_) | Self::RateLimited(_) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A request is already in flight.
    Busy,
    /// The conversation has been unmounted.
    Closed,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Nothing changed.
    Ignored { reason: IgnoreReason },
    /// The collaborator answered; `entry` is the appended assistant entry.
    Answered { entry: ConversationEntry },
    /// Generation failed; `entry` holds the fallback answer.
    FellBack { entry: ConversationEntry },
    /// The conversation was closed while the request was in flight.
    Discarded,
}

impl SubmitOutcome {
    fn ignored(reason: IgnoreReason) -> Self {
        Self::Ignored { reason }
    }

    /// The appended assistant entry, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&ConversationEntry> {
        match self {
            Self::Answered { entry } | Self::FellBack { entry } => Some(entry),
            Self::Ignored { .. } | Self::Discarded => None,
        }
    }
}

/// Result of a terminal command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub outcome: SubmitOutcome,
    /// Target mode announced by a valid `cd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<Mode>,
}

impl From<SubmitOutcome> for CommandOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        Self { outcome, navigate: None }
    }
}

/// Consistent copy of a conversation for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: Uuid,
    pub mode: Mode,
    pub persona: Persona,
    pub entries: Vec<ConversationEntry>,
    pub pending: bool,
    pub draft_input: String,
}

// =============================================================================
// ENGINE
// =============================================================================

pub struct ConversationEngine {
    id: Uuid,
    mode: Mode,
    persona: Persona,
    generator: Arc<dyn TextGenerator>,
    rate_limiter: Option<RateLimiter>,
    settings: EngineSettings,
    state: Mutex<ConversationState>,
}

impl fmt::Debug for ConversationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationEngine")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("persona", &self.persona)
            .finish_non_exhaustive()
    }
}

/// Clears `pending` when dropped.
struct PendingGuard<'a> {
    state: &'a Mutex<ConversationState>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_pending(false);
    }
}

impl ConversationEngine {
    /// Create an engine seeded with the mode's greeting for `persona`.
    #[must_use]
    pub fn new(
        id: Uuid,
        mode: Mode,
        persona: Persona,
        generator: Arc<dyn TextGenerator>,
        settings: EngineSettings,
    ) -> Self {
        let greeting = mode.greeting(persona);
        Self {
            id,
            mode,
            persona,
            generator,
            rate_limiter: None,
            settings,
            state: Mutex::new(ConversationState::new(greeting.as_deref())),
        }
    }

    /// Route every collaborator call through `limiter` first.
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn persona(&self) -> Persona {
        self.persona
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        let state = self.lock();
        ConversationSnapshot {
            session_id: self.id,
            mode: self.mode,
            persona: self.persona,
            entries: state.entries().to_vec(),
            pending: state.pending(),
            draft_input: state.draft_input().to_string(),
        }
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().set_draft(text.into());
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.lock().draft_input().to_string()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().pending()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    #[must_use]
    pub fn last_activity(&self) -> Instant {
        self.lock().last_activity()
    }

    /// True when nothing has happened since `cutoff`.
    #[must_use]
    pub fn is_idle_since(&self, cutoff: Instant) -> bool {
        self.last_activity() <= cutoff
    }

    /// Mark the conversation unmounted. In-flight completions are discarded.
    pub fn close(&self) {
        self.lock().close();
        info!(session_id = %self.id, mode = %self.mode, "conversation: closed");
    }

    // -------------------------------------------------------------------------
    // submit
    // -------------------------------------------------------------------------

    pub async fn submit(&self, question: &str) -> SubmitOutcome {
        self.submit_with_image(question, None).await
    }

    /// Submit a question with an optional attached reference.
    ///
    /// The image is recorded on the user entry in art mode only; other
    /// modes drop it. It is never forwarded to the collaborator.
    pub async fn submit_with_image(&self, question: &str, image: Option<String>) -> SubmitOutcome {
        let Some(instruction) = build_instruction(self.mode, self.persona, question) else {
            debug!(session_id = %self.id, "conversation: empty submit ignored");
            return SubmitOutcome::ignored(IgnoreReason::EmptyInput);
        };
        let question = question.trim();
        let image = image.filter(|_| self.mode == Mode::Art);

        if let Err(reason) = self.begin(question, image) {
            return SubmitOutcome::ignored(reason);
        }
        info!(session_id = %self.id, mode = %self.mode, persona = %self.persona, "conversation: submit accepted");

        let (mode, persona) = (self.mode, self.persona);
        self.run(&instruction, || fallback_answer(mode, persona, question))
            .await
    }

    // -------------------------------------------------------------------------
    // terminal
    // -------------------------------------------------------------------------

    /// Execute one terminal input line.
    ///
    /// Built-ins answer locally without calling the collaborator. `motivate`
    /// generates through the same pipeline as `submit`. Anything else, and
    /// every line in a non-terminal mode, is submitted as a question.
    pub async fn execute(&self, line: &str) -> CommandOutcome {
        let line = line.trim();
        if self.mode != Mode::Terminal || line.is_empty() {
            return self.submit(line).await.into();
        }

        let command = terminal::parse(line);
        match command {
            Command::Ask => self.submit(line).await.into(),
            Command::Motivate => {
                if let Err(reason) = self.begin(line, None) {
                    return SubmitOutcome::ignored(reason).into();
                }
                info!(session_id = %self.id, "conversation: motivate accepted");
                self.run(MOTIVATE_INSTRUCTION, || MOTIVATE_FALLBACK.to_string())
                    .await
                    .into()
            }
            _ => {
                let Some(reply) = terminal::local_reply(&command) else {
                    return self.submit(line).await.into();
                };
                CommandOutcome { outcome: self.answer_locally(line, reply.text), navigate: reply.navigate }
            }
        }
    }

    // -------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------

    /// Guard check plus the synchronous half of a submission: append the user
    /// entry, clear the draft, mark pending.
    fn begin(&self, text: &str, image: Option<String>) -> Result<(), IgnoreReason> {
        let mut state = self.lock();
        if state.is_closed() {
            return Err(IgnoreReason::Closed);
        }
        if state.pending() {
            debug!(session_id = %self.id, "conversation: submit ignored while pending");
            return Err(IgnoreReason::Busy);
        }
        state.push(Role::User, text.to_string(), image);
        state.clear_draft();
        state.set_pending(true);
        Ok(())
    }

    /// Generate for an already-begun submission and record the answer.
    async fn run(&self, instruction: &str, fallback: impl FnOnce() -> String) -> SubmitOutcome {
        let _pending = PendingGuard { state: &self.state };
        let result = self.generate(instruction).await;

        let mut state = self.lock();
        if state.is_closed() {
            info!(session_id = %self.id, "conversation: completion discarded after close");
            return SubmitOutcome::Discarded;
        }
        let outcome = match result {
            Ok(text) => SubmitOutcome::Answered { entry: state.push(Role::Assistant, text, None) },
            Err(e) => {
                warn!(
                    session_id = %self.id,
                    mode = %self.mode,
                    error = %e,
                    code = e.error_code(),
                    "conversation: generation failed, using fallback"
                );
                SubmitOutcome::FellBack { entry: state.push(Role::Assistant, fallback(), None) }
            }
        };
        state.set_pending(false);
        outcome
    }

    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.check_and_record(self.id)?;
        }
        let timeout = self.settings.generation_timeout;
        let text = tokio::time::timeout(timeout, self.generator.generate(instruction))
            .await
            .map_err(|_| GenerationError::Timeout(timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }
        Ok(text.to_string())
    }

    /// Append a user line and a locally produced reply in one transition.
    fn answer_locally(&self, line: &str, reply: String) -> SubmitOutcome {
        let mut state = self.lock();
        if state.is_closed() {
            return SubmitOutcome::ignored(IgnoreReason::Closed);
        }
        if state.pending() {
            return SubmitOutcome::ignored(IgnoreReason::Busy);
        }
        state.push(Role::User, line.to_string(), None);
        state.clear_draft();
        let entry = state.push(Role::Assistant, reply, None);
        debug!(session_id = %self.id, "conversation: terminal built-in answered locally");
        SubmitOutcome::Answered { entry }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
