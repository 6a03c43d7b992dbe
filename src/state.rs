//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the registry of mounted conversations, the process-wide text
//! generator, and the rate limiter every engine shares. Each conversation
//! guards its own log, so the registry lock is only taken to look engines
//! up, insert them, or remove them.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::conversation::ConversationEngine;
use crate::llm::TextGenerator;
use crate::rate_limit::RateLimiter;

/// Mounted conversations keyed by session id.
pub type SessionMap = HashMap<Uuid, Arc<ConversationEngine>>;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionMap>>,
    /// Text generator shared by every conversation. A `DisabledGenerator`
    /// when no provider is configured.
    pub generator: Arc<dyn TextGenerator>,
    /// In-memory rate limiter for generation calls.
    pub rate_limiter: RateLimiter,
    pub config: AppConfig,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator,
            rate_limiter: RateLimiter::new(config.rate_limit),
            config,
        }
    }

    /// Number of mounted conversations.
    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
