//! Session registry — mount, look up, and unmount conversations.
//!
//! DESIGN
//! ======
//! A session is one mounted mode page. Mounting creates a fresh engine
//! under a random `Uuid` and seeds it with the mode's greeting; unmounting
//! removes it from the registry and closes it so any in-flight completion
//! is discarded. The registry is bounded; a full registry rejects mounts
//! instead of evicting live conversations.
//!
//! A background reaper wakes on an interval and unmounts conversations
//! that have been idle longer than the configured timeout. Conversations
//! with a request in flight are never reaped.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::conversation::{ConversationEngine, ConversationSnapshot, Mode, Persona};
use crate::error::ErrorCode;
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("session capacity reached ({0} mounted)")]
    Capacity(usize),
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SESSION_NOT_FOUND",
            Self::Capacity(_) => "E_SESSION_CAPACITY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Capacity(_))
    }
}

// =============================================================================
// REGISTRY OPERATIONS
// =============================================================================

/// Mount a new conversation for `mode` and return its initial snapshot.
///
/// # Errors
///
/// Returns [`SessionError::Capacity`] when the registry is full.
pub async fn mount(state: &AppState, mode: Mode, persona: Persona) -> Result<ConversationSnapshot, SessionError> {
    let max_sessions = state.config.sessions.max_sessions;
    let mut sessions = state.sessions.write().await;
    if sessions.len() >= max_sessions {
        warn!(mounted = sessions.len(), max_sessions, "session: mount rejected at capacity");
        return Err(SessionError::Capacity(sessions.len()));
    }

    let session_id = Uuid::new_v4();
    let engine = ConversationEngine::new(session_id, mode, persona, state.generator.clone(), state.config.engine)
        .with_rate_limiter(state.rate_limiter.clone());
    let snapshot = engine.snapshot();
    sessions.insert(session_id, Arc::new(engine));

    info!(%session_id, %mode, %persona, mounted = sessions.len(), "session: mounted");
    Ok(snapshot)
}

/// Look up a mounted conversation.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for unknown or already unmounted ids.
pub async fn get(state: &AppState, session_id: Uuid) -> Result<Arc<ConversationEngine>, SessionError> {
    state
        .sessions
        .read()
        .await
        .get(&session_id)
        .cloned()
        .ok_or(SessionError::NotFound(session_id))
}

/// Remove a conversation from the registry and close it.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for unknown or already unmounted ids.
pub async fn unmount(state: &AppState, session_id: Uuid) -> Result<(), SessionError> {
    let engine = state
        .sessions
        .write()
        .await
        .remove(&session_id)
        .ok_or(SessionError::NotFound(session_id))?;
    engine.close();
    state.rate_limiter.forget(session_id);
    info!(%session_id, "session: unmounted");
    Ok(())
}

// =============================================================================
// IDLE REAPER
// =============================================================================

/// Spawn the background idle reaper. Returns a handle for shutdown.
pub fn spawn_session_reaper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(state.config.sessions.reaper_interval);
        loop {
            interval.tick().await;
            let reaped = reap_idle(&state, Instant::now()).await;
            if reaped > 0 {
                info!(reaped, "session: reaped idle conversations");
            }
        }
    })
}

/// Unmount every conversation idle since before `now - idle_timeout` that
/// has no request in flight. Returns how many were removed.
pub(crate) async fn reap_idle(state: &AppState, now: Instant) -> usize {
    let Some(cutoff) = now.checked_sub(state.config.sessions.idle_timeout) else {
        return 0;
    };

    // Collect under the lock, close after releasing it.
    let reaped: Vec<Arc<ConversationEngine>> = {
        let mut sessions = state.sessions.write().await;
        let idle: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, engine)| !engine.is_pending() && engine.is_idle_since(cutoff))
            .map(|(id, _)| *id)
            .collect();
        idle.iter().filter_map(|id| sessions.remove(id)).collect()
    };

    for engine in &reaped {
        engine.close();
        state.rate_limiter.forget(engine.id());
    }
    reaped.len()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
