//! Conversation store — the append-only log plus the in-flight and draft
//! fields for one page instance.
//!
//! DESIGN
//! ======
//! Entries are immutable once pushed and never removed. Ids come from a
//! per-conversation counter so they are strictly increasing, and
//! `created_at` is clamped to the previous entry so it never decreases even
//! if the wall clock steps backwards.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// =============================================================================
// ENTRY
// =============================================================================

/// Per-conversation entry identifier. Generation order is strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One immutable line of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: EntryId,
    pub role: Role,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Attached reference (art mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Current time as milliseconds since Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// STATE
// =============================================================================

/// Per-mode-instance conversation state.
#[derive(Debug)]
pub struct ConversationState {
    entries: Vec<ConversationEntry>,
    pending: bool,
    draft_input: String,
    closed: bool,
    next_id: u64,
    last_activity: Instant,
}

impl ConversationState {
    /// Create a state seeded with an optional assistant greeting.
    #[must_use]
    pub fn new(greeting: Option<&str>) -> Self {
        let mut state = Self {
            entries: Vec::new(),
            pending: false,
            draft_input: String::new(),
            closed: false,
            next_id: 1,
            last_activity: Instant::now(),
        };
        if let Some(greeting) = greeting {
            state.push(Role::Assistant, greeting.to_string(), None);
        }
        state
    }

    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft_input = text;
        self.touch();
    }

    pub fn clear_draft(&mut self) {
        self.draft_input.clear();
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Mark the conversation destroyed. Later completions must not write into it.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Append an entry stamped with the current time.
    pub fn push(&mut self, role: Role, text: String, image: Option<String>) -> ConversationEntry {
        self.push_at(role, text, image, now_ms())
    }

    /// Append an entry stamped with `now`, clamped to the previous entry.
    pub(crate) fn push_at(&mut self, role: Role, text: String, image: Option<String>, now: i64) -> ConversationEntry {
        let created_at = self
            .entries
            .last()
            .map_or(now, |last| last.created_at.max(now));
        let entry = ConversationEntry { id: EntryId(self.next_id), role, text, created_at, image };
        self.next_id += 1;
        self.entries.push(entry.clone());
        self.touch();
        entry
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
