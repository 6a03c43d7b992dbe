//! Conversation domain: modes, prompt templates, fallbacks, the append-only
//! log, terminal commands, and the engine that ties them together.

pub mod engine;
pub mod fallback;
pub mod mode;
pub mod prompt;
pub mod store;
pub mod terminal;

pub use engine::{CommandOutcome, ConversationEngine, ConversationSnapshot, EngineSettings, IgnoreReason, SubmitOutcome};
pub use mode::{Mode, Persona};
pub use store::{ConversationEntry, EntryId, Role};
