//! Hologram — multi-mode chat and Q&A conversation engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each mounted mode page (art, science, commercial, terminal) owns an
//! append-only conversation log driven by a [`conversation::ConversationEngine`].
//! Questions are templated per mode, sent to one text-generation provider,
//! and answered with a mode-specific fallback when generation fails. The
//! HTTP layer in [`routes`] exposes the engines as JSON sessions.

pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod state;
