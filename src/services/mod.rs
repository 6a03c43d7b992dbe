//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own registry and generation concerns so route handlers
//! can stay focused on protocol translation.

pub mod plan;
pub mod session;
