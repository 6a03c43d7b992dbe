//! Application configuration from environment variables.
//!
//! Every value has a typed default; unparsable values fall back to the
//! default rather than aborting startup. LLM provider settings live in
//! [`crate::llm::config`].

use std::time::Duration;

use crate::conversation::engine::EngineSettings;
use crate::rate_limit::RateLimitConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_SESSIONS: usize = 1024;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;
pub const DEFAULT_REAPER_INTERVAL_SECS: u64 = 60;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Maximum number of concurrently mounted conversations.
    pub max_sessions: usize,
    /// Conversations idle longer than this are unmounted by the reaper.
    pub idle_timeout: Duration,
    pub reaper_interval: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            reaper_interval: Duration::from_secs(DEFAULT_REAPER_INTERVAL_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub engine: EngineSettings,
    pub sessions: SessionLimits,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// - `PORT`: default 3000
    /// - `HOLOGRAM_GENERATION_TIMEOUT_SECS`: default 30
    /// - `HOLOGRAM_MAX_SESSIONS`: default 1024
    /// - `HOLOGRAM_SESSION_IDLE_SECS`: default 1800
    /// - `HOLOGRAM_REAPER_INTERVAL_SECS`: default 60
    /// - `RATE_LIMIT_*`: see [`RateLimitConfig::from_env`]
    #[must_use]
    pub fn from_env() -> Self {
        let timeout_secs = env_parse("HOLOGRAM_GENERATION_TIMEOUT_SECS", DEFAULT_GENERATION_TIMEOUT_SECS).max(1);
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            engine: EngineSettings { generation_timeout: Duration::from_secs(timeout_secs) },
            sessions: SessionLimits {
                max_sessions: env_parse("HOLOGRAM_MAX_SESSIONS", DEFAULT_MAX_SESSIONS),
                idle_timeout: Duration::from_secs(env_parse("HOLOGRAM_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)),
                reaper_interval: Duration::from_secs(
                    env_parse("HOLOGRAM_REAPER_INTERVAL_SECS", DEFAULT_REAPER_INTERVAL_SECS).max(1),
                ),
            },
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            engine: EngineSettings::default(),
            sessions: SessionLimits::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}
