//! Modes and personas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// A thematic persona determining the prompt preamble and fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Art,
    Science,
    Commercial,
    #[serde(alias = "tech")]
    Terminal,
}

impl Mode {
    #[cfg(test)]
    pub const ALL: [Self; 4] = [Self::Art, Self::Science, Self::Commercial, Self::Terminal];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Science => "science",
            Self::Commercial => "commercial",
            Self::Terminal => "terminal",
        }
    }

    /// Greeting seeded into a freshly mounted conversation, if any.
    #[must_use]
    pub fn greeting(self, persona: Persona) -> Option<String> {
        if persona == Persona::Assistant {
            return Some(format!("Hello! I'm your AI assistant in {self} mode. How can I help you?"));
        }
        let text = match self {
            Self::Art => return None,
            Self::Science => {
                "Welcome to the Advanced Research Laboratory. I am your AI research assistant. \
                 What scientific inquiry shall we pursue today?"
            }
            Self::Commercial => {
                "Welcome to the Corporate AI Assistant. I specialize in business, finance, and commercial \
                 analysis. How may I help you today?"
            }
            Self::Terminal => {
                "AI HOLOGRAM TERMINAL v3.0 ONLINE\nType \"help\" for available commands.\nSYSTEM READY."
            }
        };
        Some(text.to_string())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode: {0}")]
pub struct UnknownMode(pub String);

impl ErrorCode for UnknownMode {
    fn error_code(&self) -> &'static str {
        "E_INVALID_MODE"
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "art" => Ok(Self::Art),
            "science" => Ok(Self::Science),
            "commercial" => Ok(Self::Commercial),
            "terminal" | "tech" => Ok(Self::Terminal),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Which chat surface of a mode is in use.
///
/// `Page` is the mode page's own Q&A box. `Assistant` is the floating
/// generic assistant widget, which has its own preamble per mode and a
/// randomized fallback set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Page,
    Assistant,
}

impl Persona {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;
