//! LLM — multi-provider adapter for the text-generation collaborator.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` dispatches to
//! Gemini, Anthropic or `OpenAI` based on `LLM_PROVIDER`. The model is fixed
//! per deployment; callers only pass the instruction text.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use tracing::debug;

use config::{LlmConfig, LlmProviderKind};
pub use types::{DisabledGenerator, LlmError, TextGenerator};
use types::Completion;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to the configured provider.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    max_tokens: u32,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => {
                LlmProvider::Gemini(gemini::GeminiClient::new(config.api_key, config.gemini_base_url, config.timeouts)?)
            }
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_mode,
                config.openai_base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }

    /// Return the configured model name (e.g. `"gemini-1.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, instruction: &str) -> Result<Completion, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(&self.model, self.max_tokens, instruction).await,
            LlmProvider::Anthropic(c) => c.generate(&self.model, self.max_tokens, instruction).await,
            LlmProvider::OpenAi(c) => c.generate(&self.model, self.max_tokens, instruction).await,
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, instruction: &str) -> Result<String, LlmError> {
        let completion = self.complete(instruction).await?;
        debug!(
            model = %completion.model,
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "llm: completion received"
        );
        Ok(completion.text)
    }
}
