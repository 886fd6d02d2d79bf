//! LLM provider abstraction for AI-assisted ingredient consolidation.
//!
//! Trait-based so the consolidator can be tested without network access and
//! so providers can be swapped without touching consolidation logic.

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and get the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name (e.g., "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g., "claude-3-5-haiku-20241022").
    fn model_name(&self) -> &str;
}

/// Build a provider from environment variables:
/// - WEEKNIGHT_AI_PROVIDER: "fake" (default) | "claude"
/// - WEEKNIGHT_AI_MODEL: model name for the real provider
/// - ANTHROPIC_API_KEY: API key for Claude
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("WEEKNIGHT_AI_PROVIDER").unwrap_or_else(|_| "fake".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeProvider::default())),
        "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;
            let model = std::env::var("WEEKNIGHT_AI_MODEL")
                .unwrap_or_else(|_| "claude-3-5-haiku-20241022".to_string());
            Ok(Box::new(ClaudeProvider::new(api_key, model)))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
