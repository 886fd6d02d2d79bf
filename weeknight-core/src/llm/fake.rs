//! Fake LLM provider for testing.
//!
//! Returns canned responses matched by prompt substring, so consolidation
//! tests run without network access. A provider with no registered responses
//! and no default errors on every prompt, which is how fallback paths are
//! exercised.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response.
    responses: HashMap<String, String>,
    /// Returned when no pattern matches; None means error.
    default_response: Option<String>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: Some(r#"{"consolidated_ingredients": []}"#.to_string()),
        }
    }
}

impl FakeProvider {
    /// A provider that fails every request.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: None,
        }
    }

    /// A provider returning `response` for prompts containing `prompt_contains`.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the response used when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

/// Cut `s` to at most `max_bytes`, never splitting a multi-byte character.
fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = s
        .char_indices()
        .take_while(|(i, _)| *i <= max_bytes)
        .last()
        .map_or(0, |(i, _)| i);
    &s[..end]
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: no response configured for prompt (first 100 chars): {}",
                truncate_at_char_boundary(prompt, 100)
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
