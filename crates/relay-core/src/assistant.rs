//! Stateless Assistant
//!
//! Wraps an [`LlmProvider`] with a fixed system instruction. Every call builds
//! a fresh two-turn conversation; nothing is remembered between calls.

use std::sync::Arc;

use crate::error::{RelayError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};

/// Assistant configuration
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    /// System instruction prepended to every request
    pub system_prompt: String,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            generation: GenerationOptions::default(),
        }
    }
}

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and polite Telegram assistant.";

/// Relays one user prompt to the provider and returns the trimmed reply
pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(provider: Arc<dyn LlmProvider>, config: AssistantConfig) -> Self {
        Self { provider, config }
    }

    pub fn with_defaults(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, AssistantConfig::default())
    }

    /// Build the request turns for a prompt
    fn build_messages(&self, prompt: &str) -> Vec<Message> {
        vec![
            Message::system(self.config.system_prompt.clone()),
            Message::user(prompt),
        ]
    }

    /// Ask a single question, verbatim
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let messages = self.build_messages(prompt);
        let completion = self
            .provider
            .complete(&messages, &self.config.generation)
            .await?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                provider = self.provider.name(),
                model = %completion.model,
                total_tokens = usage.total_tokens,
                "Completion received"
            );
        }

        let answer = completion.content.trim();
        if answer.is_empty() {
            return Err(RelayError::upstream(
                self.provider.name(),
                "completion has no content",
            ));
        }
        Ok(answer.to_string())
    }

    /// Get configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }
}
