//! OpenRouter LLM Provider
//!
//! Implementation of `LlmProvider` for OpenRouter's OpenAI-compatible
//! chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use relay_core::{
    error::{RelayError, Result},
    message::Message,
    provider::{Completion, DEFAULT_MODEL, GenerationOptions, LlmProvider, TokenUsage},
};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "OpenRouter";

/// OpenRouter provider configuration
#[derive(Clone, Debug)]
pub struct OpenRouterConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model used when the caller does not override it
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://openrouter.ai/api/v1".into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: 60,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENROUTER_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| RelayError::Config("OPENROUTER_API_KEY is not set".into()))?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup("OPENROUTER_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(url) = lookup("OPENROUTER_API_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Generation options carrying the configured model
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions::with_model(self.model.clone())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter LLM provider
pub struct OpenRouterProvider {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    pub fn from_config(config: OpenRouterConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::Internal(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenRouterConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

/// Classify a transport-level failure
fn map_transport(err: reqwest::Error) -> RelayError {
    if err.is_connect() || err.is_timeout() {
        RelayError::unreachable(SERVICE, err.to_string())
    } else if let Some(status) = err.status() {
        RelayError::UpstreamStatus {
            service: SERVICE,
            status: status.as_u16(),
        }
    } else {
        RelayError::upstream(SERVICE, err.to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "HTTP error from OpenRouter");
            return Err(RelayError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(map_transport)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RelayError::upstream(SERVICE, "response has no choices"))?;

        Ok(Completion {
            content,
            model: body.model.unwrap_or_else(|| options.model.clone()),
            usage: body.usage,
        })
    }
}
