//! # relay-core
//!
//! Shared pieces of the portfolio relay: the error taxonomy every handler
//! maps to a response, chat-completion message types, and the provider-agnostic
//! LLM abstraction.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌─────────────────────┐
//! │  chat-bot    │───▶│  Assistant   │───▶│  LlmProvider        │
//! │  (webhook)   │    │  (stateless) │    │  (OpenRouter, fake) │
//! └──────────────┘    └──────────────┘    └─────────────────────┘
//! ```

pub mod assistant;
pub mod error;
pub mod message;
pub mod provider;

pub use assistant::{Assistant, AssistantConfig};
pub use error::{RelayError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, TokenUsage};
