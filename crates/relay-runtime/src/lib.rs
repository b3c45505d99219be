//! # relay-runtime
//!
//! Concrete LLM providers for the portfolio relay.
//!
//! ## Providers
//!
//! - **OpenRouter** (default): OpenAI-compatible chat completions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_runtime::OpenRouterProvider;
//!
//! let provider = OpenRouterProvider::from_env()?;
//! let assistant = Assistant::with_defaults(Arc::new(provider));
//! ```

#[cfg(feature = "openrouter")]
pub mod openrouter;

#[cfg(feature = "openrouter")]
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};

// Re-export core types for convenience
pub use relay_core::{Assistant, LlmProvider, Message, RelayError, Result, Role};
