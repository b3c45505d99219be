//! Update dispatch
//!
//! Commands go to the portfolio reporter, everything else to the assistant.
//! Failures become a short reply in the chat; nothing here propagates back to
//! the webhook handler.

use std::sync::Arc;

use relay_core::{Assistant, RelayError};

use crate::reporter::PortfolioReporter;
use crate::transport::{ChatTransport, ReplyTarget, TextFormat};
use crate::update::{Command, Update};

pub const GREETING: &str = "👋 Hi! Ask me anything, or send /portfolio to see your current \
     brokerage portfolio.";

const GENERIC_FAILURE: &str = "⚠️ Something went wrong. Please try again later.";

pub struct ChatBot {
    transport: Arc<dyn ChatTransport>,
    assistant: Assistant,
    reporter: Arc<dyn PortfolioReporter>,
}

impl ChatBot {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        assistant: Assistant,
        reporter: Arc<dyn PortfolioReporter>,
    ) -> Self {
        Self {
            transport,
            assistant,
            reporter,
        }
    }

    pub fn transport(&self) -> &Arc<dyn ChatTransport> {
        &self.transport
    }

    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            tracing::debug!(update_id = update.update_id, "Ignoring non-message update");
            return;
        };
        let Some(text) = message.text.as_deref() else {
            tracing::debug!(chat_id = message.chat.id, "Ignoring message without text");
            return;
        };

        self.handle_text(ReplyTarget::new(message.chat.id, message.message_id), text)
            .await;
    }

    /// Answers go back to `target`, quoting the triggering message if known
    pub async fn handle_text(&self, target: ReplyTarget, text: &str) {
        let command = Command::parse(text);
        tracing::info!(chat_id = target.chat_id, command = command.name(), "Handling message");

        match command {
            Command::Start | Command::Help => {
                self.reply(target, GREETING, TextFormat::Plain).await;
            }
            Command::Portfolio => self.send_portfolio(target).await,
            Command::Text(prompt) => self.send_answer(target, prompt).await,
        }
    }

    async fn send_portfolio(&self, target: ReplyTarget) {
        self.typing(target.chat_id).await;
        match self.reporter.report().await {
            Ok(report) => self.reply(target, &report, TextFormat::Html).await,
            Err(e) => {
                tracing::warn!(chat_id = target.chat_id, "Portfolio report failed: {}", e);
                self.reply(target, &e.user_message(), TextFormat::Plain).await;
            }
        }
    }

    async fn send_answer(&self, target: ReplyTarget, prompt: &str) {
        self.typing(target.chat_id).await;
        match self.assistant.ask(prompt).await {
            // Model output is arbitrary text, so it is never sent as HTML.
            Ok(answer) => self.reply(target, &answer, TextFormat::Plain).await,
            Err(e) => {
                tracing::error!(chat_id = target.chat_id, "Assistant error: {}", e);
                let text = match &e {
                    RelayError::UpstreamStatus { .. } => format!("⚠️ {}", e.user_message()),
                    _ => GENERIC_FAILURE.to_string(),
                };
                self.reply(target, &text, TextFormat::Plain).await;
            }
        }
    }

    async fn typing(&self, chat_id: i64) {
        if let Err(e) = self.transport.send_typing(chat_id).await {
            tracing::warn!(chat_id, "Typing action failed: {}", e);
        }
    }

    async fn reply(&self, target: ReplyTarget, text: &str, format: TextFormat) {
        if let Err(e) = self.transport.send_text(target, text, format).await {
            tracing::error!(chat_id = target.chat_id, "Failed to send reply: {}", e);
        }
    }
}
