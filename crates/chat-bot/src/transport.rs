//! Chat Transport
//!
//! Outbound side of the bot: messages, chat actions and webhook
//! registration. [`TelegramTransport`] talks to the Bot API through teloxide.

use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatAction, ChatId, MessageId, ParseMode, ReplyParameters},
};

use crate::error::{BotError, Result};

/// How the chat client should interpret a message body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// Where a reply goes: the chat, and the message it answers when known
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplyTarget {
    pub chat_id: i64,
    pub message_id: Option<i32>,
}

impl ReplyTarget {
    pub fn new(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id: Some(message_id),
        }
    }
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Show the "typing…" indicator
    async fn send_typing(&self, chat_id: i64) -> Result<()>;

    async fn send_text(&self, target: ReplyTarget, text: &str, format: TextFormat) -> Result<()>;

    async fn set_webhook(&self, url: &str) -> Result<()>;
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await?;
        Ok(())
    }

    async fn send_text(&self, target: ReplyTarget, text: &str, format: TextFormat) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(target.chat_id), text);
        if let Some(id) = target.message_id {
            // Still deliver the answer if the user deleted the question meanwhile
            request = request.reply_parameters(
                ReplyParameters::new(MessageId(id)).allow_sending_without_reply(),
            );
        }
        if format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        request.await?;
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| BotError::Telegram(format!("invalid webhook URL: {e}")))?;
        self.bot.set_webhook(url).await?;
        Ok(())
    }
}
