//! Application State

use std::sync::Arc;

use crate::bot::ChatBot;

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<ChatBot>,

    /// Webhook path secret; also the Bot API token
    pub telegram_token: Arc<str>,

    /// Full webhook URL, `None` without a public hostname
    pub webhook_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(bot: ChatBot, telegram_token: &str, webhook_url: Option<String>) -> Self {
        Self {
            bot: Arc::new(bot),
            telegram_token: Arc::from(telegram_token),
            webhook_url: webhook_url.map(Arc::from),
        }
    }
}
