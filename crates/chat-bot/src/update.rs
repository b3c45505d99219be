//! Incoming webhook updates
//!
//! Only the fields the bot reads are modelled; everything else in the
//! Telegram payload is ignored.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat: Chat,

    /// Absent for stickers, photos and other non-text messages
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// What a text message asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    Portfolio,
    /// Anything else, forwarded verbatim
    Text(&'a str),
}

impl<'a> Command<'a> {
    /// `/portfolio@SomeBot` is treated like `/portfolio`
    pub fn parse(text: &'a str) -> Self {
        let head = text.split_whitespace().next().unwrap_or_default();
        let name = head.split('@').next().unwrap_or_default();
        match name {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/portfolio" => Command::Portfolio,
            _ => Command::Text(text),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Portfolio => "portfolio",
            Command::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_telegram_update() {
        let body = r#"{
            "update_id": 10,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "text": "/portfolio"
            }
        }"#;
        let update: Update = serde_json::from_str(body).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.message_id, 7);
        assert_eq!(message.text.as_deref(), Some("/portfolio"));
    }

    #[test]
    fn test_update_without_message() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 11, "callback_query": {"id": "x"}}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/portfolio"), Command::Portfolio);
        assert_eq!(Command::parse("/portfolio@relay_bot now"), Command::Portfolio);
        assert_eq!(Command::parse("what is a bond?"), Command::Text("what is a bond?"));
        assert_eq!(Command::parse("/portfolios"), Command::Text("/portfolios"));
    }
}
