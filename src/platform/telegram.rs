use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};

use crate::platform::Messenger;

/// Telegram's per-message limit, in characters
const MAX_MESSAGE_CHARS: usize = 4096;

/// Resolve the configured chat identifier: numeric ids are chats,
/// anything else is a channel username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

/// Cut `text` to Telegram's character limit.
fn truncate_message(text: &str) -> &str {
    match text.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Sends notifications to one Telegram chat
pub struct TelegramMessenger {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramMessenger {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            bot: Bot::new(token),
            recipient: parse_recipient(chat_id),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.recipient.clone(), truncate_message(text))
            .await
            .context("Telegram sendMessage failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_chat_id() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123456)));
        assert_eq!(
            parse_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        );
    }

    #[test]
    fn test_channel_username() {
        assert_eq!(
            parse_recipient("@homework_updates"),
            Recipient::ChannelUsername("@homework_updates".to_string())
        );
    }

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(truncate_message("hello"), "hello");
    }

    #[test]
    fn test_long_message_truncated_by_characters() {
        let text = "я".repeat(5000);
        let cut = truncate_message(&text);
        assert!(text.starts_with(cut));
        assert_eq!(cut.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_message_at_limit_untouched() {
        let text = "я".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(truncate_message(&text), text);
    }
}
