use tracing::{debug, error};

use crate::error::BotError;
use crate::platform::Messenger;

/// What happened to a notification handed to [`Notifier::notify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Duplicate,
    Failed,
}

/// Delivers notifications, suppressing a text identical to the last one
/// delivered.
pub struct Notifier<M> {
    messenger: M,
    last_message: String,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M) -> Self {
        Self {
            messenger,
            last_message: String::new(),
        }
    }

    #[cfg(test)]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub async fn notify(&mut self, message: String) -> Delivery {
        if message == self.last_message {
            debug!("Skipping duplicate message");
            return Delivery::Duplicate;
        }

        if self.send_message(&message).await {
            self.last_message = message;
            Delivery::Sent
        } else {
            Delivery::Failed
        }
    }

    /// Send one message. Failures are logged, never returned.
    async fn send_message(&self, message: &str) -> bool {
        match self.messenger.send_text(message).await {
            Ok(()) => {
                debug!("Message sent successfully");
                true
            }
            Err(e) => {
                let err = BotError::Delivery(format!("{:#}", e));
                error!(kind = err.kind(), "{}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::RecordingMessenger;

    #[tokio::test]
    async fn test_identical_messages_sent_once() {
        let messenger = RecordingMessenger::default();
        let mut notifier = Notifier::new(messenger.clone());

        assert_eq!(notifier.notify("hello".to_string()).await, Delivery::Sent);
        assert_eq!(
            notifier.notify("hello".to_string()).await,
            Delivery::Duplicate
        );

        assert_eq!(messenger.sent(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_different_messages_both_sent() {
        let messenger = RecordingMessenger::default();
        let mut notifier = Notifier::new(messenger.clone());

        notifier.notify("first".to_string()).await;
        notifier.notify("second".to_string()).await;

        assert_eq!(messenger.sent(), vec!["first", "second"]);
        assert_eq!(notifier.last_message(), "second");
    }

    #[tokio::test]
    async fn test_repeat_after_other_message_is_sent_again() {
        let messenger = RecordingMessenger::default();
        let mut notifier = Notifier::new(messenger.clone());

        for text in ["a", "b", "a"] {
            notifier.notify(text.to_string()).await;
        }

        assert_eq!(messenger.sent(), vec!["a", "b", "a"]);
    }

    #[tokio::test]
    async fn test_failed_delivery_does_not_update_last_message() {
        let mut notifier = Notifier::new(RecordingMessenger::failing());

        assert_eq!(notifier.notify("hello".to_string()).await, Delivery::Failed);
        assert_eq!(notifier.last_message(), "");
        assert_eq!(notifier.notify("hello".to_string()).await, Delivery::Failed);
    }
}
