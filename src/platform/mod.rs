pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// Outbound channel for notification text.
///
/// Implementations deliver to a single fixed chat chosen at construction.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<()>;
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Records every delivered text; optionally fails every send.
    #[derive(Clone, Default)]
    pub struct RecordingMessenger {
        pub sent: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
    }

    impl RecordingMessenger {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_text(&self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("chat not found");
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}
