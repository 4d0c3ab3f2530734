use std::time::Duration;

use chrono::DateTime;
use tracing::{debug, error, info};

use crate::error::BotError;
use crate::homework::{check_response, current_date, parse_status};
use crate::notifier::{Delivery, Notifier};
use crate::platform::Messenger;
use crate::review_api::ReviewApi;

/// Outcome of a single poll iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The newest homework produced a status message.
    Status(Delivery),
    /// The API reported no homeworks since the cursor.
    NoUpdates,
    /// The iteration failed and a failure message was produced.
    Failure(Delivery),
}

/// Poll-check-notify loop state: the timestamp cursor and the notifier
/// holding the last delivered message.
pub struct HomeworkBot<A, M> {
    api: A,
    notifier: Notifier<M>,
    cursor: i64,
    retry_period: Duration,
}

impl<A: ReviewApi, M: Messenger> HomeworkBot<A, M> {
    pub fn new(api: A, messenger: M, retry_period: Duration) -> Self {
        Self {
            api,
            notifier: Notifier::new(messenger),
            cursor: 0,
            retry_period,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run forever: one step, then a fixed sleep, whatever the step did.
    pub async fn run(mut self) {
        info!(
            "Polling every {}s, starting from cursor {}",
            self.retry_period.as_secs(),
            self.cursor()
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Perform one poll iteration.
    pub async fn tick(&mut self) -> Step {
        match self.check_statuses().await {
            Ok(Some(message)) => Step::Status(self.notifier.notify(message).await),
            Ok(None) => {
                debug!("No new statuses");
                Step::NoUpdates
            }
            Err(err) => {
                let message = format!("Program failure: {}", err);
                error!(kind = err.kind(), "{}", message);
                Step::Failure(self.notifier.notify(message).await)
            }
        }
    }

    async fn check_statuses(&mut self) -> Result<Option<String>, BotError> {
        let response = self.api.homework_statuses(self.cursor).await?;
        let homeworks = check_response(&response)?;

        if let Some(date) = current_date(&response) {
            self.advance_cursor(date);
        }

        match homeworks.first() {
            Some(homework) => parse_status(homework).map(Some),
            None => Ok(None),
        }
    }

    fn advance_cursor(&mut self, date: i64) {
        if date <= self.cursor {
            return;
        }
        self.cursor = date;
        match DateTime::from_timestamp(date, 0) {
            Some(at) => debug!("Cursor advanced to {} ({})", date, at.to_rfc3339()),
            None => debug!("Cursor advanced to {}", date),
        }
    }
}
