//! Failure kinds of the polling loop.
//!
//! Every failure source is a variant here so the loop can match on the
//! kind instead of catching an arbitrary error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing environment variables: {}", .names.join(", "))]
    MissingCredentials { names: Vec<&'static str> },

    #[error("request to the review API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode review API response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("response code {status}. Server {endpoint} is unavailable")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("response is not a JSON object")]
    NotAMapping,

    #[error("response does not contain a required key")]
    MissingKeys,

    #[error("key \"homeworks\" is not a list")]
    HomeworksNotAList,

    #[error("API response has no \"homework_name\" key")]
    MissingHomeworkName,

    #[error("unexpected homework status: {status}")]
    UnknownStatus { status: String },

    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

impl BotError {
    /// Short stable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::MissingCredentials { .. } => "missing_credentials",
            BotError::Transport(_) => "transport",
            BotError::Decode(_) => "decode",
            BotError::UnexpectedStatus { .. } => "bad_status_code",
            BotError::NotAMapping | BotError::HomeworksNotAList => "malformed_response",
            BotError::MissingKeys | BotError::MissingHomeworkName => "missing_key",
            BotError::UnknownStatus { .. } => "unrecognized_verdict",
            BotError::Delivery(_) => "delivery",
        }
    }
}
