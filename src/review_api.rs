use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::BotError;

/// Source of homework review statuses.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (unix seconds) and return
    /// the raw response body.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, BotError>;
}

/// Client for the Practicum homework status endpoint
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, config.endpoint.clone(), token))
    }

    pub fn with_client(client: reqwest::Client, endpoint: String, token: String) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }

    fn build_request(&self, from_date: i64) -> reqwest::RequestBuilder {
        self.client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        debug!("Requesting homework statuses from {} (from_date={})", self.endpoint, from_date);

        let response = match self.build_request(from_date).send().await {
            Ok(response) => response,
            Err(e) => return Err(transport_error(e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
            });
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            // A body cut off by the client timeout or the connection is a
            // transport failure, not a malformed response.
            Err(e) if e.is_timeout() || e.is_body() => Err(transport_error(e)),
            Err(e) => Err(BotError::Decode(e)),
        }
    }
}

fn transport_error(e: reqwest::Error) -> BotError {
    error!(critical = true, "Request to the review API failed: {}", e);
    BotError::Transport(e)
}
