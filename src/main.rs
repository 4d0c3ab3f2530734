mod bot;
mod config;
mod error;
mod homework;
mod notifier;
mod platform;
mod review_api;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::HomeworkBot;
use crate::config::{Credentials, Settings, CONFIG_PATH_VAR};
use crate::platform::telegram::TelegramMessenger;
use crate::review_api::PracticumClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,homework_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Secrets may come from a .env file in the working directory
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(critical = true, kind = e.kind(), "{}", e);
            return Ok(());
        }
    };

    let config_path = std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading settings from: {}", config_path.display());
    let settings = Settings::load(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

    info!("  Endpoint: {}", settings.api.endpoint);
    info!("  Retry period: {}s", settings.polling.retry_period_secs);

    let api = PracticumClient::new(&settings.api, credentials.practicum_token)?;
    let messenger =
        TelegramMessenger::new(&credentials.telegram_token, &credentials.telegram_chat_id);

    info!("Bot is starting...");
    HomeworkBot::new(api, messenger, settings.polling.retry_period())
        .run()
        .await;

    Ok(())
}
