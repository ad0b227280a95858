//! # Seasonplan Bot
//!
//! The chat-bot entry point: long-polls Telegram for updates, answers
//! `/start` and `/planner` with a button that opens the planner web UI,
//! and relays exported task lists back to the chat.
//!
//! ## Usage
//!
//! ```bash
//! BOT_TOKEN=... WEBAPP_URL=https://planner.example.com cargo run -p seasonplan-bot
//! ```

use seasonplan_bot::{
    config::BotConfig,
    dispatcher::{Dispatcher, DispatcherConfig},
    telegram::BotClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seasonplan_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Seasonplan Bot v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = BotConfig::from_env()?;

    let client = BotClient::new(config.method_base());
    let dispatcher = Dispatcher::new(
        client,
        DispatcherConfig {
            poll_timeout_secs: config.poll_timeout_secs,
            webapp_url: config.webapp_url,
        },
    );

    // Cancel the polling loop on ctrl-c
    let shutdown_token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown signal received, exiting...");
        shutdown_token.cancel();
    });

    dispatcher.run().await
}
