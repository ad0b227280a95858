/// Update dispatcher
///
/// The bot's main loop: long-polls for updates and dispatches each one.
/// Two things can happen per update:
///
/// - A `/start` or `/planner` command answers with a greeting and an inline
///   button that opens the planner web UI as a Telegram Web App.
/// - A `web_app_data` payload (the exported task report the web UI handed
///   back) is relayed verbatim to the chat, preceded by a short framing
///   message, so the user can forward it.
///
/// The bot never touches the planner database; the deep link is its entire
/// coupling to the web application.
use crate::telegram::{BotClient, BotError, InlineKeyboardMarkup, Update};
use tokio_util::sync::CancellationToken;

/// Caption of the web-app button
const OPEN_BUTTON_TEXT: &str = "🚀 Open the planner";

/// Greeting sent with the button
const GREETING: &str = "Hi! 👋 Press the button below to open your task planner:";

/// Framing line sent before a relayed report
const RELAY_PREFIX: &str = "📋 Your task list, ready to share:\n(forward this message to pass it on)";

/// Commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start` or `/planner` — send the deep-link button
    OpenPlanner,
}

impl Command {
    /// Parses the leading command token of a message text
    ///
    /// Accepts the `/command@botname` form groups produce.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.split_whitespace().next()?;
        let command = first.split('@').next()?;

        match command {
            "/start" | "/planner" => Some(Command::OpenPlanner),
            _ => None,
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u64,

    /// URL of the planner web UI
    pub webapp_url: String,
}

/// Long-polling update dispatcher
pub struct Dispatcher {
    client: BotClient,
    config: DispatcherConfig,
    shutdown_token: CancellationToken,
}

impl Dispatcher {
    /// Creates a dispatcher over a bot client
    pub fn new(client: BotClient, config: DispatcherConfig) -> Self {
        Self {
            client,
            config,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Gets the shutdown token
    ///
    /// Used to signal graceful shutdown from external handlers.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the polling loop until shutdown
    ///
    /// Poll failures are logged and retried after a short pause; a single
    /// bad update never takes the loop down.
    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!(
            webapp_url = %self.config.webapp_url,
            "Bot dispatcher started"
        );

        let mut offset: Option<i64> = None;

        loop {
            let updates = tokio::select! {
                _ = self.shutdown_token.cancelled() => {
                    tracing::info!("Shutdown requested, stopping dispatcher");
                    return Ok(());
                }
                result = self.client.get_updates(offset, self.config.poll_timeout_secs) => {
                    match result {
                        Ok(updates) => updates,
                        Err(e) => {
                            tracing::warn!(error = %e, "getUpdates failed, retrying");
                            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                            continue;
                        }
                    }
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);

                if let Err(e) = self.handle_update(&update).await {
                    tracing::warn!(
                        update_id = update.update_id,
                        error = %e,
                        "Failed to handle update"
                    );
                }
            }
        }
    }

    /// Dispatches a single update
    async fn handle_update(&self, update: &Update) -> Result<(), BotError> {
        let Some(message) = &update.message else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        // Web App payloads take precedence: the web UI handed us a report
        if let Some(payload) = &message.web_app_data {
            return self.relay_export(chat_id, &payload.data).await;
        }

        if let Some(command) = message.text.as_deref().and_then(Command::parse) {
            match command {
                Command::OpenPlanner => return self.send_planner_link(chat_id).await,
            }
        }

        Ok(())
    }

    /// Sends the greeting with the open-planner Web App button
    async fn send_planner_link(&self, chat_id: i64) -> Result<(), BotError> {
        tracing::info!(chat_id, "Sending planner deep link");

        let keyboard =
            InlineKeyboardMarkup::single_web_app(OPEN_BUTTON_TEXT, &self.config.webapp_url);

        self.client
            .send_message(chat_id, GREETING, Some(&keyboard))
            .await
    }

    /// Relays an exported report back to the chat
    async fn relay_export(&self, chat_id: i64, report: &str) -> Result<(), BotError> {
        if report.is_empty() {
            tracing::warn!(chat_id, "Received empty web app payload");
            return self
                .client
                .send_message(chat_id, "Received empty data from the planner.", None)
                .await;
        }

        tracing::info!(chat_id, bytes = report.len(), "Relaying exported task list");

        self.client.send_message(chat_id, RELAY_PREFIX, None).await?;
        self.client.send_message(chat_id, report, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse_known() {
        assert_eq!(Command::parse("/start"), Some(Command::OpenPlanner));
        assert_eq!(Command::parse("/planner"), Some(Command::OpenPlanner));
        assert_eq!(
            Command::parse("/start@seasonplan_bot"),
            Some(Command::OpenPlanner)
        );
        assert_eq!(
            Command::parse("/planner extra words"),
            Some(Command::OpenPlanner)
        );
    }

    #[test]
    fn test_command_parse_unknown() {
        assert_eq!(Command::parse("/help"), None);
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }
}
