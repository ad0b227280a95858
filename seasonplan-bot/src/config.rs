/// Configuration management for the bot
///
/// # Environment Variables
///
/// - `BOT_TOKEN`: Telegram bot token (required)
/// - `WEBAPP_URL`: HTTPS URL of the deployed planner web UI (required)
/// - `BOT_POLL_TIMEOUT_SECS`: Long-poll timeout (default: 30)
/// - `RUST_LOG`: Log level filter (default: info)
///
/// # Example
///
/// ```no_run
/// use seasonplan_bot::config::BotConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = BotConfig::from_env()?;
/// println!("Planner lives at {}", config.webapp_url);
/// # Ok(())
/// # }
/// ```
use std::env;

/// Default Telegram Bot API endpoint
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,

    /// URL of the planner web UI the bot deep-links into
    pub webapp_url: String,

    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u64,

    /// Bot API base URL (overridable for tests)
    pub api_base: String,
}

impl BotConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `BOT_TOKEN` or `WEBAPP_URL` is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let token = env::var("BOT_TOKEN")
            .map_err(|_| anyhow::anyhow!("BOT_TOKEN environment variable is required"))?;

        let webapp_url = env::var("WEBAPP_URL")
            .map_err(|_| anyhow::anyhow!("WEBAPP_URL environment variable is required"))?;

        let poll_timeout_secs = env::var("BOT_POLL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()?;

        let api_base =
            env::var("BOT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            token,
            webapp_url,
            poll_timeout_secs,
            api_base,
        })
    }

    /// Base URL for method calls, e.g. `{api_base}/bot{token}`
    pub fn method_base(&self) -> String {
        format!("{}/bot{}", self.api_base, self.token)
    }
}
