/// Minimal Telegram Bot API client
///
/// Covers exactly the API subset the planner bot needs: `getUpdates`
/// long-polling and `sendMessage` with an optional inline keyboard. No SDK
/// dependency; requests are plain JSON over reqwest.
///
/// # Example
///
/// ```no_run
/// use seasonplan_bot::telegram::BotClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BotClient::new("https://api.telegram.org/bot123:abc".to_string());
/// let updates = client.get_updates(None, 30).await?;
/// for update in updates {
///     println!("update {}", update.update_id);
/// }
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};

/// Error type for Bot API calls
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered `ok: false`
    #[error("Bot API error: {0}")]
    Api(String),
}

/// One incoming update from `getUpdates`
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update id; the poll offset is derived from it
    pub update_id: i64,

    /// The message, if this update carries one
    pub message: Option<Message>,
}

/// An incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Chat the message arrived in
    pub chat: Chat,

    /// Message text, for command handling
    pub text: Option<String>,

    /// Payload sent back by the planner Web App, if any
    pub web_app_data: Option<WebAppData>,
}

/// Chat identifier
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat id
    pub id: i64,
}

/// Data handed back from a Web App keyboard button
#[derive(Debug, Clone, Deserialize)]
pub struct WebAppData {
    /// The payload (the exported task report)
    pub data: String,
}

/// Inline keyboard markup for `sendMessage`
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Rows of buttons
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline keyboard button
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    /// Button caption
    pub text: String,

    /// Web App opened when pressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

/// Web App reference for a keyboard button
#[derive(Debug, Clone, Serialize)]
pub struct WebAppInfo {
    /// HTTPS URL of the Web App
    pub url: String,
}

impl InlineKeyboardMarkup {
    /// Builds a one-button keyboard that opens a Web App
    pub fn single_web_app(text: &str, url: &str) -> Self {
        Self {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: text.to_string(),
                web_app: Some(WebAppInfo {
                    url: url.to_string(),
                }),
            }]],
        }
    }
}

/// Envelope every Bot API response arrives in
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Outgoing `sendMessage` body
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

/// Outgoing `getUpdates` body
#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
}

/// Thin client over the Bot API method endpoints
#[derive(Debug, Clone)]
pub struct BotClient {
    http: reqwest::Client,
    method_base: String,
}

impl BotClient {
    /// Creates a client for a method base like `https://api.telegram.org/bot<token>`
    pub fn new(method_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            method_base,
        }
    }

    /// Long-polls for updates
    ///
    /// `offset` should be one past the last processed `update_id` so
    /// acknowledged updates are not redelivered.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError> {
        let response: ApiResponse<Vec<Update>> = self
            .http
            .post(format!("{}/getUpdates", self.method_base))
            .json(&GetUpdates {
                offset,
                timeout: timeout_secs,
            })
            .send()
            .await?
            .json()
            .await?;

        into_result(response)
    }

    /// Sends a text message, optionally with an inline keyboard
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        let response: ApiResponse<serde_json::Value> = self
            .http
            .post(format!("{}/sendMessage", self.method_base))
            .json(&SendMessage {
                chat_id,
                text,
                reply_markup,
            })
            .send()
            .await?
            .json()
            .await?;

        into_result(response).map(|_| ())
    }
}

/// Unwraps the Bot API envelope into a plain result
fn into_result<T>(response: ApiResponse<T>) -> Result<T, BotError> {
    if response.ok {
        response
            .result
            .ok_or_else(|| BotError::Api("ok response without result".to_string()))
    } else {
        Err(BotError::Api(
            response
                .description
                .unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserialization() {
        let json = r#"{
            "update_id": 42,
            "message": {
                "chat": { "id": 7 },
                "text": "/start"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 42);

        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 7);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert!(message.web_app_data.is_none());
    }

    #[test]
    fn test_web_app_data_deserialization() {
        let json = r#"{
            "update_id": 43,
            "message": {
                "chat": { "id": 7 },
                "web_app_data": { "data": "📋 Task list for alice" }
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let data = update.message.unwrap().web_app_data.unwrap();
        assert!(data.data.contains("alice"));
    }

    #[test]
    fn test_single_web_app_keyboard_shape() {
        let markup =
            InlineKeyboardMarkup::single_web_app("Open", "https://planner.example.com");
        let json = serde_json::to_value(&markup).unwrap();

        assert_eq!(
            json["inline_keyboard"][0][0]["web_app"]["url"],
            "https://planner.example.com"
        );
        assert_eq!(json["inline_keyboard"][0][0]["text"], "Open");
    }

    #[test]
    fn test_api_envelope_error() {
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{ "ok": false, "description": "Unauthorized" }"#,
        )
        .unwrap();

        let err = into_result(response).unwrap_err();
        assert!(matches!(err, BotError::Api(msg) if msg == "Unauthorized"));
    }
}
