//! Telegram notification implementation.
//!
//! Provides functionality to send messages to a Telegram chat through the Bot
//! API, and to read incoming updates for the chat id discovery helper.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use crate::{
	models::TelegramConfig,
	services::notification::{strip_html, MessageFormat, NotificationError, Notifier},
	utils::http::{create_retryable_http_client, redact_request_error, HttpRetryConfig},
};

/// Default Bot API endpoint
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
/// Longest message text the Bot API accepts, in characters
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
	ok: bool,
	result: Option<T>,
	description: Option<String>,
}

/// An incoming update, as returned by `getUpdates`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelegramUpdate {
	pub update_id: i64,
	#[serde(default)]
	pub message: Option<TelegramMessage>,
}

/// The subset of a Telegram message the helper needs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelegramMessage {
	pub chat: TelegramChat,
	#[serde(default)]
	pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelegramChat {
	pub id: i64,
}

impl TelegramUpdate {
	/// Chat id of a `/start` command, `None` for any other update
	///
	/// Accepts the bare command, the command with arguments and the
	/// `/start@BotName` form used in groups.
	pub fn start_command_chat(&self) -> Option<i64> {
		let message = self.message.as_ref()?;
		let command = message.text.as_deref()?.split_whitespace().next()?;
		let command = command.split('@').next()?;
		(command == "/start").then_some(message.chat.id)
	}
}

/// Implementation of Telegram notifications via the Bot API
pub struct TelegramNotifier {
	/// HTTP client with retry middleware
	client: ClientWithMiddleware,
	/// Bot API base URL
	base_url: String,
	/// Telegram bot token
	token: String,
	/// Disable web preview
	disable_web_preview: bool,
}

impl TelegramNotifier {
	/// Creates a new Telegram notifier instance
	///
	/// # Arguments
	/// * `base_url` - Bot API base URL, `https://api.telegram.org` when `None`
	/// * `token` - Telegram bot token
	/// * `disable_web_preview` - Disable link previews in sent messages
	/// * `retry_config` - Timeouts and retry policy of the HTTP client
	pub fn new(
		base_url: Option<String>,
		token: String,
		disable_web_preview: bool,
		retry_config: &HttpRetryConfig,
	) -> Result<Self, NotificationError> {
		if token.trim().is_empty() {
			return Err(NotificationError::config_error("Telegram bot token is empty"));
		}

		let client = create_retryable_http_client(retry_config).map_err(|e| {
			NotificationError::config_error(format!("Failed to create HTTP client: {}", e))
		})?;

		Ok(Self {
			client,
			base_url: base_url
				.unwrap_or_else(|| TELEGRAM_API_URL.to_string())
				.trim_end_matches('/')
				.to_string(),
			token,
			disable_web_preview,
		})
	}

	/// Creates a Telegram notifier from the tracker configuration
	pub fn from_config(config: &TelegramConfig) -> Result<Self, NotificationError> {
		Self::new(
			config.api_url.clone(),
			config.token.clone(),
			config.disable_web_preview,
			&HttpRetryConfig::default(),
		)
	}

	fn method_url(&self, method: &str) -> String {
		format!("{}/bot{}/{}", self.base_url, self.token, method)
	}

	/// Builds the `sendMessage` request body
	///
	/// Text longer than [`MAX_MESSAGE_LENGTH`] characters is truncated. HTML
	/// over the limit is sent as plain text, since a cut can leave a tag open.
	pub fn build_payload(&self, chat_id: &str, message: &str, format: MessageFormat) -> Value {
		let (text, format) =
			if format == MessageFormat::Html && message.chars().count() > MAX_MESSAGE_LENGTH {
				(strip_html(message), MessageFormat::Plain)
			} else {
				(message.to_string(), format)
			};
		let text: String = text.chars().take(MAX_MESSAGE_LENGTH).collect();

		let mut payload = json!({
			"chat_id": chat_id,
			"text": text,
			"disable_web_page_preview": self.disable_web_preview,
		});
		if format == MessageFormat::Html {
			payload["parse_mode"] = json!("HTML");
		}
		payload
	}

	/// Calls a Bot API method and unwraps its result
	///
	/// Errors never contain the request URL, which carries the bot token.
	async fn call<T: DeserializeOwned>(
		&self,
		method: &str,
		body: &Value,
	) -> Result<T, NotificationError> {
		let response = self
			.client
			.post(self.method_url(method))
			.json(body)
			.send()
			.await
			.map_err(|e| {
				NotificationError::delivery_error(format!(
					"Telegram {} request failed: {}",
					method,
					redact_request_error(e)
				))
			})?;

		let status = response.status();
		let body: Option<ApiResponse<T>> = response.json().await.ok();

		match body {
			Some(ApiResponse {
				ok: true,
				result: Some(result),
				..
			}) if status.is_success() => Ok(result),
			Some(ApiResponse { description, .. }) => Err(NotificationError::delivery_error(
				format!(
					"Telegram {} failed with status {}: {}",
					method,
					status,
					description.unwrap_or_else(|| "no description".to_string())
				),
			)),
			None => Err(NotificationError::delivery_error(format!(
				"Telegram {} returned status {} with an unreadable body",
				method, status
			))),
		}
	}

	/// Fetches pending updates with long polling
	///
	/// # Arguments
	/// * `offset` - Identifier of the first update to return
	/// * `timeout` - Seconds the server may wait for an update
	pub async fn get_updates(
		&self,
		offset: Option<i64>,
		timeout: u64,
	) -> Result<Vec<TelegramUpdate>, NotificationError> {
		let mut body = json!({
			"timeout": timeout,
			"allowed_updates": ["message"],
		});
		if let Some(offset) = offset {
			body["offset"] = json!(offset);
		}
		self.call("getUpdates", &body).await
	}
}

#[async_trait]
impl Notifier for TelegramNotifier {
	/// Sends a message to a Telegram chat
	///
	/// # Arguments
	/// * `destination` - The chat id
	/// * `message` - The formatted message to send
	/// * `format` - Markup dialect of `message`
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn notify(
		&self,
		destination: &str,
		message: &str,
		format: MessageFormat,
	) -> Result<(), NotificationError> {
		let payload = self.build_payload(destination, message, format);
		let _: Value = self.call("sendMessage", &payload).await?;
		Ok(())
	}
}
