//! Notification service implementation.
//!
//! This module provides everything between an accepted transaction and the
//! chat it is reported to:
//! - Rendering alerts
//! - A bounded, fire-and-forget dispatch queue
//! - The Telegram Bot API transport

use async_trait::async_trait;

mod dispatcher;
mod error;
mod formatter;
mod telegram;

pub use dispatcher::{AlertSink, DispatchStats, NotificationDispatcher};
pub use error::NotificationError;
pub use formatter::{escape_html, strip_html, NotificationFormatter};
pub use telegram::{
	TelegramChat, TelegramMessage, TelegramNotifier, TelegramUpdate, MAX_MESSAGE_LENGTH,
	TELEGRAM_API_URL,
};

/// Markup dialect of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
	/// Telegram flavoured HTML (`<b>`, `<code>`)
	#[default]
	Html,
	/// No markup at all
	Plain,
}

/// Interface for notification transports
///
/// Implemented by the Telegram transport, and by mocks in tests.
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Sends a message to a destination
	///
	/// # Arguments
	/// * `destination` - Transport specific recipient (a Telegram chat id)
	/// * `message` - The rendered message
	/// * `format` - Markup dialect `message` is written in
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn notify(
		&self,
		destination: &str,
		message: &str,
		format: MessageFormat,
	) -> Result<(), NotificationError>;
}
