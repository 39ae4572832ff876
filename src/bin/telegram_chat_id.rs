//! Chat id discovery helper.
//!
//! Run it with `TELEGRAM_BOT_TOKEN` set, then send `/start` to the bot from
//! the chat that should receive alerts: the bot answers with the chat id to
//! put in `TELEGRAM_CHAT_ID`.

use std::time::Duration;

use dotenvy::dotenv;
use tracing::{error, info, warn};
use wallet_tracker::{
	services::notification::{MessageFormat, Notifier, TelegramNotifier},
	utils::{http::HttpRetryConfig, logging::setup_logging},
};

/// Seconds Telegram may hold a `getUpdates` request open
const POLL_TIMEOUT_SECS: u64 = 25;
/// Pause after a failed poll
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv().ok();

	let _log_guard = setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
		None
	});

	let Some(token) = std::env::var("TELEGRAM_BOT_TOKEN")
		.ok()
		.filter(|token| !token.trim().is_empty())
	else {
		anyhow::bail!("Please set TELEGRAM_BOT_TOKEN in your .env file first!");
	};

	let retry_config = HttpRetryConfig::default()
		.with_request_timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10));
	let bot = TelegramNotifier::new(
		std::env::var("TELEGRAM_API_URL").ok(),
		token,
		true,
		&retry_config,
	)?;

	println!("Bot is running. Send /start to get your Chat ID.");
	println!("Press Ctrl+C to stop.");

	tokio::select! {
		_ = poll_updates(&bot) => {}
		result = tokio::signal::ctrl_c() => {
			if let Err(e) = result {
				error!("Error waiting for Ctrl+C: {}", e);
			}
		}
	}

	info!("Stopped");
	Ok(())
}

/// Answers `/start` commands until the task is cancelled
async fn poll_updates(bot: &TelegramNotifier) {
	let mut offset = None;

	loop {
		let updates = match bot.get_updates(offset, POLL_TIMEOUT_SECS).await {
			Ok(updates) => updates,
			Err(e) => {
				warn!("Failed to fetch updates: {}", e);
				tokio::time::sleep(ERROR_BACKOFF).await;
				continue;
			}
		};

		for update in updates {
			offset = Some(update.update_id + 1);

			let Some(chat_id) = update.start_command_chat() else {
				continue;
			};
			let reply = format!("Your Chat ID is: {}", chat_id);
			match bot
				.notify(&chat_id.to_string(), &reply, MessageFormat::Plain)
				.await
			{
				Ok(()) => info!(chat_id, "Sent chat id"),
				Err(e) => error!(chat_id, "Failed to reply: {}", e),
			}
		}
	}
}
