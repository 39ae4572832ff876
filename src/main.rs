//! Wallet tracker service entry point.
//!
//! This binary provides the main entry point for the wallet tracker.
//! It loads the configuration from the environment, sets up one scanner per
//! tracked chain and polls them until interrupted.
//!
//! # Architecture
//! The service is built around these components:
//! - Address book: Which addresses to watch on which chain
//! - Scanners: Walk new blocks of one chain and match transactions
//! - Dispatcher: Delivers alerts to Telegram without blocking the scanners
//!
//! # Flow
//! 1. Loads the `.env` file and applies command line options
//! 2. Sets up logging
//! 3. Loads and validates the configuration
//! 4. Starts the tracker loop
//! 5. Handles graceful shutdown on Ctrl+C

use wallet_tracker::{
	bootstrap::initialize_tracker, models::TrackerConfig, utils::logging::setup_logging,
};

use anyhow::Context;
use clap::{Arg, Command};
use dotenvy::dotenv;
use std::env::{set_var, var};
use tokio::sync::watch;
use tracing::{error, info};

/// Main entry point for the wallet tracker.
///
/// # Errors
/// Returns an error if the configuration is incomplete or the service cannot be initialized.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Initialize command-line interface
	let matches = Command::new("wallet-tracker")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Watches wallet addresses on EVM chains and reports every new transaction to a \
			 Telegram chat.",
		)
		.arg(
			Arg::new("log-file")
				.long("log-file")
				.help("Also write logs to a file")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("log-path")
				.long("log-path")
				.help("Path to store log files (default: logs/)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("interval")
				.long("interval")
				.help("Seconds between two polls (default: 15)")
				.value_name("SECONDS"),
		)
		.get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	// Only apply CLI options if the corresponding environment variables are NOT already set
	if matches.get_flag("log-file") && var("LOG_MODE").is_err() {
		set_var("LOG_MODE", "file");
	}

	if let Some(level) = matches.get_one::<String>("log-level") {
		if var("LOG_LEVEL").is_err() {
			set_var("LOG_LEVEL", level);
		}
	}

	if let Some(path) = matches.get_one::<String>("log-path") {
		if var("LOG_DATA_DIR").is_err() {
			set_var("LOG_DATA_DIR", path);
		}
	}

	if let Some(interval) = matches.get_one::<String>("interval") {
		if var("POLL_INTERVAL_SECS").is_err() {
			set_var("POLL_INTERVAL_SECS", interval);
		}
	}

	// Keep the guard alive so buffered log lines reach the file on exit
	let _log_guard = setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
		None
	});

	let config = TrackerConfig::from_env()
		.inspect_err(|e| error!("Invalid configuration: {}", e))
		.context("Invalid configuration")?;

	let tracker = initialize_tracker(&config)
		.map_err(|e| anyhow::anyhow!("Failed to initialize tracker: {}", e))?;

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let tracker_handle = tokio::spawn(tracker.run(shutdown_rx));

	info!("Service started. Press Ctrl+C to shutdown");

	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Error waiting for Ctrl+C: {}", e);
	}
	info!("Shutdown signal received, stopping services...");

	let _ = shutdown_tx.send(true);
	let stats = tracker_handle.await.context("Tracker task failed")?;

	info!(
		delivered = stats.delivered,
		failed = stats.failed,
		"Shutdown complete"
	);
	Ok(())
}
