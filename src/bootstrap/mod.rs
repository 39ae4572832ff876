//! Bootstrap module for wiring the tracker together.
//!
//! This module turns a [`TrackerConfig`] into a ready to run [`TrackerLoop`]:
//! it builds the address book, creates one RPC client and one scanner per
//! tracked chain and starts the notification dispatcher.
//!
//! # Services
//! - `AddressBook`: Tracked addresses of every chain
//! - `NotificationDispatcher`: Bounded delivery queue in front of Telegram
//! - `TrackerLoop`: Polling loop driving the scanners

use std::{error::Error, sync::Arc};

use tracing::{info, warn};

use crate::{
	models::{Chain, TrackerConfig},
	services::{
		blockchain::{
			BlockChainClient, BlockChainError, EvmClient, EvmClientTrait, HttpTransportClient,
		},
		blockwatcher::{BlockScanner, LoopSettings, TrackerLoop},
		filter::AddressBook,
		notification::{
			MessageFormat, NotificationDispatcher, NotificationFormatter, Notifier,
			TelegramNotifier,
		},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Tracker loop talking to real nodes over HTTP
pub type EvmTrackerLoop = TrackerLoop<EvmClient<HttpTransportClient>>;

/// Builds the address book from every configured chain
///
/// Malformed addresses are logged and dropped.
pub fn build_address_book(config: &TrackerConfig) -> AddressBook {
	let mut address_book = AddressBook::new();
	for chain in &config.chains {
		let rejected =
			address_book.add_chain(&chain.slug, &chain.wallets, chain.labels.as_deref());
		if !rejected.is_empty() {
			warn!(
				chain = %chain.slug,
				dropped = rejected.len(),
				"Some configured wallets are not valid addresses"
			);
		}
	}
	address_book
}

/// Creates the tracker loop with the given transport and client factory
///
/// Chains without any valid tracked address are skipped and get no client.
///
/// # Errors
/// Returns an error if a tracked chain has no RPC URL or its client cannot be created
pub fn create_tracker<C, F>(
	config: &TrackerConfig,
	notifier: Arc<dyn Notifier>,
	client_factory: F,
) -> Result<TrackerLoop<C>>
where
	C: BlockChainClient + EvmClientTrait,
	F: Fn(&Chain) -> std::result::Result<C, BlockChainError>,
{
	let format = MessageFormat::Html;
	let address_book = Arc::new(build_address_book(config));

	let mut chains = Vec::new();
	for chain_config in &config.chains {
		if !address_book.is_tracking(&chain_config.slug) {
			info!(chain = %chain_config.slug, "No wallets configured, chain not tracked");
			continue;
		}
		let chain = Arc::new(chain_config.to_chain()?);
		let client = Arc::new(client_factory(chain.as_ref())?);
		chains.push((chain, client));
	}

	if chains.is_empty() {
		warn!("No wallets configured on any chain, the tracker will idle");
	}

	let dispatcher = NotificationDispatcher::start(
		notifier.clone(),
		format,
		config.notification_queue_size,
		config.max_in_flight_notifications,
	);

	let scanners = chains
		.into_iter()
		.map(|(chain, client)| {
			info!(
				chain = %chain.slug,
				wallets = address_book.tracked_count(&chain.slug),
				"Tracking chain"
			);
			BlockScanner::new(
				chain,
				client,
				address_book.clone(),
				NotificationFormatter::new(format),
				dispatcher.sink(),
				config.telegram.chat_id.clone(),
			)
		})
		.collect();

	Ok(TrackerLoop::new(
		scanners,
		dispatcher,
		notifier,
		config.telegram.chat_id.clone(),
		format,
		LoopSettings {
			poll_interval: config.poll_interval,
			scan_timeout: config.scan_timeout,
		},
	))
}

/// Creates the production tracker: Telegram delivery and HTTP JSON-RPC clients
pub fn initialize_tracker(config: &TrackerConfig) -> Result<EvmTrackerLoop> {
	let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::from_config(&config.telegram)?);
	create_tracker(config, notifier, EvmClient::new)
}
