//! Tracker loop.
//!
//! Drives every chain's scanner at a fixed cadence until a shutdown signal is
//! received, and announces when tracking starts and stops.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::services::{
	blockchain::{BlockChainClient, EvmClientTrait},
	blockwatcher::{
		error::BlockWatcherError,
		scanner::{BlockScanner, ScanSummary},
	},
	notification::{DispatchStats, MessageFormat, NotificationDispatcher, Notifier},
};

/// Sent once the loop is running
pub const TRACKING_STARTED_MESSAGE: &str = "🚀 Wallets are now being tracked";
/// Sent once the loop has stopped
pub const TRACKING_STOPPED_MESSAGE: &str = "⚠️ Wallets have stopped being tracked";

/// Lifecycle state of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
	Running,
	Stopped,
}

/// Cadence settings of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
	/// Time between the end of a tick and the start of the next one
	pub poll_interval: Duration,
	/// Upper bound for one chain's scan
	pub scan_timeout: Duration,
}

/// Result of one chain's scan during a tick
#[derive(Debug)]
pub struct ChainScanOutcome {
	pub chain: String,
	pub result: Result<ScanSummary, BlockWatcherError>,
}

/// Polls every configured chain until shutdown
pub struct TrackerLoop<C> {
	scanners: Vec<BlockScanner<C>>,
	dispatcher: Option<NotificationDispatcher>,
	notifier: Arc<dyn Notifier>,
	destination: String,
	format: MessageFormat,
	settings: LoopSettings,
	state: TrackerState,
}

impl<C: BlockChainClient + EvmClientTrait> TrackerLoop<C> {
	/// Creates a stopped loop
	///
	/// `notifier` is used directly for the lifecycle messages; alerts go
	/// through `dispatcher`.
	pub fn new(
		scanners: Vec<BlockScanner<C>>,
		dispatcher: NotificationDispatcher,
		notifier: Arc<dyn Notifier>,
		destination: impl Into<String>,
		format: MessageFormat,
		settings: LoopSettings,
	) -> Self {
		Self {
			scanners,
			dispatcher: Some(dispatcher),
			notifier,
			destination: destination.into(),
			format,
			settings,
			state: TrackerState::Stopped,
		}
	}

	pub fn state(&self) -> TrackerState {
		self.state
	}

	pub fn scanners(&self) -> &[BlockScanner<C>] {
		&self.scanners
	}

	/// Announces tracking, reads every chain's head and enters `Running`
	///
	/// Neither a failed announcement nor a failed head lookup prevents the
	/// loop from running.
	pub async fn start(&mut self) {
		self.announce(TRACKING_STARTED_MESSAGE).await;

		for scanner in &mut self.scanners {
			if let Err(e) = scanner.initialize().await {
				warn!(
					chain = %scanner.chain().slug,
					"Failed to read head at startup, retrying on next tick: {}",
					e
				);
			}
		}

		let chains: Vec<&str> = self
			.scanners
			.iter()
			.map(|scanner| scanner.chain().slug.as_str())
			.collect();
		info!(chains = ?chains, "Wallet tracking started");
		self.state = TrackerState::Running;
	}

	/// Scans every chain once, in order
	///
	/// Each scan is bounded by the scan timeout. Failures are logged and
	/// returned, never propagated.
	pub async fn tick(&mut self) -> Vec<ChainScanOutcome> {
		let timeout = self.settings.scan_timeout;
		let mut outcomes = Vec::with_capacity(self.scanners.len());

		for scanner in &mut self.scanners {
			let chain = scanner.chain().slug.clone();
			let result = match tokio::time::timeout(timeout, scanner.scan()).await {
				Ok(result) => result,
				Err(_) => Err(BlockWatcherError::timeout(timeout)),
			};

			match &result {
				Ok(summary) => info!(
					chain = %chain,
					blocks = summary.blocks(),
					matched = summary.matched,
					filtered = summary.filtered,
					dispatched = summary.dispatched,
					failed = summary.failed,
					cursor = ?scanner.cursor(),
					"Processed {} transactions - Total: {}, Filtered: {}",
					chain,
					summary.dispatched,
					summary.filtered
				),
				Err(e) => error!(chain = %chain, "Error scanning chain: {}", e),
			}

			outcomes.push(ChainScanOutcome { chain, result });
		}

		outcomes
	}

	/// Drains pending alerts, announces the stop and enters `Stopped`
	///
	/// Scanners are dropped first: they hold the dispatcher's queue open.
	pub async fn stop(&mut self) -> DispatchStats {
		self.scanners.clear();

		let stats = match self.dispatcher.take() {
			Some(dispatcher) => dispatcher.shutdown().await,
			None => DispatchStats::default(),
		};

		self.announce(TRACKING_STOPPED_MESSAGE).await;
		self.state = TrackerState::Stopped;
		info!(
			delivered = stats.delivered,
			failed = stats.failed,
			"Wallet tracking stopped"
		);
		stats
	}

	/// Runs until `shutdown` turns true or its sender is dropped
	///
	/// Shutdown is checked between ticks; a scan in progress is never
	/// interrupted.
	pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> DispatchStats {
		self.start().await;

		while !*shutdown.borrow() {
			self.tick().await;

			tokio::select! {
				_ = tokio::time::sleep(self.settings.poll_interval) => {}
				changed = shutdown.changed() => {
					if changed.is_err() {
						break;
					}
				}
			}
		}

		info!("Shutdown signal received, stopping tracker");
		self.stop().await
	}

	/// Best effort lifecycle message, sent without going through the queue
	async fn announce(&self, message: &str) {
		if let Err(e) = self
			.notifier
			.notify(&self.destination, message, self.format)
			.await
		{
			error!("Failed to send lifecycle message: {}", e);
		}
	}
}
