//! Per-chain block scanning.
//!
//! A scanner owns the cursor of its chain: the last block whose transactions
//! have all been matched, validated and submitted. Each scan walks the blocks
//! between the cursor and the current head in ascending order.

use std::{ops::RangeInclusive, sync::Arc};

use tracing::{debug, error, info, instrument, warn};

use crate::{
	models::{Alert, Chain, EVMBlock},
	services::{
		blockchain::{BlockChainClient, EvmClientTrait},
		blockwatcher::error::BlockWatcherError,
		filter::{AddressBook, TransactionValidator, Validation},
		notification::{AlertSink, NotificationFormatter},
	},
	utils::b256_to_string,
};

/// Counters of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
	/// Blocks walked, `None` when there was nothing new
	pub range: Option<RangeInclusive<u64>>,
	/// Transactions sent from or to a tracked address
	pub matched: usize,
	/// Matched transactions rejected by validation
	pub filtered: usize,
	/// Alerts handed to the dispatcher
	pub dispatched: usize,
	/// Alerts that could not be handed to the dispatcher
	pub failed: usize,
}

impl ScanSummary {
	/// Number of blocks walked
	pub fn blocks(&self) -> u64 {
		self.range
			.as_ref()
			.map_or(0, |range| range.end() - range.start() + 1)
	}
}

/// Scans one chain for transactions involving tracked addresses
pub struct BlockScanner<C> {
	chain: Arc<Chain>,
	client: Arc<C>,
	address_book: Arc<AddressBook>,
	validator: TransactionValidator<C>,
	formatter: NotificationFormatter,
	sink: AlertSink,
	destination: String,
	cursor: Option<u64>,
}

impl<C: BlockChainClient + EvmClientTrait> BlockScanner<C> {
	/// Creates a scanner with an uninitialized cursor
	///
	/// # Arguments
	/// * `chain` - Chain to scan
	/// * `client` - RPC client of that chain
	/// * `address_book` - Tracked addresses of every chain
	/// * `formatter` - Renders accepted transactions
	/// * `sink` - Dispatch queue for the rendered alerts
	/// * `destination` - Recipient of every alert
	pub fn new(
		chain: Arc<Chain>,
		client: Arc<C>,
		address_book: Arc<AddressBook>,
		formatter: NotificationFormatter,
		sink: AlertSink,
		destination: impl Into<String>,
	) -> Self {
		Self {
			validator: TransactionValidator::new(chain.clone(), client.clone()),
			chain,
			client,
			address_book,
			formatter,
			sink,
			destination: destination.into(),
			cursor: None,
		}
	}

	/// Starts the scanner from a known block instead of the chain head
	pub fn with_cursor(mut self, cursor: u64) -> Self {
		self.cursor = Some(cursor);
		self
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	/// Last fully processed block, `None` until the head has been read once
	pub fn cursor(&self) -> Option<u64> {
		self.cursor
	}

	/// Moves the cursor to the current head so that older blocks are never scanned
	///
	/// On failure the cursor stays uninitialized and the next [`scan`](Self::scan)
	/// initializes it instead of scanning.
	pub async fn initialize(&mut self) -> Result<u64, BlockWatcherError> {
		let head = self.latest_block_number().await?;
		self.cursor = Some(head);
		info!(chain = %self.chain.slug, block = head, "Tracking from current head");
		Ok(head)
	}

	/// Processes every block between the cursor and the current head
	///
	/// The cursor only moves forward and is advanced after every processed
	/// block, so a scan cancelled by the caller's timeout keeps the blocks it
	/// finished. If a block cannot be fetched the scan stops and the remaining
	/// range is retried on the next scan.
	#[instrument(skip_all, fields(chain = %self.chain.slug))]
	pub async fn scan(&mut self) -> Result<ScanSummary, BlockWatcherError> {
		let head = self.latest_block_number().await?;

		let Some(cursor) = self.cursor else {
			self.cursor = Some(head);
			info!(block = head, "Tracking from current head");
			return Ok(ScanSummary::default());
		};

		if head <= cursor {
			debug!(head, cursor, "No new blocks");
			return Ok(ScanSummary::default());
		}

		let mut summary = ScanSummary {
			range: Some(cursor + 1..=head),
			..ScanSummary::default()
		};

		for number in cursor + 1..=head {
			let block = match self.client.get_block(number).await {
				Ok(block) => block,
				Err(e) => {
					warn!(
						processed_until = number - 1,
						matched = summary.matched,
						dispatched = summary.dispatched,
						"Scan interrupted"
					);
					return Err(BlockWatcherError::block_fetch_error(number, e));
				}
			};
			self.process_block(number, &block, &mut summary).await;
			self.cursor = Some(number);
		}

		Ok(summary)
	}

	async fn latest_block_number(&self) -> Result<u64, BlockWatcherError> {
		self.client.get_latest_block_number().await.map_err(|e| {
			BlockWatcherError::network_error(format!("Failed to get latest block number: {}", e))
		})
	}

	async fn process_block(&self, number: u64, block: &EVMBlock, summary: &mut ScanSummary) {
		let slug = self.chain.slug.as_str();

		for tx in &block.transactions {
			let from_tracked = self.address_book.contains(slug, &tx.from);
			let to_tracked = tx
				.to()
				.is_some_and(|to| self.address_book.contains(slug, to));
			if !from_tracked && !to_tracked {
				continue;
			}
			summary.matched += 1;

			let hash = match self.validator.validate(tx).await {
				Validation::Accepted { hash } => hash,
				Validation::Rejected(reason) => {
					debug!(block = number, ?reason, "Transaction filtered");
					summary.filtered += 1;
					continue;
				}
			};

			let text = self.formatter.render(
				&self.chain,
				number,
				tx,
				&hash,
				self.address_book.label_for(slug, &tx.from),
				tx.to().and_then(|to| self.address_book.label_for(slug, to)),
			);

			let alert = Alert {
				destination: self.destination.clone(),
				text,
				chain_slug: slug.to_string(),
				block_number: number,
				transaction_hash: hash,
			};

			match self.sink.submit(alert).await {
				Ok(()) => summary.dispatched += 1,
				Err(e) => {
					error!(
						block = number,
						tx_hash = %b256_to_string(&hash),
						"Failed to dispatch alert: {}",
						e
					);
					summary.failed += 1;
				}
			}
		}
	}
}
