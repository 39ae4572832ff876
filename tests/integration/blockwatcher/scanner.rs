//! Integration tests for the block scanner.
//!
//! Tests cursor handling, matching and dispatch of one chain's scan against a
//! mocked client and notifier.

use std::{collections::HashMap, sync::Arc};

use alloy::primitives::{address, Address, U256};
use wallet_tracker::{
	models::{Chain, EVMBlock},
	services::{
		blockchain::BlockChainError,
		blockwatcher::{BlockScanner, BlockWatcherError},
		filter::AddressBook,
		notification::{MessageFormat, NotificationDispatcher, NotificationFormatter},
	},
	utils::tests::{
		chain::ChainBuilder,
		evm::{block::BlockBuilder, receipt::ReceiptBuilder, transaction::TransactionBuilder},
	},
};

use crate::integration::mocks::{messages, mock_client, recording_notifier, MockEvmClientTrait};

const TRACKED: Address = address!("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
const OTHER: Address = address!("0xa7d9ddbe1f17865597fbd27ec712455208b6b76d");
const STRANGER: Address = address!("0x1111111111111111111111111111111111111111");

fn tx_hash(n: u64) -> String {
	format!("0x{:064x}", n)
}

fn block(number: u64, txs: Vec<(Address, Option<Address>)>) -> EVMBlock {
	let transactions = txs
		.into_iter()
		.enumerate()
		.map(|(i, (from, to))| {
			let builder = TransactionBuilder::new()
				.hash(&tx_hash(number * 100 + i as u64))
				.from(from)
				.value(U256::from(1_000_000_000_000_000_000u64))
				.block_number(number);
			match to {
				Some(to) => builder.to(to),
				None => builder.contract_creation(),
			}
			.build()
		})
		.collect();
	BlockBuilder::new()
		.number(number)
		.transactions(transactions)
		.build()
}

fn address_book() -> Arc<AddressBook> {
	Arc::new(AddressBook::new().with_chain(
		"ethereum",
		"0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
		Some("Treasury"),
	))
}

fn chain() -> Arc<Chain> {
	Arc::new(ChainBuilder::new().build())
}

struct Harness {
	scanner: BlockScanner<MockEvmClientTrait>,
	dispatcher: NotificationDispatcher,
}

impl Harness {
	fn new(client: MockEvmClientTrait, notifier: crate::integration::mocks::MockNotifier) -> Self {
		Self::with_max_in_flight(client, notifier, 4)
	}

	fn with_max_in_flight(
		client: MockEvmClientTrait,
		notifier: crate::integration::mocks::MockNotifier,
		max_in_flight: usize,
	) -> Self {
		let dispatcher = NotificationDispatcher::start(
			Arc::new(notifier),
			MessageFormat::Html,
			16,
			max_in_flight,
		);
		let scanner = BlockScanner::new(
			chain(),
			Arc::new(client),
			address_book(),
			NotificationFormatter::new(MessageFormat::Html),
			dispatcher.sink(),
			"42",
		);
		Self {
			scanner,
			dispatcher,
		}
	}

	/// Drops the scanner and waits for every alert to be delivered
	async fn finish(self) -> wallet_tracker::services::notification::DispatchStats {
		drop(self.scanner);
		self.dispatcher.shutdown().await
	}
}

#[tokio::test]
async fn test_single_match_in_new_range() {
	let blocks = HashMap::from([
		(101, block(101, vec![(STRANGER, Some(OTHER))])),
		(102, block(102, vec![(TRACKED, Some(OTHER))])),
		(103, block(103, vec![(OTHER, Some(STRANGER))])),
	]);
	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(mock_client(vec![100, 103], blocks), notifier);

	assert_eq!(harness.scanner.initialize().await.unwrap(), 100);
	assert_eq!(harness.scanner.cursor(), Some(100));

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.range, Some(101..=103));
	assert_eq!(summary.matched, 1);
	assert_eq!(summary.dispatched, 1);
	assert_eq!(harness.scanner.cursor(), Some(103));

	let stats = harness.finish().await;
	assert_eq!(stats.delivered, 1);

	let sent = outbox.lock().unwrap().clone();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].0, "42");
	assert!(sent[0].1.contains("📊 Block: 102"));
	assert!(sent[0].1.contains("Treasury (<code>0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed</code>)"));
	assert!(sent[0].1.contains("💵 Value: 1 ETH"));
	assert!(sent[0].1.contains(&format!("https://etherscan.io/tx/{}", tx_hash(10200))));
}

#[tokio::test]
async fn test_alerts_follow_block_and_transaction_order() {
	let blocks = HashMap::from([
		(
			11,
			block(11, vec![(TRACKED, Some(OTHER)), (OTHER, Some(TRACKED))]),
		),
		(12, block(12, vec![(TRACKED, None)])),
	]);
	let (notifier, outbox) = recording_notifier(None);
	// One delivery at a time keeps the submission order observable
	let mut harness = Harness::with_max_in_flight(mock_client(vec![12], blocks), notifier, 1);
	harness.scanner = harness.scanner.with_cursor(10);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.dispatched, 3);

	harness.finish().await;
	let sent = messages(&outbox);
	assert_eq!(sent.len(), 3);
	assert!(sent[0].contains("📊 Block: 11\n"));
	assert!(sent[0].contains(&tx_hash(1100)));
	assert!(sent[1].contains("📊 Block: 11\n"));
	assert!(sent[1].contains(&tx_hash(1101)));
	assert!(sent[2].contains("📊 Block: 12\n"));
	assert!(sent[2].contains(&tx_hash(1200)));
	assert!(sent[2].contains("💰 To: Contract Creation"));
}

#[tokio::test]
async fn test_self_transfer_produces_one_alert() {
	let blocks = HashMap::from([(6, block(6, vec![(TRACKED, Some(TRACKED))]))]);
	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(mock_client(vec![6], blocks), notifier);
	harness.scanner = harness.scanner.with_cursor(5);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.matched, 1);
	assert_eq!(summary.dispatched, 1);

	harness.finish().await;
	assert_eq!(messages(&outbox).len(), 1);
}

#[tokio::test]
async fn test_contract_creation_only_matches_sender() {
	let blocks = HashMap::from([(6, block(6, vec![(STRANGER, None)]))]);
	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(mock_client(vec![6], blocks), notifier);
	harness.scanner = harness.scanner.with_cursor(5);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.matched, 0);

	harness.finish().await;
	assert!(messages(&outbox).is_empty());
}

#[tokio::test]
async fn test_no_new_blocks_is_a_noop() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Ok(90));
	client.expect_get_block().never();
	let (notifier, _outbox) = recording_notifier(None);
	let mut harness = Harness::new(client, notifier);
	harness.scanner = harness.scanner.with_cursor(100);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.range, None);
	assert_eq!(harness.scanner.cursor(), Some(100));

	harness.finish().await;
}

#[tokio::test]
async fn test_uninitialized_cursor_starts_at_head() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Ok(500));
	client.expect_get_block().never();
	let (notifier, _outbox) = recording_notifier(None);
	let mut harness = Harness::new(client, notifier);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.blocks(), 0);
	assert_eq!(harness.scanner.cursor(), Some(500));

	harness.finish().await;
}

#[tokio::test]
async fn test_head_lookup_failure_keeps_cursor() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Err(BlockChainError::connection_error("timeout")));
	let (notifier, _outbox) = recording_notifier(None);
	let mut harness = Harness::new(client, notifier);

	assert!(harness.scanner.initialize().await.is_err());
	assert_eq!(harness.scanner.cursor(), None);

	harness.scanner = harness.scanner.with_cursor(7);
	let result = harness.scanner.scan().await;
	assert!(matches!(result, Err(BlockWatcherError::NetworkError(_))));
	assert_eq!(harness.scanner.cursor(), Some(7));

	harness.finish().await;
}

#[tokio::test]
async fn test_first_block_failure_leaves_cursor_unchanged() {
	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(mock_client(vec![103], HashMap::new()), notifier);
	harness.scanner = harness.scanner.with_cursor(100);

	let result = harness.scanner.scan().await;
	assert!(matches!(
		result,
		Err(BlockWatcherError::BlockFetchError { block: 101, .. })
	));
	assert_eq!(harness.scanner.cursor(), Some(100));

	harness.finish().await;
	assert!(messages(&outbox).is_empty());
}

#[tokio::test]
async fn test_later_block_failure_keeps_processed_blocks() {
	let blocks = HashMap::from([
		(101, block(101, vec![(TRACKED, Some(OTHER))])),
		(102, block(102, vec![])),
	]);
	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(mock_client(vec![104], blocks), notifier);
	harness.scanner = harness.scanner.with_cursor(100);

	let result = harness.scanner.scan().await;
	assert!(matches!(
		result,
		Err(BlockWatcherError::BlockFetchError { block: 103, .. })
	));
	assert_eq!(harness.scanner.cursor(), Some(102));

	harness.finish().await;
	assert_eq!(messages(&outbox).len(), 1);
}

#[tokio::test]
async fn test_failed_receipt_is_filtered() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Ok(2));
	client
		.expect_get_block()
		.returning(|n| Ok(block(n, vec![(TRACKED, Some(OTHER))])));
	client
		.expect_get_transaction_receipt()
		.returning(|_| Ok(Some(ReceiptBuilder::new().failed().build())));

	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(client, notifier);
	harness.scanner = harness.scanner.with_cursor(1);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.matched, 1);
	assert_eq!(summary.filtered, 1);
	assert_eq!(summary.dispatched, 0);
	assert_eq!(harness.scanner.cursor(), Some(2));

	harness.finish().await;
	assert!(messages(&outbox).is_empty());
}

#[tokio::test]
async fn test_receipt_lookup_error_still_alerts() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Ok(2));
	client
		.expect_get_block()
		.returning(|n| Ok(block(n, vec![(OTHER, Some(TRACKED))])));
	client
		.expect_get_transaction_receipt()
		.returning(|_| Err(BlockChainError::connection_error("rate limited")));

	let (notifier, outbox) = recording_notifier(None);
	let mut harness = Harness::new(client, notifier);
	harness.scanner = harness.scanner.with_cursor(1);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.dispatched, 1);

	harness.finish().await;
	assert_eq!(messages(&outbox).len(), 1);
}

#[tokio::test]
async fn test_delivery_failure_does_not_abort_scan() {
	let blocks = HashMap::from([
		(101, block(101, vec![(TRACKED, Some(OTHER))])),
		(102, block(102, vec![(OTHER, Some(TRACKED))])),
	]);
	// Every alert of block 101 is rejected by the transport
	let (notifier, outbox) = recording_notifier(Some("Block: 101"));
	let mut harness = Harness::new(mock_client(vec![102], blocks), notifier);
	harness.scanner = harness.scanner.with_cursor(100);

	let summary = harness.scanner.scan().await.unwrap();
	assert_eq!(summary.dispatched, 2);
	assert_eq!(harness.scanner.cursor(), Some(102));

	let stats = harness.finish().await;
	assert_eq!(stats.delivered, 1);
	assert_eq!(stats.failed, 1);
	assert_eq!(messages(&outbox).len(), 2);
}
