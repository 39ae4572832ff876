//! Integration tests for wiring the tracker from configuration.

use std::{collections::HashMap, sync::Arc};

use wallet_tracker::{
	bootstrap::{build_address_book, create_tracker, initialize_tracker},
	models::{Chain, TrackerConfig},
	services::{blockchain::BlockChainError, notification::Notifier},
};

use crate::integration::mocks::{mock_client, recording_notifier, MockEvmClientTrait};

const TREASURY: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

fn config(pairs: &[(&str, &str)]) -> TrackerConfig {
	let mut env: HashMap<String, String> = HashMap::from([
		("TELEGRAM_BOT_TOKEN".to_string(), "test_token".to_string()),
		("TELEGRAM_CHAT_ID".to_string(), "42".to_string()),
		(
			"ETHEREUM_RPC_URL".to_string(),
			"http://localhost:8545".to_string(),
		),
	]);
	for (key, value) in pairs {
		env.insert(key.to_string(), value.to_string());
	}
	TrackerConfig::from_source(|key| env.get(key).cloned()).unwrap()
}

fn factory(chain: &Chain) -> Result<MockEvmClientTrait, BlockChainError> {
	assert!(!chain.rpc_url.is_empty());
	Ok(mock_client(vec![1], HashMap::new()))
}

fn notifier() -> Arc<dyn Notifier> {
	Arc::new(recording_notifier(None).0)
}

#[tokio::test]
async fn test_chains_without_wallets_are_skipped() {
	let config = config(&[("ETHEREUM_WALLETS", TREASURY)]);

	let tracker = create_tracker(&config, notifier(), factory).unwrap();

	let chains: Vec<&str> = tracker
		.scanners()
		.iter()
		.map(|scanner| scanner.chain().slug.as_str())
		.collect();
	assert_eq!(chains, vec!["ethereum"]);
}

#[tokio::test]
async fn test_every_chain_with_wallets_gets_a_scanner() {
	let config = config(&[
		("ETHEREUM_WALLETS", TREASURY),
		("BASE_WALLETS", TREASURY),
	]);

	let tracker = create_tracker(&config, notifier(), factory).unwrap();

	assert_eq!(tracker.scanners().len(), 2);
	assert_eq!(tracker.scanners()[1].chain().name, "Base");
	assert_eq!(tracker.scanners()[1].chain().rpc_url, "https://mainnet.base.org");
}

#[tokio::test]
async fn test_no_wallets_idles() {
	let config = config(&[]);

	let tracker = create_tracker(&config, notifier(), factory).unwrap();

	assert!(tracker.scanners().is_empty());
}

#[tokio::test]
async fn test_missing_rpc_url_is_fatal() {
	let config = config(&[
		("TRACKED_CHAINS", "ethereum,polygon"),
		("ETHEREUM_WALLETS", TREASURY),
		("POLYGON_WALLETS", TREASURY),
		("POLYGON_EXPLORER_URL", "https://polygonscan.com/tx/"),
	]);

	let result = create_tracker(&config, notifier(), factory);

	let error = result.err().unwrap();
	assert!(error.to_string().contains("POLYGON_RPC_URL"));
}

#[tokio::test]
async fn test_client_factory_errors_are_propagated() {
	let config = config(&[("ETHEREUM_WALLETS", TREASURY)]);

	let result = create_tracker(&config, notifier(), |_: &Chain| {
		Err::<MockEvmClientTrait, _>(BlockChainError::internal_error("bad url"))
	});

	assert!(result.err().unwrap().to_string().contains("bad url"));
}

#[test]
fn test_invalid_wallets_are_dropped_from_address_book() {
	let config = config(&[(
		"ETHEREUM_WALLETS",
		"0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed, not-an-address",
	)]);

	let address_book = build_address_book(&config);

	assert_eq!(address_book.tracked_count("ethereum"), 1);
	assert!(!address_book.is_tracking("base"));
}

#[tokio::test]
async fn test_initialize_tracker_with_real_clients() {
	let config = config(&[("ETHEREUM_WALLETS", TREASURY)]);

	let tracker = initialize_tracker(&config).unwrap();

	assert_eq!(tracker.scanners().len(), 1);
	assert_eq!(tracker.scanners()[0].cursor(), None);
}
