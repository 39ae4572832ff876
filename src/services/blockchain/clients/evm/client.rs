//! EVM-compatible blockchain client implementation.
//!
//! This module provides functionality to interact with Ethereum and other EVM-compatible
//! blockchains, supporting head lookup, block retrieval and transaction receipt lookup.

use alloy::primitives::B256;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
	models::{Chain, EVMBlock, EVMTransactionReceipt},
	services::blockchain::{
		client::BlockChainClient,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::{b256_to_string, http::HttpRetryConfig},
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
///
/// Provides high-level access to EVM blockchain data through a JSON-RPC
/// transport layer.
#[derive(Clone, Debug)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client instance
	///
	/// # Arguments
	/// * `chain` - Chain description containing the RPC endpoint
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or configuration error
	pub fn new(chain: &Chain) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(&chain.rpc_url, &HttpRetryConfig::default())?;
		Ok(Self::new_with_transport(transport))
	}
}

/// Extended functionality specific to EVM-compatible blockchains
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Retrieves a transaction receipt by its hash
	///
	/// # Arguments
	/// * `transaction_hash` - The hash of the transaction to look up
	///
	/// # Returns
	/// * `Ok(Some(receipt))` - The receipt of a mined transaction
	/// * `Ok(None)` - The node does not know a receipt for this hash
	/// * `Err(BlockChainError)` - The lookup itself failed
	async fn get_transaction_receipt(
		&self,
		transaction_hash: B256,
	) -> Result<Option<EVMTransactionReceipt>, BlockChainError>;
}

/// Extracts the "result" field from a JSON-RPC response
fn take_result(mut response: Value, method: &str) -> Result<Value, BlockChainError> {
	response
		.get_mut("result")
		.map(Value::take)
		.ok_or_else(|| {
			BlockChainError::request_error(format!("Missing 'result' field in {} response", method))
		})
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	/// Retrieves a transaction receipt by hash
	///
	/// # Errors
	/// - Returns `BlockChainError::RequestError` if the response cannot be parsed
	/// - Returns `BlockChainError::ConnectionError` if the node cannot be reached
	async fn get_transaction_receipt(
		&self,
		transaction_hash: B256,
	) -> Result<Option<EVMTransactionReceipt>, BlockChainError> {
		let params = json!([b256_to_string(&transaction_hash)]);

		let response = self
			.transport
			.send_raw_request("eth_getTransactionReceipt", Some(params))
			.await?;

		let receipt_data = take_result(response, "eth_getTransactionReceipt")?;

		// Handle null response case
		if receipt_data.is_null() {
			return Ok(None);
		}

		serde_json::from_value(receipt_data)
			.map(Some)
			.map_err(|e| BlockChainError::request_error(format!("Failed to parse receipt: {}", e)))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for EvmClient<T> {
	/// Retrieves the latest block number
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("eth_blockNumber", None)
			.await?;

		let result = take_result(response, "eth_blockNumber")?;
		let hex_str = result.as_str().ok_or_else(|| {
			BlockChainError::request_error("Block number is not a string".to_string())
		})?;

		// Parse hex string to u64
		u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block number: {}", e))
		})
	}

	/// Retrieves a block with full transaction objects
	///
	/// # Errors
	/// - Returns `BlockChainError::BlockNotFound` if the node returns `null`
	/// - Returns `BlockChainError::RequestError` if the block cannot be parsed
	async fn get_block(&self, number: u64) -> Result<EVMBlock, BlockChainError> {
		let params = json!([format!("0x{:x}", number), true]);

		let response = self
			.transport
			.send_raw_request("eth_getBlockByNumber", Some(params))
			.await?;

		let block_data = take_result(response, "eth_getBlockByNumber")?;
		if block_data.is_null() {
			return Err(BlockChainError::block_not_found(number));
		}

		serde_json::from_value(block_data).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block {}: {}", number, e))
		})
	}
}
