//! Core blockchain client interface and traits.
//!
//! This module defines the interface the block scanner and the transaction
//! validator require from a chain RPC client.

use async_trait::async_trait;

use crate::{models::EVMBlock, services::blockchain::BlockChainError};

/// Defines the core interface for blockchain clients
///
/// One client is created per chain at startup and reused for the lifetime of
/// the process.
#[async_trait]
pub trait BlockChainClient: Send + Sync {
	/// Retrieves the latest block number from the blockchain
	///
	/// # Returns
	/// * `Result<u64, BlockChainError>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves a single block with its full transaction objects
	///
	/// # Arguments
	/// * `number` - The block number to fetch
	///
	/// # Returns
	/// * `Result<EVMBlock, BlockChainError>` - The block or an error
	///
	/// # Note
	/// The scanner never requests a block above the head it has observed, so
	/// a missing block is reported as `BlockChainError::BlockNotFound`.
	async fn get_block(&self, number: u64) -> Result<EVMBlock, BlockChainError>;
}
