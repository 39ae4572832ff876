//! Block watcher error types and handling.
//!
//! Covers the failures of one chain's scan. They are logged by the tracker
//! loop and never stop it.

use std::time::Duration;

use thiserror::Error;

use crate::services::blockchain::BlockChainError;

/// Represents possible errors while scanning a chain
#[derive(Debug, Error)]
pub enum BlockWatcherError {
	/// The chain's RPC node could not answer
	#[error("Network error: {0}")]
	NetworkError(String),

	/// Fetching a block of the scanned range failed
	#[error("Failed to fetch block {block}: {source}")]
	BlockFetchError {
		block: u64,
		#[source]
		source: BlockChainError,
	},

	/// The scan did not finish within the allotted time
	#[error("Scan timed out after {0:?}")]
	Timeout(Duration),
}

impl BlockWatcherError {
	/// Creates a new network error
	pub fn network_error(msg: impl Into<String>) -> Self {
		Self::NetworkError(msg.into())
	}

	/// Creates a new block fetch error
	pub fn block_fetch_error(block: u64, source: BlockChainError) -> Self {
		Self::BlockFetchError { block, source }
	}

	/// Creates a new timeout error
	pub fn timeout(limit: Duration) -> Self {
		Self::Timeout(limit)
	}
}

impl From<BlockChainError> for BlockWatcherError {
	fn from(err: BlockChainError) -> Self {
		Self::network_error(err.to_string())
	}
}
