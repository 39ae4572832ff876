//! Blockchain error types and handling.
//!
//! This module provides the error type for chain RPC operations, covering
//! network connectivity, malformed responses and missing blocks.

use thiserror::Error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// Errors related to malformed requests or invalid responses
	#[error("Request error: {0}")]
	RequestError(String),

	/// When a requested block cannot be found on the blockchain
	///
	/// Contains the block number that was not found
	#[error("Block not found: {0}")]
	BlockNotFound(u64),

	/// Internal errors within the blockchain client
	#[error("Internal error: {0}")]
	InternalError(String),
}

impl BlockChainError {
	/// Creates a new connection error
	pub fn connection_error(msg: impl Into<String>) -> Self {
		Self::ConnectionError(msg.into())
	}

	/// Creates a new request error
	pub fn request_error(msg: impl Into<String>) -> Self {
		Self::RequestError(msg.into())
	}

	/// Creates a new block not found error
	pub fn block_not_found(number: u64) -> Self {
		Self::BlockNotFound(number)
	}

	/// Creates a new internal error
	pub fn internal_error(msg: impl Into<String>) -> Self {
		Self::InternalError(msg.into())
	}
}
