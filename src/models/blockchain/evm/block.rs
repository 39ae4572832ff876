//! EVM block data structures.

use alloy::primitives::{B256, U64};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// A block as returned by `eth_getBlockByNumber` with full transaction objects
///
/// Only the fields the tracker reads are decoded; everything else in the RPC
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
	/// Block number (absent for pending blocks)
	#[serde(default)]
	pub number: Option<U64>,
	/// Block hash (absent for pending blocks)
	#[serde(default)]
	pub hash: Option<B256>,
	/// Transactions in block order
	#[serde(default)]
	pub transactions: Vec<Transaction>,
}

impl Block {
	/// Get the block number
	///
	/// Returns the block number as an `Option<u64>`.
	pub fn number(&self) -> Option<u64> {
		self.number.map(|n| n.to::<u64>())
	}
}
