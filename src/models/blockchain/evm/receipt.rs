//! EVM transaction receipt data structures.

use alloy::primitives::{B256, U64};
use serde::{Deserialize, Serialize};

/// The subset of `eth_getTransactionReceipt` the validator needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
	/// Hash of the transaction this receipt belongs to
	#[serde(default)]
	pub transaction_hash: Option<B256>,
	/// Number of the block containing the transaction
	#[serde(default)]
	pub block_number: Option<U64>,
	/// Execution status: 1 for success, 0 for failure.
	/// Absent on pre-Byzantium receipts.
	#[serde(default)]
	pub status: Option<U64>,
}

impl TransactionReceipt {
	/// Returns true unless the receipt explicitly reports a failed execution
	pub fn is_success(&self) -> bool {
		self.status.is_none_or(|status| status == U64::from(1))
	}
}
