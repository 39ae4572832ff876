use alloy::primitives::{B256, U64};

use crate::models::EVMTransactionReceipt;

/// A builder for creating test EVM transaction receipts with default values.
#[derive(Debug)]
pub struct ReceiptBuilder {
	transaction_hash: Option<B256>,
	block_number: Option<u64>,
	status: Option<u64>,
}

impl Default for ReceiptBuilder {
	/// Default receipt builder: a successful execution
	fn default() -> Self {
		Self {
			transaction_hash: None,
			block_number: None,
			status: Some(1),
		}
	}
}

impl ReceiptBuilder {
	/// Creates a new ReceiptBuilder instance.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the transaction hash of the receipt.
	pub fn transaction_hash(mut self, hash: B256) -> Self {
		self.transaction_hash = Some(hash);
		self
	}

	/// Sets the block number of the receipt.
	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = Some(block_number);
		self
	}

	/// Marks the receipt as reverted.
	pub fn failed(mut self) -> Self {
		self.status = Some(0);
		self
	}

	/// Removes the status field, as on pre-Byzantium receipts.
	pub fn without_status(mut self) -> Self {
		self.status = None;
		self
	}

	/// Builds the TransactionReceipt instance.
	pub fn build(self) -> EVMTransactionReceipt {
		EVMTransactionReceipt {
			transaction_hash: self.transaction_hash,
			block_number: self.block_number.map(U64::from),
			status: self.status.map(U64::from),
		}
	}
}
