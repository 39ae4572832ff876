//! EVM transaction data structures.

use alloy::primitives::{Address, U256, U64};
use serde::{Deserialize, Serialize};

/// A transaction object embedded in a full block
///
/// The hash is kept as the raw string the node returned: deciding whether it
/// is well formed is the validator's job, so a malformed hash must not make
/// the whole block undecodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Raw transaction hash as reported by the node
	#[serde(default)]
	pub hash: Option<String>,
	/// Sender address
	pub from: Address,
	/// Recipient address (None for contract creation)
	#[serde(default)]
	pub to: Option<Address>,
	/// Transferred value in the chain's smallest unit
	#[serde(default)]
	pub value: U256,
	/// Number of the block containing the transaction
	#[serde(default)]
	pub block_number: Option<U64>,
}

impl Transaction {
	/// Get the transaction value (amount of native currency transferred)
	pub fn value(&self) -> &U256 {
		&self.value
	}

	/// Get the transaction sender address
	pub fn sender(&self) -> &Address {
		&self.from
	}

	/// Get the transaction recipient address (None for contract creation)
	pub fn to(&self) -> Option<&Address> {
		self.to.as_ref()
	}

	/// Get the raw transaction hash, if the node returned one
	pub fn hash(&self) -> Option<&str> {
		self.hash.as_deref()
	}

	/// Returns true when the transaction deploys a contract
	pub fn is_contract_creation(&self) -> bool {
		self.to.is_none()
	}
}
