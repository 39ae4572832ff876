//! Transaction validation.
//!
//! A matched transaction is alerted on unless there is positive evidence that
//! it is not worth it: a missing or malformed hash, or a receipt reporting a
//! failed execution. Receipt lookup failures never reject a transaction.

use std::sync::Arc;

use alloy::primitives::B256;
use tracing::{debug, warn};

use crate::{
	models::{Chain, EVMTransaction},
	services::blockchain::EvmClientTrait,
	utils::string_to_b256,
};

/// Why a matched transaction will not be alerted on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
	/// The node returned no hash for the transaction
	MissingHash,
	/// The hash does not decode to 32 bytes
	MalformedHash(String),
	/// The receipt reports a reverted execution
	Failed,
}

/// Outcome of a validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
	/// The transaction should be alerted on
	Accepted { hash: B256 },
	Rejected(RejectReason),
}

impl Validation {
	pub fn is_accepted(&self) -> bool {
		matches!(self, Self::Accepted { .. })
	}
}

/// Validates matched transactions of one chain
pub struct TransactionValidator<C> {
	chain: Arc<Chain>,
	client: Arc<C>,
}

impl<C: EvmClientTrait> TransactionValidator<C> {
	pub fn new(chain: Arc<Chain>, client: Arc<C>) -> Self {
		Self { chain, client }
	}

	/// Decides whether `tx` deserves an alert
	///
	/// Never fails: a receipt lookup error or a missing receipt is logged and
	/// the transaction is accepted.
	pub async fn validate(&self, tx: &EVMTransaction) -> Validation {
		let Some(raw_hash) = tx.hash() else {
			warn!(chain = %self.chain.slug, from = %tx.from, "Transaction without hash");
			return Validation::Rejected(RejectReason::MissingHash);
		};

		let Some(hash) = string_to_b256(raw_hash) else {
			warn!(chain = %self.chain.slug, hash = %raw_hash, "Malformed transaction hash");
			return Validation::Rejected(RejectReason::MalformedHash(raw_hash.to_string()));
		};

		match self.client.get_transaction_receipt(hash).await {
			Ok(Some(receipt)) if !receipt.is_success() => {
				debug!(chain = %self.chain.slug, hash = %raw_hash, "Transaction reverted");
				Validation::Rejected(RejectReason::Failed)
			}
			Ok(Some(_)) => Validation::Accepted { hash },
			Ok(None) => {
				debug!(chain = %self.chain.slug, hash = %raw_hash, "No receipt yet, accepting");
				Validation::Accepted { hash }
			}
			Err(e) => {
				warn!(
					chain = %self.chain.slug,
					hash = %raw_hash,
					"Receipt lookup failed, accepting transaction: {}",
					e
				);
				Validation::Accepted { hash }
			}
		}
	}

	pub async fn is_valid(&self, tx: &EVMTransaction) -> bool {
		self.validate(tx).await.is_accepted()
	}
}
