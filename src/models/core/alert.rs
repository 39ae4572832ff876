use alloy::primitives::B256;

/// A rendered notification waiting to be delivered
///
/// Produced once per accepted transaction and handed to the dispatcher. It is
/// never retried: if delivery fails the alert is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
	/// Where the transport should deliver the message (a Telegram chat id)
	pub destination: String,
	/// Fully rendered message body
	pub text: String,
	/// Slug of the chain the transaction was found on
	pub chain_slug: String,
	/// Block containing the transaction
	pub block_number: u64,
	/// Hash of the transaction
	pub transaction_hash: B256,
}
