use serde::{Deserialize, Serialize};

/// Number of decimals used by the native currency of EVM chains
pub const DEFAULT_NATIVE_DECIMALS: u8 = 18;

/// A monitored chain and everything needed to talk about it
///
/// One instance per configured chain, immutable after construction and
/// shared between the scanner and the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chain {
	/// Identifier used in configuration and logs (e.g. `ethereum`)
	pub slug: String,
	/// Human readable name used in alerts (e.g. `Ethereum`)
	pub name: String,
	/// JSON-RPC endpoint
	pub rpc_url: String,
	/// Explorer prefix; the transaction hash is appended to it
	pub explorer_url: String,
	/// Ticker of the native currency (e.g. `ETH`)
	pub native_symbol: String,
	/// Exponent between the smallest unit and the display unit
	pub decimals: u8,
}

impl Chain {
	/// Full explorer URL for a hex encoded transaction hash
	pub fn explorer_link(&self, hash_hex: &str) -> String {
		format!("{}{}", self.explorer_url, hash_hex)
	}
}
