//! Blockchain client implementations.
//!
//! Contains the client for Ethereum-compatible chains.

mod evm {
	pub mod client;
}

pub use evm::client::{EvmClient, EvmClientTrait};
