//! Blockchain-specific model implementations.
//!
//! Only EVM chains are tracked; the submodule holds the JSON-RPC payload types.

pub mod evm;
