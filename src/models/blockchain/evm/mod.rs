//! Ethereum Virtual Machine (EVM) blockchain specific implementations.
//!
//! This module contains the block, transaction and receipt shapes returned by
//! EVM JSON-RPC nodes.

mod block;
mod receipt;
mod transaction;

pub use block::Block as EVMBlock;
pub use receipt::TransactionReceipt as EVMTransactionReceipt;
pub use transaction::Transaction as EVMTransaction;
