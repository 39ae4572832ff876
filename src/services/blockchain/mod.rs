//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for interacting with
//! EVM chains over JSON-RPC. Includes:
//!
//! - Generic blockchain client trait
//! - EVM specific client with receipt lookup
//! - HTTP transport implementation
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::{EvmClient, EvmClientTrait};
pub use error::BlockChainError;
pub use transports::{BlockchainTransport, HttpTransportClient};
